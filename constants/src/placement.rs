/// Models placed on the island at startup, in spawn order.
pub const ANIMAL_MODELS: &[&str] = &[
    "Alpaca",
    "Antelope",
    "Baboon",
    "Badger",
    "Bear",
    "Bull",
    "Cardinal",
    "Chameleon",
];

/// Half-width of the square the animals are scattered over.
pub const PLACEMENT_RANGE: f32 = 20.0;

/// Edge length of the invisible volume the camera frames when nothing is selected.
pub const BOUNDARY_VOLUME_SIZE: f32 = 20.0;
