/// Axis permutation from placement records to world space
/// (row-major: [x_new, y_new, z_new]). Swaps X and Z.
pub const PLACEMENT_AXIS_PERMUTATION: [[f32; 3]; 3] = [
    [0.0, 0.0, 1.0], // X = Z
    [0.0, 1.0, 0.0], // Y = Y
    [1.0, 0.0, 0.0], // Z = X
];

/// Apply the placement permutation to a record position.
pub fn permute_placement(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let input = [x, y, z];
    let mut output = [0.0; 3];

    for i in 0..3 {
        for j in 0..3 {
            output[i] += PLACEMENT_AXIS_PERMUTATION[i][j] * input[j];
        }
    }

    (output[0], output[1], output[2])
}
