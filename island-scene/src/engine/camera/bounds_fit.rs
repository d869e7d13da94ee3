use bevy::prelude::*;
use bevy::window::WindowResized;
use constants::render_settings::{FIT_ANIMATION_SPEED, FIT_MARGIN};

use crate::engine::assets::bounds::{ModelBounds, WorldBounds};
use crate::engine::camera::SceneCamera;
use crate::engine::camera::orbit_controls::OrbitControls;
use crate::engine::scene::boundary::BoundaryVolume;

/// Ask the fit helper to frame something.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitRequest {
    Object(Entity),
    Boundary,
}

/// Where the camera should end up after a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitGoal {
    pub target: Vec3,
    pub distance: f32,
}

/// Near/far planes and zoom limit derived from the fitted distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    pub near: f32,
    pub far: f32,
    pub max_distance: f32,
}

/// Camera framing helper: `fit.refresh(bounds).clip().fit()`.
///
/// `fov` and `aspect` track the scene camera every frame; `observed` is the
/// last request, replayed when the window is resized.
#[derive(Resource, Debug, Clone)]
pub struct BoundsFit {
    pub margin: f32,
    pub fov: f32,
    pub aspect: f32,
    bounds: Option<WorldBounds>,
    goal: Option<FitGoal>,
    clip: Option<ClipPlanes>,
    observed: Option<FitRequest>,
}

impl Default for BoundsFit {
    fn default() -> Self {
        Self {
            margin: FIT_MARGIN,
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 1.0,
            bounds: None,
            goal: None,
            clip: None,
            observed: None,
        }
    }
}

impl BoundsFit {
    pub fn refresh(&mut self, bounds: WorldBounds) -> &mut Self {
        self.bounds = Some(bounds);
        self
    }

    /// Derive clip planes from the refreshed bounds.
    pub fn clip(&mut self) -> &mut Self {
        if let Some(distance) = self.fit_distance() {
            self.clip = Some(ClipPlanes {
                near: distance / 100.0,
                far: distance * 100.0,
                max_distance: distance * 10.0,
            });
        }
        self
    }

    /// Set the framing goal for the refreshed bounds.
    pub fn fit(&mut self) -> &mut Self {
        if let (Some(bounds), Some(distance)) = (self.bounds, self.fit_distance()) {
            self.goal = Some(FitGoal {
                target: bounds.center(),
                distance,
            });
        }
        self
    }

    /// Camera distance at which the refreshed bounds fill the view, times the margin.
    pub fn fit_distance(&self) -> Option<f32> {
        let bounds = self.bounds?;
        let size = bounds.size();
        let max_size = size.x.max(size.y).max(size.z);
        let fit_height = max_size / (2.0 * (self.fov * 0.5).tan());
        let fit_width = fit_height / self.aspect.max(f32::EPSILON);
        Some(self.margin * fit_height.max(fit_width))
    }

    pub fn goal(&self) -> Option<FitGoal> {
        self.goal
    }

    pub fn clip_planes(&self) -> Option<ClipPlanes> {
        self.clip
    }

    pub fn observed(&self) -> Option<FitRequest> {
        self.observed
    }

    fn take_clip(&mut self) -> Option<ClipPlanes> {
        self.clip.take()
    }
}

/// Resolve each fit request to world bounds and refit.
pub fn apply_fit_requests(
    mut requests: EventReader<FitRequest>,
    mut fit: ResMut<BoundsFit>,
    targets: Query<(&ModelBounds, &GlobalTransform), Without<BoundaryVolume>>,
    boundary: Query<(&ModelBounds, &GlobalTransform), With<BoundaryVolume>>,
) {
    for request in requests.read() {
        let resolved = match *request {
            FitRequest::Object(entity) => targets.get(entity).ok(),
            FitRequest::Boundary => boundary.single().ok(),
        };
        let Some((bounds, transform)) = resolved else {
            warn!("Fit target {:?} has no bounds yet", request);
            continue;
        };

        fit.refresh(bounds.to_world(transform)).clip().fit();
        fit.observed = Some(*request);
    }
}

/// Replay the last fit when the window changes shape.
pub fn observe_window_resize(
    mut resized: EventReader<WindowResized>,
    fit: Res<BoundsFit>,
    mut requests: EventWriter<FitRequest>,
) {
    if resized.read().count() == 0 {
        return;
    }
    if let Some(request) = fit.observed() {
        requests.write(request);
    }
}

/// Keep the fit helper's view parameters in sync with the scene camera.
pub fn track_fit_view(
    mut fit: ResMut<BoundsFit>,
    cameras: Query<(&Camera, &Projection), With<SceneCamera>>,
) {
    let Ok((camera, Projection::Perspective(perspective))) = cameras.single() else {
        return;
    };
    let aspect = camera
        .logical_viewport_size()
        .map_or(perspective.aspect_ratio, |size| size.x / size.y.max(1.0));
    if fit.fov != perspective.fov || fit.aspect != aspect {
        fit.fov = perspective.fov;
        fit.aspect = aspect;
    }
}

/// Apply pending clip planes and ease the orbit towards the fit goal.
pub fn animate_fit(
    time: Res<Time>,
    mut fit: ResMut<BoundsFit>,
    controls: Option<ResMut<OrbitControls>>,
    mut projections: Query<&mut Projection, With<SceneCamera>>,
) {
    let Some(mut controls) = controls else { return };

    if let Some(clip) = fit.take_clip() {
        if let Ok(mut projection) = projections.single_mut() {
            if let Projection::Perspective(perspective) = &mut *projection {
                perspective.near = clip.near;
                perspective.far = clip.far;
            }
        }
        controls.max_distance = clip.max_distance;
    }

    let Some(goal) = fit.goal else { return };
    let t = (FIT_ANIMATION_SPEED * time.delta_secs()).min(1.0);
    controls.target = controls.target.lerp(goal.target, t);
    controls.radius += (goal.distance - controls.radius) * t;

    let settled = controls.target.distance(goal.target) < 1e-3
        && (controls.radius - goal.distance).abs() < 1e-3;
    if settled {
        controls.target = goal.target;
        controls.radius = goal.distance;
        fit.goal = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f32, center: Vec3) -> WorldBounds {
        WorldBounds {
            min: center - Vec3::splat(size * 0.5),
            max: center + Vec3::splat(size * 0.5),
        }
    }

    #[test]
    fn fit_targets_centre_at_margin_distance() {
        let mut fit = BoundsFit {
            fov: std::f32::consts::FRAC_PI_2,
            aspect: 2.0,
            ..default()
        };
        fit.refresh(cube(4.0, Vec3::new(1.0, 2.0, 3.0))).clip().fit();

        // tan(45°) = 1, so the box fills the height at distance 2.
        let goal = fit.goal().unwrap();
        assert_eq!(goal.target, Vec3::new(1.0, 2.0, 3.0));
        assert!((goal.distance - 4.0).abs() < 1e-4);

        let clip = fit.clip_planes().unwrap();
        assert!((clip.near - 0.04).abs() < 1e-5);
        assert!((clip.far - 400.0).abs() < 1e-2);
        assert!((clip.max_distance - 40.0).abs() < 1e-3);
    }

    #[test]
    fn narrow_view_fits_by_width() {
        let mut fit = BoundsFit {
            fov: std::f32::consts::FRAC_PI_2,
            aspect: 0.5,
            margin: 1.0,
            ..default()
        };
        fit.refresh(cube(4.0, Vec3::ZERO)).fit();
        assert!((fit.goal().unwrap().distance - 4.0).abs() < 1e-4);
    }

    #[test]
    fn fit_without_bounds_is_a_no_op() {
        let mut fit = BoundsFit::default();
        fit.clip().fit();
        assert!(fit.goal().is_none());
        assert!(fit.clip_planes().is_none());
    }

    #[test]
    fn requests_resolve_boundary_and_objects() {
        let mut app = App::new();
        app.add_event::<FitRequest>()
            .init_resource::<BoundsFit>()
            .add_systems(Update, apply_fit_requests);

        app.world_mut().spawn((
            BoundaryVolume,
            ModelBounds::cube(20.0),
            GlobalTransform::IDENTITY,
        ));
        let item = app
            .world_mut()
            .spawn((
                ModelBounds::cube(2.0),
                GlobalTransform::from_translation(Vec3::new(5.0, 0.0, 0.0)),
            ))
            .id();

        app.world_mut().send_event(FitRequest::Object(item));
        app.update();
        let fit = app.world().resource::<BoundsFit>();
        assert_eq!(fit.goal().unwrap().target, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(fit.observed(), Some(FitRequest::Object(item)));

        app.world_mut().send_event(FitRequest::Boundary);
        app.update();
        let fit = app.world().resource::<BoundsFit>();
        assert_eq!(fit.goal().unwrap().target, Vec3::ZERO);
        assert_eq!(fit.observed(), Some(FitRequest::Boundary));
    }
}
