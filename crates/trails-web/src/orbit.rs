// Orbit controls around the origin. Pure math so it can be tested host-side.

use glam::{Vec2, Vec3};
use trails_core::{CAMERA_MAX_POLAR_ANGLE_DEG, CAMERA_MIN_POLAR_ANGLE_DEG};

pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 40.0;
pub const ROTATE_SPEED: f32 = 0.005; // radians per dragged pixel
pub const ZOOM_SPEED: f32 = 0.001; // per wheel delta unit

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around +Y, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
}

impl Orbit {
    /// Orbit that places the eye at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        let mut orbit = Self {
            target,
            distance,
            azimuth,
            polar,
        };
        orbit.clamp();
        orbit
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + self.distance * Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a)
    }

    /// Rotate by a pointer drag of `delta` pixels.
    pub fn drag(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * ROTATE_SPEED;
        self.polar -= delta.y * ROTATE_SPEED;
        self.clamp();
    }

    /// Zoom by a wheel delta. Positive values move away from the target.
    pub fn zoom(&mut self, wheel_delta: f32) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.distance *= (wheel_delta * ZOOM_SPEED).exp();
        self.clamp();
    }

    fn clamp(&mut self) {
        self.polar = self
            .polar
            .clamp(
                CAMERA_MIN_POLAR_ANGLE_DEG.to_radians(),
                CAMERA_MAX_POLAR_ANGLE_DEG.to_radians(),
            );
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

/// Pointer drag bookkeeping.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
    }

    /// Movement since the previous sample, or `None` when not dragging.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}
