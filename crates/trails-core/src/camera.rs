//! Camera description shared with the frontends.
//!
//! Kept free of platform APIs so it works on native and web targets. The web
//! frontend uses it to project world points onto its 2D canvas.

use crate::constants::{camera_position_vec3, CAMERA_FOV_DEG};
use glam::{Mat4, Vec2, Vec3};

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_position_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to pixel coordinates (origin top-left).
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (1.0 - (ndc.y * 0.5 + 0.5)) * viewport.y,
        ))
    }

    /// Pixels per world unit at `world`, used to size text and arrow heads.
    pub fn pixels_per_unit(&self, world: Vec3, viewport_height: f32) -> f32 {
        let depth = (world - self.eye).dot((self.target - self.eye).normalize_or_zero());
        if depth <= 1e-6 {
            return 0.0;
        }
        viewport_height / (2.0 * depth * (self.fovy_radians * 0.5).tan())
    }
}
