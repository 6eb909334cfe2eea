//! Point math for token trajectories.
//!
//! All functions are pure. `lerp` does not clamp `t`; callers clamp first.

use crate::constants::{ARROW_HEAD_LENGTH_RATIO, ARROW_HEAD_MAX_LENGTH, ARROW_HEAD_WIDTH_RATIO};
use glam::Vec3;

/// Componentwise average of two points.
#[inline]
pub fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b) * 0.5
}

/// `a + (b - a) * t` for each component.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Euclidean distance between two points.
#[inline]
pub fn vector_length(a: Vec3, b: Vec3) -> f32 {
    (b - a).length()
}

/// Unit vector pointing from `a` to `b`, or `None` when the points coincide.
#[inline]
pub fn direction(a: Vec3, b: Vec3) -> Option<Vec3> {
    (b - a).try_normalize()
}

/// Arrow head `(length, width)` for a shaft of `shaft_length`.
#[inline]
pub fn arrow_head(shaft_length: f32) -> (f32, f32) {
    let head_length = (shaft_length * ARROW_HEAD_LENGTH_RATIO).min(ARROW_HEAD_MAX_LENGTH);
    (head_length, head_length * ARROW_HEAD_WIDTH_RATIO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_of_coincident_points_is_none() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(direction(p, p).is_none());
    }

    #[test]
    fn arrow_head_is_capped_for_long_shafts() {
        let (short_len, short_w) = arrow_head(1.0);
        assert!((short_len - 0.1).abs() < 1e-6);
        assert!((short_w - 0.04).abs() < 1e-6);
        let (long_len, _) = arrow_head(10.0);
        assert!((long_len - ARROW_HEAD_MAX_LENGTH).abs() < 1e-6);
    }
}
