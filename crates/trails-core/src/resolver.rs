use glam::Vec3;

use crate::geometry::midpoint;
use crate::record::TokenRecord;

/// Point the gathering labels converge on before output `step` is revealed:
/// the midpoint of that token's arrow.
///
/// The arrow starts at the previous output's destination, or for the first
/// output at the last input's destination, or else at the origin. Past the
/// last output there is nothing to gather toward and the origin is returned.
pub fn target_position(inputs: &[TokenRecord], outputs: &[TokenRecord], step: usize) -> Vec3 {
    let Some(next) = outputs.get(step) else {
        return Vec3::ZERO;
    };
    let start = if step > 0 {
        outputs[step - 1].destination
    } else {
        inputs.last().map_or(Vec3::ZERO, |r| r.destination)
    };
    midpoint(start, next.destination)
}
