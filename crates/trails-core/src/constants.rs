use glam::Vec3;
use std::time::Duration;

// Shared playback/visual tuning constants used by both web and native frontends.

// Frame pacing
pub const TARGET_FPS: u32 = 60; // change this alone to retime every tick
pub const FRAME_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / TARGET_FPS as u64);

// Progress increments per tick (multiplied by the speed multiplier)
pub const GATHER_PROGRESS_INCREMENT: f32 = 0.05;
pub const GROW_PROGRESS_INCREMENT: f32 = 0.04;

// Idle -> Gathering delay while auto-playing (divided by the speed multiplier)
pub const AUTO_PLAY_DELAY: Duration = Duration::from_millis(300);

// Speed slider
pub const MIN_ANIMATION_SPEED: f32 = 0.25;
pub const MAX_ANIMATION_SPEED: f32 = 3.0;
pub const ANIMATION_SPEED_STEP: f32 = 0.25;
pub const DEFAULT_ANIMATION_SPEED: f32 = 1.0;

// Accumulated f32 increments land a hair under 1.0; treat that as complete.
pub const PROGRESS_EPSILON: f32 = 1e-4;

// Labels
pub const TEXT_OFFSET_Y: f32 = 0.2; // labels float this far above their anchor
pub const TOKEN_FONT_SIZE: f32 = 0.15;
pub const GATHERING_TOKEN_FONT_SIZE: f32 = 0.12;
pub const DEFAULT_FONT_SIZE: f32 = 0.1;
pub const MIN_FONT_SIZE: f32 = 0.05;
pub const MAX_FONT_SIZE: f32 = 0.3;
pub const CHAR_WIDTH_RATIO: f32 = 0.6; // approximate glyph advance / font size
pub const SPACE_WIDTH_RATIO: f32 = 0.3;

// Gathering labels
pub const GATHERING_TOKEN_OPACITY_BASE: f32 = 0.7; // held until the fade starts
pub const GATHERING_TOKEN_OPACITY_FADE_START: f32 = 0.9;
pub const GATHERING_TOKEN_SCALE_SHRINK_START: f32 = 0.8;

// Arrow heads: 10% of the shaft, capped, width 40% of the head
pub const ARROW_HEAD_LENGTH_RATIO: f32 = 0.1;
pub const ARROW_HEAD_MAX_LENGTH: f32 = 0.15;
pub const ARROW_HEAD_WIDTH_RATIO: f32 = 0.4;

// Camera
pub const CAMERA_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_MIN_POLAR_ANGLE_DEG: f32 = 10.0; // keeps labels from spinning around the pole
pub const CAMERA_MAX_POLAR_ANGLE_DEG: f32 = 170.0;
pub const AXES_HELPER_SIZE: f32 = 2.0;
pub const ORIGIN_MARKER_RADIUS: f32 = 0.05;

// Two-color token scheme (same hues as the Y and X axes)
pub const INPUT_TOKEN_COLOR: [f32; 3] = [0.322, 0.769, 0.102]; // #52c41a
pub const OUTPUT_TOKEN_COLOR: [f32; 3] = [1.0, 0.302, 0.310]; // #ff4d4f
pub const AXIS_Z_COLOR: [f32; 3] = [0.094, 0.565, 1.0]; // #1890ff

#[inline]
pub fn camera_position_vec3() -> Vec3 {
    Vec3::from(CAMERA_POSITION)
}
