/// Controller action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlAction {
    TogglePlay,
    SeekBy(i32),
    SpeedBy(f32),
    Reset,
    FontSizeBy(f32),
}

pub const SPEED_KEY_STEP: f32 = 0.25;
pub const FONT_KEY_STEP: f32 = 0.01;

/// Map a `KeyboardEvent.key` value to a controller action.
#[inline]
pub fn action_for_key(key: &str) -> Option<ControlAction> {
    match key {
        " " | "Spacebar" => Some(ControlAction::TogglePlay),
        "ArrowLeft" => Some(ControlAction::SeekBy(-1)),
        "ArrowRight" => Some(ControlAction::SeekBy(1)),
        "+" | "=" => Some(ControlAction::SpeedBy(SPEED_KEY_STEP)),
        "-" | "_" => Some(ControlAction::SpeedBy(-SPEED_KEY_STEP)),
        "r" | "R" => Some(ControlAction::Reset),
        "[" => Some(ControlAction::FontSizeBy(-FONT_KEY_STEP)),
        "]" => Some(ControlAction::FontSizeBy(FONT_KEY_STEP)),
        _ => None,
    }
}

/// Step reached by seeking `delta` from `step`, kept inside `0..=total`.
#[inline]
pub fn seek_target(step: usize, delta: i32, total_steps: usize) -> usize {
    let next = step as i64 + delta as i64;
    next.clamp(0, total_steps as i64) as usize
}

/// Keys typed into a text field must not drive the controller.
#[inline]
pub fn is_text_entry_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea")
}
