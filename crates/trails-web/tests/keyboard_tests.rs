// Host-side tests for the keyboard mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod keys {
    include!("../src/keys.rs");
}

use keys::*;

#[test]
fn controller_keys_map_to_actions() {
    assert_eq!(action_for_key(" "), Some(ControlAction::TogglePlay));
    assert_eq!(action_for_key("ArrowLeft"), Some(ControlAction::SeekBy(-1)));
    assert_eq!(action_for_key("ArrowRight"), Some(ControlAction::SeekBy(1)));
    assert_eq!(action_for_key("+"), Some(ControlAction::SpeedBy(0.25)));
    assert_eq!(action_for_key("="), Some(ControlAction::SpeedBy(0.25)));
    assert_eq!(action_for_key("-"), Some(ControlAction::SpeedBy(-0.25)));
    assert_eq!(action_for_key("r"), Some(ControlAction::Reset));
    assert_eq!(action_for_key("R"), Some(ControlAction::Reset));
    assert_eq!(action_for_key("["), Some(ControlAction::FontSizeBy(-0.01)));
    assert_eq!(action_for_key("]"), Some(ControlAction::FontSizeBy(0.01)));
}

#[test]
fn unbound_keys_are_ignored() {
    for key in ["a", "Enter", "Escape", "ArrowUp", "1", ""] {
        assert_eq!(action_for_key(key), None, "{key:?} should be unbound");
    }
}

#[test]
fn seek_target_stays_in_range() {
    assert_eq!(seek_target(0, -1, 5), 0);
    assert_eq!(seek_target(2, -1, 5), 1);
    assert_eq!(seek_target(4, 1, 5), 5);
    assert_eq!(seek_target(5, 1, 5), 5);
    assert_eq!(seek_target(0, 1, 0), 0);
}

#[test]
fn text_fields_swallow_keys() {
    assert!(is_text_entry_tag("INPUT"));
    assert!(is_text_entry_tag("textarea"));
    assert!(!is_text_entry_tag("CANVAS"));
    assert!(!is_text_entry_tag("BUTTON"));
}
