use trails_core::Session;
use web_sys as web;

use crate::dom;

pub const INPUT_ID: &str = "input-text";
pub const SUBMIT_ID: &str = "submit-btn";
pub const PLAY_ID: &str = "play-btn";
pub const RESET_ID: &str = "reset-btn";
pub const STEP_SLIDER_ID: &str = "step-slider";
pub const SPEED_SLIDER_ID: &str = "speed-slider";
pub const FONT_SLIDER_ID: &str = "font-slider";
pub const STEP_LABEL_ID: &str = "step-label";
pub const SPEED_LABEL_ID: &str = "speed-label";
pub const OUTPUT_TEXT_ID: &str = "output-text";
pub const STATUS_ID: &str = "status";

/// The parts of the session the controller panel shows. Compared frame to
/// frame so the DOM is only touched on change.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSnapshot {
    pub step: usize,
    pub total_steps: usize,
    pub is_playing: bool,
    pub speed: f32,
    pub font_size: f32,
    pub loading: bool,
    pub error: Option<String>,
    pub has_data: bool,
}

impl PanelSnapshot {
    pub fn of(session: &Session) -> Self {
        let engine = session.engine();
        Self {
            step: engine.step(),
            total_steps: engine.total_steps(),
            is_playing: engine.is_playing(),
            speed: engine.speed(),
            font_size: session.scene.font_size,
            loading: session.is_loading(),
            error: session.error().map(str::to_string),
            has_data: session.has_data(),
        }
    }
}

pub fn sync_panel(document: &web::Document, session: &Session, snap: &PanelSnapshot) {
    dom::set_text(document, STEP_LABEL_ID, &session.step_label());
    dom::set_text(document, SPEED_LABEL_ID, &format!("{:.2}x", snap.speed));
    dom::set_text(document, PLAY_ID, if snap.is_playing { "Pause" } else { "Play" });
    dom::set_text(document, OUTPUT_TEXT_ID, &session.output_text());

    let status = if snap.loading {
        "Loading..."
    } else {
        snap.error.as_deref().unwrap_or("")
    };
    dom::set_text(document, STATUS_ID, status);

    if let Some(slider) = dom::input_element(document, STEP_SLIDER_ID) {
        slider.set_max(&snap.total_steps.to_string());
        slider.set_value(&snap.step.to_string());
    }
    dom::set_input_value(document, SPEED_SLIDER_ID, &snap.speed.to_string());
    dom::set_input_value(document, FONT_SLIDER_ID, &snap.font_size.to_string());

    let idle = !snap.has_data || snap.loading;
    for id in [PLAY_ID, RESET_ID, STEP_SLIDER_ID] {
        dom::set_disabled(document, id, idle);
    }
    dom::set_disabled(document, SUBMIT_ID, snap.loading);
}
