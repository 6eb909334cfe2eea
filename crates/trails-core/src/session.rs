//! One visualization session: the loaded sequence, its playback engine and
//! the bookkeeping that keeps only the latest load.

use glam::Vec3;
use std::time::Duration;

use crate::engine::{PlaybackConfig, PlaybackEngine, PlaybackEvent};
use crate::error::LoadError;
use crate::projector::{visible_tokens, VisibleToken};
use crate::record::{output_text, prepare_request, step_label, TokenRecord, TokenSequence, VisualizeRequest};
use crate::resolver::target_position;
use crate::scene::{compose, SceneConfig, SceneFrame, ScenePlan};

/// Identifies one load request. Only the most recent ticket is adopted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct Session {
    pub scene: SceneConfig,
    sequence: TokenSequence,
    engine: PlaybackEngine,
    latest_ticket: u64,
    loading: bool,
    has_data: bool,
    error: Option<String>,
}

impl Session {
    pub fn new(playback: PlaybackConfig, scene: SceneConfig) -> Self {
        Self {
            scene,
            sequence: TokenSequence::default(),
            engine: PlaybackEngine::new(playback),
            latest_ticket: 0,
            loading: false,
            has_data: false,
            error: None,
        }
    }

    pub fn sequence(&self) -> &TokenSequence {
        &self.sequence
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a load for `text`. Any load still in flight is superseded.
    /// Rejected input leaves the current data in place and records a message.
    pub fn begin_load(&mut self, text: &str) -> Result<(LoadTicket, VisualizeRequest), LoadError> {
        let request = prepare_request(text).map_err(|err| {
            log::warn!("[session] rejected input: {err}");
            self.error = Some(err.user_message().to_string());
            err
        })?;
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        log::debug!("[session] load #{} requested", self.latest_ticket);
        Ok((LoadTicket(self.latest_ticket), request))
    }

    /// Apply the outcome of a load. Returns false, changing nothing, when
    /// `ticket` has been superseded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TokenRecord>, LoadError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            log::warn!(
                "[session] dropping stale load #{} (latest is #{})",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => self.adopt(records),
            Err(err) => {
                log::error!("[session] load #{} failed: {err}", ticket.0);
                self.error = Some(err.user_message().to_string());
                self.sequence = TokenSequence::default();
                self.has_data = false;
                self.engine.start(0, false);
            }
        }
        true
    }

    /// Adopt `records` directly, superseding any pending load.
    pub fn load_records(&mut self, records: Vec<TokenRecord>) {
        self.latest_ticket += 1;
        self.loading = false;
        self.error = None;
        self.adopt(records);
    }

    fn adopt(&mut self, records: Vec<TokenRecord>) {
        self.sequence = TokenSequence::new(records);
        self.has_data = true;
        self.engine.start(self.sequence.total_steps(), true);
        if self.sequence.is_empty() {
            log::warn!("[session] loaded an empty token sequence");
            return;
        }
        log::info!(
            "[session] loaded {} input and {} output tokens",
            self.sequence.inputs().len(),
            self.sequence.outputs().len()
        );
    }

    // ---------------- Controller surface ----------------

    pub fn toggle_play(&mut self) {
        self.engine.toggle_play();
    }

    pub fn play(&mut self) {
        self.engine.play();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn seek(&mut self, step: usize) {
        if self.has_data {
            self.engine.seek(step);
        }
    }

    pub fn set_speed(&mut self, multiplier: f32) {
        self.engine.set_speed(multiplier);
    }

    pub fn reset(&mut self) {
        if self.has_data {
            self.engine.reset();
        }
    }

    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<PlaybackEvent>) {
        self.engine.tick(dt, out_events);
    }

    // ---------------- Derived views ----------------

    pub fn visible_tokens(&self) -> Vec<VisibleToken<'_>> {
        visible_tokens(
            self.sequence.inputs(),
            self.sequence.outputs(),
            self.engine.step(),
            self.engine.phase(),
        )
    }

    pub fn target_position(&self) -> Vec3 {
        target_position(
            self.sequence.inputs(),
            self.sequence.outputs(),
            self.engine.step(),
        )
    }

    pub fn output_text(&self) -> String {
        output_text(self.sequence.outputs(), self.engine.step())
    }

    pub fn step_label(&self) -> String {
        step_label(self.engine.step(), self.engine.total_steps())
    }

    /// Draw instructions for the current instant. Empty while loading.
    pub fn compose(&self) -> ScenePlan {
        if self.loading {
            return ScenePlan::default();
        }
        let visible = self.visible_tokens();
        let frame = SceneFrame {
            visible: &visible,
            phase: self.engine.phase(),
            gather_progress: self.engine.gather_progress(),
            grow_progress: self.engine.grow_progress(),
            target: self.target_position(),
        };
        compose(&frame, &self.scene)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PlaybackConfig::default(), SceneConfig::default())
    }
}
