use std::time::Duration;

use crate::constants::{
    ANIMATION_SPEED_STEP, AUTO_PLAY_DELAY, DEFAULT_ANIMATION_SPEED, FRAME_INTERVAL,
    GATHER_PROGRESS_INCREMENT, GROW_PROGRESS_INCREMENT, MAX_ANIMATION_SPEED, MIN_ANIMATION_SPEED,
    PROGRESS_EPSILON,
};
use crate::scheduler::Scheduler;

/// Which animation is running for the current step transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Visible labels converge on the next token's target point.
    Gathering,
    /// The next token's arrow extends from its start to its destination.
    Growing,
}

/// What `pause()` does to a phase that is already running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PauseBehavior {
    /// The phase runs to completion; only the next step's auto-start is held.
    #[default]
    FinishInFlight,
    /// The phase stops ticking and resumes where it left off on `play()`.
    Freeze,
}

/// Timing parameters for the playback engine.
///
/// Fields:
/// - `frame_interval`: period of the phase ticks (not scaled by speed)
/// - `gather_increment`: gather progress added per tick at speed 1
/// - `grow_increment`: grow progress added per tick at speed 1
/// - `auto_play_delay`: Idle -> Gathering wait at speed 1
/// - `pause_behavior`: how `pause()` treats an in-flight phase
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    pub frame_interval: Duration,
    pub gather_increment: f32,
    pub grow_increment: f32,
    pub auto_play_delay: Duration,
    pub pause_behavior: PauseBehavior,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_interval: FRAME_INTERVAL,
            gather_increment: GATHER_PROGRESS_INCREMENT,
            grow_increment: GROW_PROGRESS_INCREMENT,
            auto_play_delay: AUTO_PLAY_DELAY,
            pause_behavior: PauseBehavior::default(),
        }
    }
}

/// Snapshot of the engine's playback state.
///
/// A progress value is only meaningful while its phase is active. After a
/// grow completes `grow_progress` holds at 1 so the finished arrow can be
/// drawn for one more frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub step: usize,
    pub phase: Phase,
    pub gather_progress: f32,
    pub grow_progress: f32,
    pub is_playing: bool,
    pub speed_multiplier: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            step: 0,
            phase: Phase::Idle,
            gather_progress: 0.0,
            grow_progress: 0.0,
            is_playing: false,
            speed_multiplier: DEFAULT_ANIMATION_SPEED,
        }
    }
}

/// Transitions reported by [`PlaybackEngine::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    GatherStarted { step: usize },
    GrowStarted { step: usize },
    StepAdvanced { step: usize },
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Timer {
    AutoPlay,
    GatherTick,
    GrowTick,
}

/// Round to the slider's 0.25 grid and clamp to the supported range.
///
/// Returns `None` for NaN or infinite input.
pub fn snap_speed(multiplier: f32) -> Option<f32> {
    if !multiplier.is_finite() {
        return None;
    }
    let steps = (multiplier / ANIMATION_SPEED_STEP).round();
    Some((steps * ANIMATION_SPEED_STEP).clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED))
}

/// Step/phase state machine driving the gather -> grow -> advance cycle.
///
/// Idle waits `auto_play_delay / speed` while playing, Gathering and Growing
/// each advance once per `frame_interval`, and a completed grow increments
/// `step`. All waiting happens on an internal [`Scheduler`] so a reset,
/// seek or rebind cancels every pending callback at once.
///
/// Typical usage:
/// - Construct with `PlaybackEngine::new(config)`
/// - Bind a sequence with `start(total_steps, has_data)`
/// - Call `tick(dt, &mut events)` once per rendered frame
/// - Drive it from the controller with `play`, `pause`, `seek`, `set_speed`
///   and `reset`
pub struct PlaybackEngine {
    pub config: PlaybackConfig,
    state: PlaybackState,
    total_steps: usize,
    has_data: bool,
    timers: Scheduler<Timer>,
}

impl PlaybackEngine {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            state: PlaybackState::default(),
            total_steps: 0,
            has_data: false,
            timers: Scheduler::new(),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn step(&self) -> usize {
        self.state.step
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn speed(&self) -> f32 {
        self.state.speed_multiplier
    }

    pub fn gather_progress(&self) -> f32 {
        self.state.gather_progress
    }

    pub fn grow_progress(&self) -> f32 {
        self.state.grow_progress
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    /// Number of timers currently armed (auto-play delay and phase ticks).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Rebind to a sequence of `total_steps` output tokens.
    ///
    /// Cancels every pending timer and rewinds to step 0; the speed setting
    /// survives. Does not start playback.
    pub fn start(&mut self, total_steps: usize, has_data: bool) {
        self.timers.cancel_all();
        self.state = PlaybackState {
            speed_multiplier: self.state.speed_multiplier,
            ..PlaybackState::default()
        };
        self.total_steps = total_steps;
        self.has_data = has_data;
        log::debug!("[playback] bound to {total_steps} steps (has_data={has_data})");
    }

    pub fn play(&mut self) {
        if !self.has_data || self.total_steps == 0 {
            log::debug!("[playback] play ignored: nothing to play");
            return;
        }
        if self.state.step >= self.total_steps {
            self.state.step = 0;
        }
        self.state.is_playing = true;
        self.resume_phase_tick();
        self.arm_auto_play();
        log::debug!("[playback] play from step {}", self.state.step);
    }

    pub fn pause(&mut self) {
        self.state.is_playing = false;
        self.timers.cancel_kind(Timer::AutoPlay);
        if self.config.pause_behavior == PauseBehavior::Freeze {
            self.timers.cancel_kind(Timer::GatherTick);
            self.timers.cancel_kind(Timer::GrowTick);
        }
        log::debug!("[playback] pause at step {} ({:?})", self.state.step, self.state.phase);
    }

    pub fn toggle_play(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Jump to `step`, clamped to `0..=total_steps`. Cancels any in-flight
    /// phase and pauses.
    pub fn seek(&mut self, step: usize) {
        self.timers.cancel_all();
        self.state.step = step.min(self.total_steps);
        self.state.phase = Phase::Idle;
        self.state.gather_progress = 0.0;
        self.state.grow_progress = 0.0;
        self.state.is_playing = false;
        log::debug!("[playback] seek to step {}", self.state.step);
    }

    /// Change the speed multiplier. Applies from the next progress increment;
    /// a pending auto-play delay is re-armed with the new duration.
    pub fn set_speed(&mut self, multiplier: f32) {
        let Some(speed) = snap_speed(multiplier) else {
            log::warn!("[playback] ignoring non-finite speed {multiplier}");
            return;
        };
        self.state.speed_multiplier = speed;
        if self.timers.cancel_kind(Timer::AutoPlay) {
            self.arm_auto_play();
        }
        log::debug!("[playback] speed x{speed}");
    }

    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.state.step = 0;
        self.state.phase = Phase::Idle;
        self.state.gather_progress = 0.0;
        self.state.grow_progress = 0.0;
        self.state.is_playing = false;
        log::debug!("[playback] reset");
    }

    /// Advance the clock by `dt`, running every timer that comes due.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<PlaybackEvent>) {
        let until = self.timers.now() + dt;
        while let Some(fired) = self.timers.poll(until) {
            match fired.kind {
                Timer::AutoPlay => self.begin_gathering(out_events),
                Timer::GatherTick => self.advance_gathering(out_events),
                Timer::GrowTick => self.advance_growing(out_events),
            }
        }
        self.timers.advance_to(until);
    }

    /// Advance by `frames` frame intervals.
    pub fn tick_frames(&mut self, frames: u32, out_events: &mut Vec<PlaybackEvent>) {
        for _ in 0..frames {
            self.tick(self.config.frame_interval, out_events);
        }
    }

    fn scaled_delay(&self) -> Duration {
        self.config
            .auto_play_delay
            .div_f32(self.state.speed_multiplier)
    }

    fn arm_auto_play(&mut self) {
        if !self.state.is_playing
            || self.state.phase != Phase::Idle
            || self.state.step >= self.total_steps
        {
            return;
        }
        let delay = self.scaled_delay();
        self.timers.schedule_once(Timer::AutoPlay, delay);
    }

    fn resume_phase_tick(&mut self) {
        let period = self.config.frame_interval;
        match self.state.phase {
            Phase::Gathering => {
                self.timers.schedule_every(Timer::GatherTick, period);
            }
            Phase::Growing => {
                self.timers.schedule_every(Timer::GrowTick, period);
            }
            Phase::Idle => {}
        }
    }

    fn begin_gathering(&mut self, out_events: &mut Vec<PlaybackEvent>) {
        if !self.state.is_playing
            || self.state.phase != Phase::Idle
            || self.state.step >= self.total_steps
        {
            return;
        }
        self.state.phase = Phase::Gathering;
        self.state.gather_progress = 0.0;
        self.timers
            .schedule_every(Timer::GatherTick, self.config.frame_interval);
        log::debug!("[playback] gathering for step {}", self.state.step);
        out_events.push(PlaybackEvent::GatherStarted {
            step: self.state.step,
        });
    }

    fn advance_gathering(&mut self, out_events: &mut Vec<PlaybackEvent>) {
        if self.state.phase != Phase::Gathering {
            self.timers.cancel_kind(Timer::GatherTick);
            return;
        }
        let next = self.state.gather_progress
            + self.config.gather_increment * self.state.speed_multiplier;
        if next < 1.0 - PROGRESS_EPSILON {
            self.state.gather_progress = next;
            return;
        }
        self.timers.cancel_kind(Timer::GatherTick);
        self.state.gather_progress = 0.0;
        self.state.phase = Phase::Growing;
        self.state.grow_progress = 0.0;
        self.timers
            .schedule_every(Timer::GrowTick, self.config.frame_interval);
        log::debug!("[playback] growing for step {}", self.state.step);
        out_events.push(PlaybackEvent::GrowStarted {
            step: self.state.step,
        });
    }

    fn advance_growing(&mut self, out_events: &mut Vec<PlaybackEvent>) {
        if self.state.phase != Phase::Growing {
            self.timers.cancel_kind(Timer::GrowTick);
            return;
        }
        let next =
            self.state.grow_progress + self.config.grow_increment * self.state.speed_multiplier;
        if next < 1.0 - PROGRESS_EPSILON {
            self.state.grow_progress = next;
            return;
        }
        self.timers.cancel_kind(Timer::GrowTick);
        self.state.grow_progress = 1.0;
        self.state.phase = Phase::Idle;
        self.state.step += 1;
        out_events.push(PlaybackEvent::StepAdvanced {
            step: self.state.step,
        });

        if self.state.step >= self.total_steps {
            if self.state.is_playing {
                self.state.is_playing = false;
                log::info!("[playback] finished after {} steps", self.total_steps);
                out_events.push(PlaybackEvent::Finished);
            }
        } else {
            self.arm_auto_play();
        }
    }
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
