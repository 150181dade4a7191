//! Engine sound state machine.
//!
//! The vehicle feeds the desired [`EngineState`] every frame; [`EngineAudio`]
//! turns that into at most one playing [`EngineCue`] on its [`AudioSink`].

use crate::env::{AudioSink, CueHandle, EngineCue};

/// Logical engine mode requested by the vehicle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EngineState {
    #[default]
    Stop,
    Idle,
    Rev,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ActiveCue {
    cue: EngineCue,
    handle: CueHandle,
}

/// Maps requested engine states onto cues, one cue at a time.
#[derive(Debug)]
pub struct EngineAudio<S> {
    sink: S,
    enabled: bool,
    active: Option<ActiveCue>,
}

impl<S: AudioSink> EngineAudio<S> {
    pub fn new(sink: S, enabled: bool) -> Self {
        Self {
            sink,
            enabled,
            active: None,
        }
    }

    /// Cue most recently started, whether or not it is still audible.
    pub fn active_cue(&self) -> Option<EngineCue> {
        self.active.map(|active| active.cue)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Switches sound effects on or off. Turning them off silences the engine
    /// immediately.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            if let Some(active) = self.active.take() {
                self.sink.stop(active.handle);
            }
        }
        self.enabled = enabled;
    }

    /// Feeds the desired engine state for this frame.
    pub fn request(&mut self, state: EngineState) {
        if !self.enabled {
            return;
        }
        match state {
            EngineState::Idle => {
                if self.is_playing(EngineCue::Start) || self.is_playing(EngineCue::Idle) {
                    return;
                }
                // A cold engine coughs to life before idling.
                let cold = matches!(self.active_cue(), None | Some(EngineCue::Stop));
                self.play(if cold { EngineCue::Start } else { EngineCue::Idle });
            }
            EngineState::Rev => {
                if !self.is_playing(EngineCue::Rev) {
                    self.play(EngineCue::Rev);
                }
            }
            EngineState::Stop => match self.active {
                Some(active) if self.sink.is_stopped(active.handle) => self.active = None,
                Some(active) if active.cue == EngineCue::Stop => {}
                Some(_) => self.play(EngineCue::Stop),
                None => {}
            },
        }
    }

    /// Advances playback; a finished start cue rolls over into the idle loop.
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }
        if let Some(active) = self.active {
            if active.cue == EngineCue::Start && self.sink.is_stopped(active.handle) {
                self.play(EngineCue::Idle);
            }
        }
    }

    fn is_playing(&self, cue: EngineCue) -> bool {
        self.active
            .is_some_and(|active| active.cue == cue && self.sink.is_playing(active.handle))
    }

    fn play(&mut self, cue: EngineCue) {
        if let Some(previous) = self.active.take() {
            self.sink.stop(previous.handle);
        }
        let handle = self.sink.play(cue);
        tracing::trace!(%cue, "engine cue started");
        self.active = Some(ActiveCue { cue, handle });
    }
}
