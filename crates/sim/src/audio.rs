//! Audio backend that plays nothing and remembers everything.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tractor_core::{AudioSink, CueHandle, EngineCue, SimTime};

/// Simulation clock shared between the driver and the audio backend.
#[derive(Clone, Debug, Default)]
pub struct SimClock(Rc<Cell<SimTime>>);

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimTime {
        self.0.get()
    }

    pub fn advance(&self, delta: Duration) {
        self.0.set(self.0.get() + delta);
    }
}

/// Shared record of every cue started, with its start time.
pub type CueLog = Rc<RefCell<Vec<(SimTime, EngineCue)>>>;

/// Records cues and finishes one-shot cues once their length has elapsed.
///
/// Start and Stop are one-shots; Idle and Rev loop until stopped.
pub struct RecordingAudio {
    clock: SimClock,
    next: u64,
    playing: HashMap<CueHandle, (EngineCue, SimTime)>,
    log: CueLog,
}

impl RecordingAudio {
    pub const START_LENGTH: Duration = Duration::from_millis(1_200);
    pub const STOP_LENGTH: Duration = Duration::from_millis(900);

    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            next: 0,
            playing: HashMap::new(),
            log: CueLog::default(),
        }
    }

    /// Handle to the cue log, still readable after the sink is boxed away.
    pub fn log(&self) -> CueLog {
        Rc::clone(&self.log)
    }

    fn length(cue: EngineCue) -> Option<Duration> {
        match cue {
            EngineCue::Start => Some(Self::START_LENGTH),
            EngineCue::Stop => Some(Self::STOP_LENGTH),
            EngineCue::Idle | EngineCue::Rev => None,
        }
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: EngineCue) -> CueHandle {
        self.next += 1;
        let handle = CueHandle(self.next);
        let now = self.clock.now();
        self.playing.insert(handle, (cue, now));
        self.log.borrow_mut().push((now, cue));
        handle
    }

    fn stop(&mut self, handle: CueHandle) {
        self.playing.remove(&handle);
    }

    fn is_playing(&self, handle: CueHandle) -> bool {
        self.playing.get(&handle).is_some_and(|(cue, started)| {
            Self::length(*cue).is_none_or(|length| self.clock.now().since(*started) < length)
        })
    }
}
