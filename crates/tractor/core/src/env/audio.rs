/// The four engine sounds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EngineCue {
    /// One-shot intro that continues into `Idle`.
    Start,
    Idle,
    Rev,
    Stop,
}

/// Opaque handle to a cue instance started on an [`AudioSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CueHandle(pub u64);

/// Audio playback surface.
pub trait AudioSink {
    /// Starts a new instance of the cue.
    fn play(&mut self, cue: EngineCue) -> CueHandle;

    /// Stops and disposes the cue instance.
    fn stop(&mut self, handle: CueHandle);

    /// Returns true while the cue instance is audible.
    fn is_playing(&self, handle: CueHandle) -> bool;

    /// Returns true once the cue instance has finished or was stopped.
    fn is_stopped(&self, handle: CueHandle) -> bool {
        !self.is_playing(handle)
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, cue: EngineCue) -> CueHandle {
        (**self).play(cue)
    }

    fn stop(&mut self, handle: CueHandle) {
        (**self).stop(handle);
    }

    fn is_playing(&self, handle: CueHandle) -> bool {
        (**self).is_playing(handle)
    }

    fn is_stopped(&self, handle: CueHandle) -> bool {
        (**self).is_stopped(handle)
    }
}
