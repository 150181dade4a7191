//! Traits describing the host the tractor runs inside.
//!
//! The engine never reaches into host internals. Everything it needs (tile
//! contents, tool invocation, audio playback) is exposed through the traits
//! here and implemented by a host-specific adapter.
mod audio;
mod error;
mod world;

pub use audio::{AudioSink, CueHandle, EngineCue};
pub use error::InvocationError;
pub use world::{WorldHost, WorldOracle};
