//! Headless farm simulation for exercising the tractor end to end.
//!
//! Builds an in-memory farm, seats a farmer on a tractor carrying the
//! standard attachments and drives it along a serpentine route, switching
//! tools lane by lane.
pub mod audio;
pub mod config;
pub mod logging;
pub mod scenario;
pub mod simulation;
pub mod world;

pub use audio::{CueLog, RecordingAudio, SimClock};
pub use config::SimConfig;
pub use scenario::Scenario;
pub use simulation::{SimReport, Simulation};
pub use world::{MemoryWorld, Produce};
