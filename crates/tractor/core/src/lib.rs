//! Attachment dispatch engine for a drivable farm tractor.
//!
//! `tractor-core` decides, once per action interval, which attachments act on
//! which tiles around the tractor, and drives the host through the traits in
//! [`env`] while temporarily impersonating the rider. All per-frame work goes
//! through [`Vehicle::update`]; the host owns the world, the actor and the
//! audio backend and lends them to the engine for the length of a call.
pub mod attachment;
pub mod audio;
pub mod config;
pub mod cooldown;
pub mod engine;
pub mod env;
pub mod error;
pub mod grid;
pub mod state;
pub mod vehicle;

#[cfg(test)]
mod testing;

pub use attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, AttachmentSet, EnableContext,
    TileTarget, standard_attachments,
};
pub use audio::{EngineAudio, EngineState};
pub use config::{
    AnimalToolConfig, AxeConfig, ConfigError, HoeConfig, MeleeWeaponConfig, PickaxeConfig,
    ScytheConfig, StandardAttachmentsConfig, ToggleConfig, TractorConfig,
};
pub use cooldown::CooldownTracker;
pub use engine::{
    ActorStateSnapshot, DispatchError, DispatchFrame, DispatchGuard, DispatchLoop, DispatchReport,
};
pub use env::{AudioSink, CueHandle, EngineCue, InvocationError, WorldHost, WorldOracle};
pub use error::{ErrorSeverity, TractorError};
pub use grid::{TileGrid, tile_grid};
pub use state::{
    Actor, AnimalProduce, Crop, CropKind, Direction, EntityId, FarmAnimal, FruitTree, HeldItem,
    ItemCategory, ItemStack, LocationId, Monster, NodeKind, PixelPos, SimTime, Soil,
    TerrainFeature, TileObject, TilePos, Tool, ToolKind, Tree, TILE_SIZE,
};
pub use vehicle::{Frame, RiderEffects, UpdateOutcome, Vehicle};
