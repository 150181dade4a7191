//! Plain data describing the actor and the world the tractor works on.
//!
//! These types are owned by the host; the engine only borrows them for the
//! duration of an update call.
pub mod actor;
pub mod common;
pub mod world;

pub use actor::{Actor, HeldItem, ItemCategory, ItemStack, Tool, ToolKind};
pub use common::{Direction, EntityId, LocationId, PixelPos, SimTime, TILE_SIZE, TilePos};
pub use world::{
    AnimalProduce, Crop, CropKind, FarmAnimal, FruitTree, Monster, NodeKind, Soil,
    TerrainFeature, TileObject, Tree,
};
