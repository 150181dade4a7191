use super::InvocationError;
use crate::state::{
    Actor, EntityId, FarmAnimal, LocationId, Monster, TerrainFeature, TileObject, TilePos,
};

/// Read-only view of the host world.
pub trait WorldOracle {
    /// Object placed on the tile, if any.
    fn object_at(&self, location: LocationId, tile: TilePos) -> Option<TileObject>;

    /// Terrain feature on the tile, if any.
    fn feature_at(&self, location: LocationId, tile: TilePos) -> Option<TerrainFeature>;

    /// Returns true if the tile's ground can be tilled.
    fn is_diggable(&self, location: LocationId, tile: TilePos) -> bool;

    /// Farm animals currently present in the location.
    fn animals(&self, location: LocationId) -> Vec<FarmAnimal> {
        let _ = location;
        Vec::new()
    }

    /// Monsters currently present in the location.
    fn monsters(&self, location: LocationId) -> Vec<Monster> {
        let _ = location;
        Vec::new()
    }
}

/// Tool invocation surface.
///
/// Every effect acts as `actor`, using whatever the actor currently holds.
/// Implementations may move the actor, drain stamina or tool resources and
/// lock movement the way real tool use would; the dispatch engine restores
/// those fields afterwards.
pub trait WorldHost: WorldOracle {
    /// Swings the held tool at the tile.
    fn use_tool(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<(), InvocationError>;

    /// Harvests the ripe crop on the tile. Returns false if nothing was harvested.
    fn harvest_crop(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;

    /// Picks up forage lying on the tile.
    fn collect_forage(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;

    /// Shakes the fruit tree on the tile.
    fn collect_fruit(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;

    /// Places one of the held items (seed, fertilizer) on the tile.
    fn place_item(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;

    /// Collects the finished output of the machine on the tile.
    fn collect_machine_output(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;

    /// Hits a monster with the held weapon.
    fn damage_monster(
        &mut self,
        location: LocationId,
        monster: EntityId,
        actor: &mut Actor,
    ) -> Result<(), InvocationError>;

    /// Collects an animal's produce with the held tool.
    fn collect_animal_produce(
        &mut self,
        location: LocationId,
        animal: EntityId,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError>;
}
