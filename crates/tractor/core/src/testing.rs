//! Test doubles shared by the unit tests in this crate.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::attachment::{ApplyContext, Attachment, AttachmentError, EnableContext, TileTarget};
use crate::env::{AudioSink, CueHandle, EngineCue, InvocationError, WorldHost, WorldOracle};
use crate::state::{
    Actor, Direction, EntityId, FarmAnimal, HeldItem, LocationId, Monster, PixelPos, Soil,
    TerrainFeature, TileObject, TilePos, Tool, ToolKind,
};

pub const VEHICLE: EntityId = EntityId(100);

/// Actor standing on tile (5, 5), mounted on [`VEHICLE`], holding a hoe.
pub fn mounted_actor() -> Actor {
    let mut actor = Actor::new(EntityId(1), TilePos::new(5, 5).to_pixel())
        .holding(HeldItem::Tool(Tool::new(ToolKind::Hoe)));
    actor.mount = Some(VEHICLE);
    actor.facing = Direction::Left;
    actor
}

/// Recorded mutation on [`SpyWorld`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    UseTool(TilePos),
    HarvestCrop(TilePos),
    CollectForage(TilePos),
    CollectFruit(TilePos),
    PlaceItem(TilePos),
    CollectMachineOutput(TilePos),
    DamageMonster(EntityId),
    CollectAnimalProduce(EntityId),
}

/// In-memory world that records every call made against it.
#[derive(Default)]
pub struct SpyWorld {
    pub objects: HashMap<TilePos, TileObject>,
    pub features: HashMap<TilePos, TerrainFeature>,
    pub diggable: HashSet<TilePos>,
    pub animals: Vec<FarmAnimal>,
    pub monsters: Vec<Monster>,
    pub calls: Vec<Call>,
    pub queries: Cell<usize>,
    pub fail_at: Option<TilePos>,
}

impl SpyWorld {
    pub fn with_object(mut self, tile: TilePos, object: TileObject) -> Self {
        self.objects.insert(tile, object);
        self
    }

    pub fn with_feature(mut self, tile: TilePos, feature: TerrainFeature) -> Self {
        self.features.insert(tile, feature);
        self
    }

    pub fn with_diggable(mut self, tiles: impl IntoIterator<Item = TilePos>) -> Self {
        self.diggable.extend(tiles);
        self
    }

    /// Simulates what real tool use does to the actor.
    fn disturb(actor: &mut Actor) {
        actor.stamina -= 2.0;
        actor.movement_locked = true;
        if let Some(water) = actor.tool_mut().and_then(|tool| tool.resource.as_mut()) {
            *water = water.saturating_sub(1);
        }
    }

    fn check_fault(&self, tile: TilePos) -> Result<(), InvocationError> {
        if self.fail_at == Some(tile) {
            return Err(InvocationError::Host("spy failure".to_owned()));
        }
        Ok(())
    }
}

impl WorldOracle for SpyWorld {
    fn object_at(&self, _location: LocationId, tile: TilePos) -> Option<TileObject> {
        self.queries.set(self.queries.get() + 1);
        self.objects.get(&tile).cloned()
    }

    fn feature_at(&self, _location: LocationId, tile: TilePos) -> Option<TerrainFeature> {
        self.queries.set(self.queries.get() + 1);
        self.features.get(&tile).cloned()
    }

    fn is_diggable(&self, _location: LocationId, tile: TilePos) -> bool {
        self.queries.set(self.queries.get() + 1);
        self.diggable.contains(&tile)
    }

    fn animals(&self, _location: LocationId) -> Vec<FarmAnimal> {
        self.queries.set(self.queries.get() + 1);
        self.animals.clone()
    }

    fn monsters(&self, _location: LocationId) -> Vec<Monster> {
        self.queries.set(self.queries.get() + 1);
        self.monsters.clone()
    }
}

impl WorldHost for SpyWorld {
    fn use_tool(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<(), InvocationError> {
        self.check_fault(tile)?;
        self.calls.push(Call::UseTool(tile));
        Self::disturb(actor);
        if self.objects.remove(&tile).is_none() {
            match actor.tool().map(|tool| tool.kind) {
                Some(ToolKind::Hoe) => {
                    self.features
                        .insert(tile, TerrainFeature::Soil(Soil::default()));
                }
                Some(ToolKind::WateringCan) => {
                    if let Some(TerrainFeature::Soil(soil)) = self.features.get_mut(&tile) {
                        soil.watered = true;
                    }
                }
                _ => {
                    self.features.remove(&tile);
                }
            }
        }
        Ok(())
    }

    fn harvest_crop(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check_fault(tile)?;
        self.calls.push(Call::HarvestCrop(tile));
        Self::disturb(actor);
        match self.features.get_mut(&tile) {
            Some(TerrainFeature::Soil(soil)) => Ok(soil.crop.take().is_some()),
            _ => Ok(false),
        }
    }

    fn collect_forage(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.calls.push(Call::CollectForage(tile));
        Ok(self.objects.remove(&tile).is_some())
    }

    fn collect_fruit(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.calls.push(Call::CollectFruit(tile));
        match self.features.get_mut(&tile) {
            Some(TerrainFeature::FruitTree(tree)) => Ok(std::mem::take(&mut tree.fruit) > 0),
            _ => Ok(false),
        }
    }

    fn place_item(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.calls.push(Call::PlaceItem(tile));
        let item = actor.item_mut().ok_or(InvocationError::NothingSelected)?;
        item.count = item.count.saturating_sub(1);
        Ok(true)
    }

    fn collect_machine_output(
        &mut self,
        _location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.calls.push(Call::CollectMachineOutput(tile));
        Ok(true)
    }

    fn damage_monster(
        &mut self,
        _location: LocationId,
        monster: EntityId,
        actor: &mut Actor,
    ) -> Result<(), InvocationError> {
        self.calls.push(Call::DamageMonster(monster));
        Self::disturb(actor);
        Ok(())
    }

    fn collect_animal_produce(
        &mut self,
        _location: LocationId,
        animal: EntityId,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.calls.push(Call::CollectAnimalProduce(animal));
        Ok(true)
    }
}

pub type ApplyLog = Rc<RefCell<Vec<(&'static str, TilePos)>>>;

/// Configurable attachment that records every `apply` call.
pub struct NamedAttachment {
    name: &'static str,
    enabled: bool,
    rate_limit: u32,
    claims: Option<HashSet<TilePos>>,
    fail_at: Option<TilePos>,
    panic_at: Option<TilePos>,
    pub log: ApplyLog,
}

impl NamedAttachment {
    /// Enabled attachment that claims every tile.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            enabled: true,
            rate_limit: 0,
            claims: None,
            fail_at: None,
            panic_at: None,
            log: ApplyLog::default(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Only claims the given tiles; declines everything else.
    pub fn claiming(mut self, tiles: impl IntoIterator<Item = TilePos>) -> Self {
        self.claims = Some(tiles.into_iter().collect());
        self
    }

    pub fn declining_all(self) -> Self {
        self.claiming([])
    }

    pub fn failing_at(mut self, tile: TilePos) -> Self {
        self.fail_at = Some(tile);
        self
    }

    pub fn panicking_at(mut self, tile: TilePos) -> Self {
        self.panic_at = Some(tile);
        self
    }

    pub fn sharing_log(mut self, log: &ApplyLog) -> Self {
        self.log = Rc::clone(log);
        self
    }
}

impl Attachment for NamedAttachment {
    fn name(&self) -> &'static str {
        self.name
    }

    fn rate_limit(&self) -> u32 {
        self.rate_limit
    }

    fn is_enabled(&self, _cx: &EnableContext<'_>) -> bool {
        self.enabled
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        self.log.borrow_mut().push((self.name, target.tile));
        if self.panic_at == Some(target.tile) {
            panic!("{} exploded at {}", self.name, target.tile);
        }
        if self.fail_at == Some(target.tile) {
            return Err(AttachmentError::Internal {
                attachment: self.name,
                reason: format!("refused {}", target.tile),
            });
        }
        let claims = self
            .claims
            .as_ref()
            .is_none_or(|tiles| tiles.contains(&target.tile));
        if !claims {
            return Ok(false);
        }
        cx.use_tool_on(target.tile)
    }
}

/// Audio sink whose cues play until the test finishes them.
#[derive(Default)]
pub struct ScriptedAudio {
    next: u64,
    pub started: Vec<EngineCue>,
    pub stopped: Vec<CueHandle>,
    playing: HashSet<CueHandle>,
}

impl ScriptedAudio {
    /// Marks a cue instance as having finished on its own.
    pub fn finish(&mut self, handle: CueHandle) {
        self.playing.remove(&handle);
    }

    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }
}

impl AudioSink for ScriptedAudio {
    fn play(&mut self, cue: EngineCue) -> CueHandle {
        self.next += 1;
        let handle = CueHandle(self.next);
        self.started.push(cue);
        self.playing.insert(handle);
        handle
    }

    fn stop(&mut self, handle: CueHandle) {
        self.stopped.push(handle);
        self.playing.remove(&handle);
    }

    fn is_playing(&self, handle: CueHandle) -> bool {
        self.playing.contains(&handle)
    }
}

/// Where the test vehicle is parked: under the actor on tile (5, 5).
pub fn vehicle_home() -> PixelPos {
    TilePos::new(5, 5).to_pixel()
}
