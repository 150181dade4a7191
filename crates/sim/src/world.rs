//! In-memory farm implementing the host traits.

use std::collections::{BTreeMap, HashMap};

use tractor_core::{
    Actor, AnimalProduce, Crop, CropKind, EntityId, FarmAnimal, InvocationError, ItemCategory,
    LocationId, Monster, NodeKind, Soil, TerrainFeature, TileObject, TilePos, ToolKind, WorldHost,
    WorldOracle,
};

/// Things the farm hands out when the tractor works a tile.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Produce {
    Wood,
    Stone,
    Ore,
    Fiber,
    Hay,
    Crop,
    Flower,
    Forage,
    Fruit,
    Milk,
    Wool,
    Artisan,
    Artifact,
    Loot,
}

/// Stamina a single tool swing costs the actor.
const SWING_STAMINA: f32 = 2.0;
/// Damage dealt by one melee hit.
const MELEE_DAMAGE: i32 = 10;

/// A rectangular farm held entirely in memory.
///
/// Only `location` exists; queries against any other location see an empty
/// world and invocations there are rejected.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    location: LocationId,
    width: i32,
    height: i32,
    objects: HashMap<TilePos, TileObject>,
    features: HashMap<TilePos, TerrainFeature>,
    animals: Vec<FarmAnimal>,
    monsters: Vec<Monster>,
    inventory: BTreeMap<Produce, u32>,
    tool_uses: u32,
    /// Set while the farm refuses every effect.
    offline: Option<String>,
}

impl MemoryWorld {
    pub fn new(location: LocationId, width: u32, height: u32) -> Self {
        Self {
            location,
            width: width as i32,
            height: height as i32,
            objects: HashMap::new(),
            features: HashMap::new(),
            animals: Vec::new(),
            monsters: Vec::new(),
            inventory: BTreeMap::new(),
            tool_uses: 0,
            offline: None,
        }
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn contains(&self, tile: TilePos) -> bool {
        (0..self.width).contains(&tile.x) && (0..self.height).contains(&tile.y)
    }

    pub fn place_object(&mut self, tile: TilePos, object: TileObject) {
        self.objects.insert(tile, object);
    }

    pub fn place_feature(&mut self, tile: TilePos, feature: TerrainFeature) {
        self.features.insert(tile, feature);
    }

    pub fn add_animal(&mut self, animal: FarmAnimal) {
        self.animals.push(animal);
    }

    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.push(monster);
    }

    pub fn object(&self, tile: TilePos) -> Option<&TileObject> {
        self.objects.get(&tile)
    }

    pub fn feature(&self, tile: TilePos) -> Option<&TerrainFeature> {
        self.features.get(&tile)
    }

    pub fn monsters_alive(&self) -> usize {
        self.monsters.iter().filter(|monster| monster.is_alive()).count()
    }

    /// Amount of `produce` collected so far.
    pub fn collected(&self, produce: Produce) -> u32 {
        self.inventory.get(&produce).copied().unwrap_or(0)
    }

    pub fn inventory(&self) -> &BTreeMap<Produce, u32> {
        &self.inventory
    }

    /// Number of successful tool swings.
    pub fn tool_uses(&self) -> u32 {
        self.tool_uses
    }

    /// Counts tiles whose feature matches `predicate`.
    pub fn count_features(&self, predicate: impl Fn(&TerrainFeature) -> bool) -> usize {
        self.features.values().filter(|feature| predicate(feature)).count()
    }

    fn gain(&mut self, produce: Produce, amount: u32) {
        *self.inventory.entry(produce).or_default() += amount;
    }

    /// Makes every host effect fail with `reason` until [`restore`](Self::restore).
    pub fn take_offline(&mut self, reason: impl Into<String>) {
        self.offline = Some(reason.into());
    }

    pub fn restore(&mut self) {
        self.offline = None;
    }

    fn online(&self) -> Result<(), InvocationError> {
        match &self.offline {
            Some(reason) => Err(InvocationError::Host(reason.clone())),
            None => Ok(()),
        }
    }

    fn check(&self, location: LocationId, tile: TilePos) -> Result<(), InvocationError> {
        self.online()?;
        if location != self.location || !self.contains(tile) {
            return Err(InvocationError::Rejected {
                tile,
                reason: format!("outside {}", self.location),
            });
        }
        Ok(())
    }

    fn soil_mut(&mut self, tile: TilePos) -> Option<&mut Soil> {
        match self.features.get_mut(&tile) {
            Some(TerrainFeature::Soil(soil)) => Some(soil),
            _ => None,
        }
    }

    /// Clears a dead (or, for breaking tools, any) crop from soil.
    fn clear_crop(&mut self, tile: TilePos) -> bool {
        self.soil_mut(tile)
            .and_then(|soil| soil.crop.take())
            .is_some()
    }

    fn swing(&mut self, kind: ToolKind, tile: TilePos) -> Result<(), InvocationError> {
        let rejected = |reason: &str| InvocationError::Rejected {
            tile,
            reason: format!("{kind} {reason}"),
        };

        if let Some(object) = self.objects.get(&tile).cloned() {
            let produce = match (kind, object) {
                (ToolKind::Axe, TileObject::Twig) => Produce::Wood,
                (ToolKind::Pickaxe, TileObject::Stone) => Produce::Stone,
                (ToolKind::Pickaxe, TileObject::ResourceNode(NodeKind::Boulder)) => Produce::Stone,
                (ToolKind::Pickaxe, TileObject::ResourceNode(_)) => Produce::Ore,
                (ToolKind::Hoe | ToolKind::Scythe, TileObject::Weeds) => Produce::Fiber,
                (ToolKind::Hoe, TileObject::ArtifactSpot) => Produce::Artifact,
                (ToolKind::MeleeWeapon, TileObject::MineContainer) => Produce::Loot,
                _ => return Err(rejected("cannot break this object")),
            };
            self.objects.remove(&tile);
            self.gain(produce, 1);
            return Ok(());
        }

        match (kind, self.features.get(&tile).cloned()) {
            (ToolKind::Hoe, None) => {
                self.features.insert(tile, TerrainFeature::Soil(Soil::default()));
            }
            (ToolKind::WateringCan, Some(TerrainFeature::Soil(_))) => {
                if let Some(soil) = self.soil_mut(tile) {
                    soil.watered = true;
                }
            }
            (ToolKind::Axe, Some(TerrainFeature::Tree(tree))) => {
                self.features.remove(&tile);
                self.gain(Produce::Wood, if tree.stump { 2 } else { 8 });
            }
            (ToolKind::Axe, Some(TerrainFeature::FruitTree(_) | TerrainFeature::GiantCrop)) => {
                self.features.remove(&tile);
                self.gain(Produce::Wood, 4);
            }
            (ToolKind::Scythe, Some(TerrainFeature::Grass)) => {
                self.features.remove(&tile);
                self.gain(Produce::Hay, 1);
            }
            (ToolKind::Pickaxe, Some(TerrainFeature::Flooring)) => {
                self.features.remove(&tile);
            }
            (ToolKind::Pickaxe, Some(TerrainFeature::Soil(soil))) if soil.crop.is_none() => {
                self.features.remove(&tile);
            }
            (
                ToolKind::Axe | ToolKind::Pickaxe | ToolKind::Scythe | ToolKind::MeleeWeapon,
                Some(TerrainFeature::Soil(_)),
            ) => {
                if !self.clear_crop(tile) {
                    return Err(rejected("found nothing to clear"));
                }
            }
            _ => return Err(rejected("has no effect here")),
        }
        Ok(())
    }
}

impl WorldOracle for MemoryWorld {
    fn object_at(&self, location: LocationId, tile: TilePos) -> Option<TileObject> {
        if location != self.location {
            return None;
        }
        self.objects.get(&tile).cloned()
    }

    fn feature_at(&self, location: LocationId, tile: TilePos) -> Option<TerrainFeature> {
        if location != self.location {
            return None;
        }
        self.features.get(&tile).cloned()
    }

    fn is_diggable(&self, location: LocationId, tile: TilePos) -> bool {
        location == self.location
            && self.contains(tile)
            && !self.objects.contains_key(&tile)
            && !self.features.contains_key(&tile)
    }

    fn animals(&self, location: LocationId) -> Vec<FarmAnimal> {
        if location != self.location {
            return Vec::new();
        }
        self.animals.clone()
    }

    fn monsters(&self, location: LocationId) -> Vec<Monster> {
        if location != self.location {
            return Vec::new();
        }
        self.monsters.clone()
    }
}

impl WorldHost for MemoryWorld {
    fn use_tool(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<(), InvocationError> {
        self.check(location, tile)?;
        let tool = actor.tool_mut().ok_or(InvocationError::NothingSelected)?;
        let kind = tool.kind;
        if kind == ToolKind::WateringCan {
            match tool.resource.as_mut() {
                Some(water) if *water > 0 => *water -= 1,
                _ => {
                    return Err(InvocationError::Rejected {
                        tile,
                        reason: "watering can is empty".to_owned(),
                    });
                }
            }
        }

        actor.stamina -= SWING_STAMINA;
        actor.movement_locked = true;
        self.swing(kind, tile)?;
        self.tool_uses += 1;
        Ok(())
    }

    fn harvest_crop(
        &mut self,
        location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check(location, tile)?;
        let Some(soil) = self.soil_mut(tile) else {
            return Ok(false);
        };
        match soil.crop.take_if(|crop| crop.ready && !crop.dead) {
            Some(crop) => {
                let produce = match crop.kind {
                    CropKind::Regular => Produce::Crop,
                    CropKind::Flower => Produce::Flower,
                };
                self.gain(produce, 1);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn collect_forage(
        &mut self,
        location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check(location, tile)?;
        if self.objects.get(&tile) != Some(&TileObject::Forage) {
            return Ok(false);
        }
        self.objects.remove(&tile);
        self.gain(Produce::Forage, 1);
        Ok(true)
    }

    fn collect_fruit(
        &mut self,
        location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check(location, tile)?;
        let fruit = match self.features.get_mut(&tile) {
            Some(TerrainFeature::FruitTree(tree)) => std::mem::take(&mut tree.fruit),
            _ => 0,
        };
        if fruit == 0 {
            return Ok(false);
        }
        self.gain(Produce::Fruit, u32::from(fruit));
        Ok(true)
    }

    fn place_item(
        &mut self,
        location: LocationId,
        tile: TilePos,
        actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check(location, tile)?;
        let item = actor.item_mut().ok_or(InvocationError::NothingSelected)?;
        if item.is_empty() {
            return Err(InvocationError::NothingSelected);
        }
        let (category, item_id) = (item.category, item.item_id);

        let Some(soil) = self.soil_mut(tile) else {
            return Ok(false);
        };
        let placed = match category {
            ItemCategory::Seeds if soil.crop.is_none() => {
                soil.crop = Some(Crop::seed());
                true
            }
            ItemCategory::Fertilizer if soil.fertilizer.is_none() => {
                soil.fertilizer = Some(item_id);
                true
            }
            _ => false,
        };
        if placed {
            if let Some(item) = actor.item_mut() {
                item.count -= 1;
            }
        }
        Ok(placed)
    }

    fn collect_machine_output(
        &mut self,
        location: LocationId,
        tile: TilePos,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.check(location, tile)?;
        match self.objects.get_mut(&tile) {
            Some(TileObject::Machine { output_ready }) if *output_ready => {
                *output_ready = false;
                self.gain(Produce::Artisan, 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn damage_monster(
        &mut self,
        location: LocationId,
        monster: EntityId,
        actor: &mut Actor,
    ) -> Result<(), InvocationError> {
        self.online()?;
        if location != self.location {
            return Err(InvocationError::TargetMissing(monster));
        }
        let target = self
            .monsters
            .iter_mut()
            .find(|candidate| candidate.id == monster && candidate.is_alive())
            .ok_or(InvocationError::TargetMissing(monster))?;
        target.health -= MELEE_DAMAGE;
        let slain = !target.is_alive();
        actor.stamina -= SWING_STAMINA;
        actor.movement_locked = true;
        if slain {
            tracing::debug!(%monster, "monster slain");
            self.gain(Produce::Loot, 1);
        }
        Ok(())
    }

    fn collect_animal_produce(
        &mut self,
        location: LocationId,
        animal: EntityId,
        _actor: &mut Actor,
    ) -> Result<bool, InvocationError> {
        self.online()?;
        if location != self.location {
            return Err(InvocationError::TargetMissing(animal));
        }
        let target = self
            .animals
            .iter_mut()
            .find(|candidate| candidate.id == animal)
            .ok_or(InvocationError::TargetMissing(animal))?;
        if !target.produce_ready {
            return Ok(false);
        }
        let produce = match target.produce {
            Some(AnimalProduce::Milk) => Produce::Milk,
            Some(AnimalProduce::Wool) => Produce::Wool,
            None => return Ok(false),
        };
        target.produce_ready = false;
        self.gain(produce, 1);
        Ok(true)
    }
}
