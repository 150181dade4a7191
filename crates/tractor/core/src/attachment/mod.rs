//! Attachments: the tool-like behaviors the tractor applies to tiles.
//!
//! Each attachment decides once per dispatch whether it participates
//! ([`Attachment::is_enabled`]) and then gets a chance at every tile in the
//! grid ([`Attachment::apply`]). The first attachment, in declared order, that
//! reports it handled a tile claims that tile for the rest of the dispatch.
pub mod kinds;
mod set;

pub use kinds::{
    AnimalToolAttachment, AxeAttachment, FertilizerAttachment, HoeAttachment,
    MachineOutputAttachment, MeleeWeaponAttachment, PickaxeAttachment, ScytheAttachment,
    SeedsAttachment, WateringCanAttachment, standard_attachments,
};
pub use set::AttachmentSet;

use crate::cooldown::CooldownTracker;
use crate::env::{InvocationError, WorldHost};
use crate::error::{ErrorSeverity, TractorError};
use crate::state::{
    Actor, Direction, EntityId, ItemStack, LocationId, SimTime, Soil, TerrainFeature, TileObject,
    TilePos, Tool,
};

/// Standard attachment kinds and their default position in the dispatch order.
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
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttachmentKind {
    Axe,
    Fertilizer,
    Hoe,
    MeleeWeapon,
    MilkPail,
    Pickaxe,
    MachineOutput,
    Scythe,
    Seeds,
    Shears,
    WateringCan,
}

impl AttachmentKind {
    /// Position used when the configuration does not declare one.
    pub const fn default_order(self) -> i32 {
        match self {
            Self::Axe => 10,
            Self::Fertilizer => 20,
            Self::Hoe => 30,
            Self::MeleeWeapon => 40,
            Self::MilkPail => 50,
            Self::Pickaxe => 60,
            Self::MachineOutput => 65,
            Self::Scythe => 70,
            Self::Seeds => 80,
            Self::Shears => 90,
            Self::WateringCan => 100,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Errors an attachment can raise while acting on a tile.
///
/// Declining a tile is not an error; return `Ok(false)` instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttachmentError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("{attachment} reached an inconsistent state: {reason}")]
    Internal {
        attachment: &'static str,
        reason: String,
    },
}

impl TractorError for AttachmentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invocation(err) => err.severity(),
            Self::Internal { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invocation(err) => err.error_code(),
            Self::Internal { .. } => "ATTACHMENT_INTERNAL",
        }
    }
}

/// A tool-like behavior the tractor can apply to tiles.
pub trait Attachment {
    /// Stable name used in logs and ordering reports.
    fn name(&self) -> &'static str;

    /// Minimum update ticks between two dispatches this attachment takes
    /// part in.
    ///
    /// Checked when the enabled subset is chosen; once chosen, the attachment
    /// is tried on every tile of that dispatch.
    fn rate_limit(&self) -> u32 {
        0
    }

    /// Whether the attachment participates in this dispatch.
    ///
    /// Evaluated once per dispatch, before any tile is visited. Must not have
    /// side effects.
    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool;

    /// Attempts to act on one tile.
    ///
    /// Returns `Ok(true)` if the tile was handled (no later attachment is
    /// tried on it this dispatch) and `Ok(false)` if the attachment declined.
    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError>;

    /// Called when the vehicle becomes active in a location.
    fn on_activated(&mut self, location: LocationId) {
        let _ = location;
        if let Some(cooldowns) = self.cooldowns_mut() {
            cooldowns.clear();
        }
    }

    /// Keyed cooldowns owned by this attachment, if it has any.
    fn cooldowns_mut(&mut self) -> Option<&mut CooldownTracker> {
        None
    }
}

/// Inputs available when deciding whether an attachment is enabled.
#[derive(Clone, Copy, Debug)]
pub struct EnableContext<'a> {
    pub actor: &'a Actor,
    pub location: LocationId,
}

impl<'a> EnableContext<'a> {
    pub fn new(actor: &'a Actor, location: LocationId) -> Self {
        Self { actor, location }
    }

    /// Tool in the actor's selected slot.
    pub fn tool(&self) -> Option<&'a Tool> {
        self.actor.tool()
    }

    /// Non-tool item in the actor's selected slot.
    pub fn item(&self) -> Option<&'a ItemStack> {
        self.actor.item()
    }
}

/// A tile and whatever occupied it when the dispatch looked it up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileTarget {
    pub tile: TilePos,
    pub object: Option<TileObject>,
    pub feature: Option<TerrainFeature>,
}

impl TileTarget {
    pub fn new(tile: TilePos) -> Self {
        Self {
            tile,
            object: None,
            feature: None,
        }
    }

    /// Tilled soil on this tile, if any.
    pub fn soil(&self) -> Option<&Soil> {
        self.feature.as_ref().and_then(TerrainFeature::soil)
    }

    /// Returns true if nothing at all occupies the tile.
    pub fn is_empty(&self) -> bool {
        self.object.is_none() && self.feature.is_none()
    }
}

/// Everything an attachment may touch while applying itself to a tile.
///
/// The actor borrowed here is the dispatch's impersonated actor: tool effects
/// may move it, drain its stamina or empty its tool, and all of that is undone
/// when the dispatch finishes.
pub struct ApplyContext<'a> {
    actor: &'a mut Actor,
    world: &'a mut dyn WorldHost,
    location: LocationId,
    now: SimTime,
}

impl<'a> ApplyContext<'a> {
    pub fn new(
        actor: &'a mut Actor,
        world: &'a mut dyn WorldHost,
        location: LocationId,
        now: SimTime,
    ) -> Self {
        Self {
            actor,
            world,
            location,
            now,
        }
    }

    pub fn actor(&self) -> &Actor {
        &*self.actor
    }

    pub fn world(&self) -> &dyn WorldHost {
        &*self.world
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn tool(&self) -> Option<&Tool> {
        self.actor.tool()
    }

    pub fn item(&self) -> Option<&ItemStack> {
        self.actor.item()
    }

    /// Puts the actor where a human player would stand to act on `tile`.
    fn stand_at(&mut self, tile: TilePos) {
        self.actor.facing = Direction::toward(self.actor.tile(), tile);
        self.actor.position = tile.to_pixel();
    }

    /// Swings the held tool at `tile`.
    pub fn use_tool_on(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        self.world.use_tool(self.location, tile, self.actor)?;
        Ok(true)
    }

    pub fn harvest_crop(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self.world.harvest_crop(self.location, tile, self.actor)?)
    }

    pub fn collect_forage(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self.world.collect_forage(self.location, tile, self.actor)?)
    }

    pub fn collect_fruit(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self.world.collect_fruit(self.location, tile, self.actor)?)
    }

    pub fn place_item(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self.world.place_item(self.location, tile, self.actor)?)
    }

    pub fn collect_machine_output(&mut self, tile: TilePos) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self
            .world
            .collect_machine_output(self.location, tile, self.actor)?)
    }

    /// Attacks the monster standing on `tile`.
    pub fn damage_monster(
        &mut self,
        tile: TilePos,
        monster: EntityId,
    ) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        self.world
            .damage_monster(self.location, monster, self.actor)?;
        Ok(true)
    }

    /// Collects produce from the animal standing on `tile`.
    pub fn collect_animal_produce(
        &mut self,
        tile: TilePos,
        animal: EntityId,
    ) -> Result<bool, AttachmentError> {
        self.stand_at(tile);
        Ok(self
            .world
            .collect_animal_produce(self.location, animal, self.actor)?)
    }
}
