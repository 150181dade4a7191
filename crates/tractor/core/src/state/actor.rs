use super::common::{Direction, EntityId, PixelPos, TilePos};

/// Tool categories the tractor knows how to drive.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ToolKind {
    Axe,
    Hoe,
    Pickaxe,
    Scythe,
    WateringCan,
    MeleeWeapon,
    MilkPail,
    Shears,
}

/// A tool held by the actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tool {
    pub kind: ToolKind,
    /// Upgrade tier (0 = basic, 4 = iridium).
    pub upgrade_level: u8,
    /// Consumable level carried by the tool, e.g. water left in a watering can.
    pub resource: Option<u32>,
}

impl Tool {
    pub const fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            upgrade_level: 0,
            resource: None,
        }
    }

    pub const fn watering_can(water_left: u32) -> Self {
        Self {
            kind: ToolKind::WateringCan,
            upgrade_level: 0,
            resource: Some(water_left),
        }
    }

    #[must_use]
    pub const fn with_upgrade_level(mut self, upgrade_level: u8) -> Self {
        self.upgrade_level = upgrade_level;
        self
    }

    pub fn is(&self, kind: ToolKind) -> bool {
        self.kind == kind
    }
}

/// Broad item categories relevant to placement attachments.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    Seeds,
    Fertilizer,
    Other,
}

/// A stack of non-tool items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item_id: u32,
    pub category: ItemCategory,
    pub count: u32,
}

impl ItemStack {
    pub const fn new(item_id: u32, category: ItemCategory, count: u32) -> Self {
        Self {
            item_id,
            category,
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Whatever occupies the actor's selected slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeldItem {
    Tool(Tool),
    Item(ItemStack),
}

/// The controlling actor (the farmer riding the tractor).
///
/// The dispatch engine temporarily drives this state while invoking
/// attachments; everything here except the held item's stack count is put
/// back once the dispatch finishes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub position: PixelPos,
    pub facing: Direction,
    /// Entity the actor is mounted on, if any.
    pub mount: Option<EntityId>,
    pub stamina: f32,
    /// True while the host forbids player-controlled movement.
    pub movement_locked: bool,
    /// True while the actor is moving this frame.
    pub is_moving: bool,
    pub held: Option<HeldItem>,
    pub speed_bonus: i32,
    pub magnetic_radius: u32,
    pub invincible: bool,
}

impl Actor {
    pub fn new(id: EntityId, position: PixelPos) -> Self {
        Self {
            id,
            position,
            facing: Direction::default(),
            mount: None,
            stamina: 270.0,
            movement_locked: false,
            is_moving: false,
            held: None,
            speed_bonus: 0,
            magnetic_radius: 128,
            invincible: false,
        }
    }

    #[must_use]
    pub fn holding(mut self, held: HeldItem) -> Self {
        self.held = Some(held);
        self
    }

    pub fn tile(&self) -> TilePos {
        self.position.to_tile()
    }

    pub fn tool(&self) -> Option<&Tool> {
        match &self.held {
            Some(HeldItem::Tool(tool)) => Some(tool),
            _ => None,
        }
    }

    pub fn tool_mut(&mut self) -> Option<&mut Tool> {
        match &mut self.held {
            Some(HeldItem::Tool(tool)) => Some(tool),
            _ => None,
        }
    }

    pub fn item(&self) -> Option<&ItemStack> {
        match &self.held {
            Some(HeldItem::Item(item)) => Some(item),
            _ => None,
        }
    }

    pub fn item_mut(&mut self) -> Option<&mut ItemStack> {
        match &mut self.held {
            Some(HeldItem::Item(item)) => Some(item),
            _ => None,
        }
    }

    /// Returns true if the actor holds a tool of the given kind.
    pub fn holds_tool(&self, kind: ToolKind) -> bool {
        self.tool().is_some_and(|tool| tool.is(kind))
    }

    /// Returns true if the actor holds a non-empty stack of the given category.
    pub fn holds_item(&self, category: ItemCategory) -> bool {
        self.item()
            .is_some_and(|item| item.category == category && !item.is_empty())
    }
}
