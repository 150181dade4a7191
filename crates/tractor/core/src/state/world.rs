use super::common::{EntityId, TilePos};

/// Kinds of breakable resource nodes.
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
pub enum NodeKind {
    Copper,
    Iron,
    Gold,
    Iridium,
    Gem,
    /// Large boulder that needs an upgraded pickaxe.
    Boulder,
}

impl NodeKind {
    /// Minimum pickaxe upgrade level that can break this node.
    pub const fn required_upgrade(self) -> u8 {
        match self {
            Self::Boulder => 2,
            _ => 0,
        }
    }
}

/// Object placed on a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileObject {
    Twig,
    Stone,
    Weeds,
    ResourceNode(NodeKind),
    ArtifactSpot,
    Forage,
    /// Breakable barrel/crate found in mines.
    MineContainer,
    Machine {
        output_ready: bool,
    },
    /// Any other placed object (chest, fence, sprinkler, ...). Never broken.
    Placed,
}

impl TileObject {
    pub fn is_debris(&self) -> bool {
        matches!(self, Self::Twig | Self::Stone | Self::Weeds)
    }
}

/// Broad crop categories with distinct harvest toggles.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CropKind {
    #[default]
    Regular,
    Flower,
}

/// A crop planted in tilled soil.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crop {
    pub kind: CropKind,
    /// Growth phase; 0 is a freshly planted seed.
    pub growth_stage: u8,
    pub ready: bool,
    pub dead: bool,
}

impl Crop {
    pub fn seed() -> Self {
        Self::default()
    }

    pub fn ripe(kind: CropKind) -> Self {
        Self {
            kind,
            growth_stage: 5,
            ready: true,
            dead: false,
        }
    }

    pub fn withered() -> Self {
        Self {
            kind: CropKind::Regular,
            growth_stage: 3,
            ready: false,
            dead: true,
        }
    }

    /// A crop that is neither dead nor harvestable yet.
    pub fn is_growing(&self) -> bool {
        !self.dead && !self.ready
    }
}

/// Tilled soil.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Soil {
    pub crop: Option<Crop>,
    pub fertilizer: Option<u32>,
    pub watered: bool,
}

impl Soil {
    pub fn with_crop(crop: Crop) -> Self {
        Self {
            crop: Some(crop),
            ..Self::default()
        }
    }
}

/// Wild tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree {
    pub growth_stage: u8,
    pub tapped: bool,
    pub stump: bool,
}

/// Fruit tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FruitTree {
    pub fruit: u8,
}

/// Terrain feature occupying a tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainFeature {
    Soil(Soil),
    Tree(Tree),
    FruitTree(FruitTree),
    Grass,
    Flooring,
    GiantCrop,
}

impl TerrainFeature {
    pub fn soil(&self) -> Option<&Soil> {
        match self {
            Self::Soil(soil) => Some(soil),
            _ => None,
        }
    }
}

/// Produce an animal can yield with a tool.
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
pub enum AnimalProduce {
    Milk,
    Wool,
}

/// Farm animal present in a location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FarmAnimal {
    pub id: EntityId,
    pub tile: TilePos,
    pub produce: Option<AnimalProduce>,
    pub produce_ready: bool,
}

/// Hostile creature present in a location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monster {
    pub id: EntityId,
    pub tile: TilePos,
    pub health: i32,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}
