//! Generated farm layout, driving route and tool rotation.

use tractor_core::{
    AnimalProduce, Crop, CropKind, EntityId, FarmAnimal, FruitTree, HeldItem, ItemCategory,
    ItemStack, LocationId, Monster, NodeKind, Soil, TerrainFeature, TileObject, TilePos, Tool,
    ToolKind, Tree,
};

use crate::world::MemoryWorld;

pub const SEED_ITEM: u32 = 472;
pub const FERTILIZER_ITEM: u32 = 368;

/// Builders for the headless demo farm.
pub struct Scenario;

impl Scenario {
    /// Square farm of `size` tiles with a deterministic mix of everything the
    /// standard attachments can work on.
    pub fn farm(location: LocationId, size: u32) -> MemoryWorld {
        let mut world = MemoryWorld::new(location, size, size);
        let edge = size as i32;

        for y in 0..edge {
            for x in 0..edge {
                let tile = TilePos::new(x, y);
                match (x * 31 + y * 17 + x * y) % 12 {
                    0 => world.place_object(tile, TileObject::Weeds),
                    1 => world.place_object(tile, TileObject::Stone),
                    2 => world.place_object(tile, TileObject::Twig),
                    3 => world.place_feature(
                        tile,
                        TerrainFeature::Soil(Soil::with_crop(Crop::ripe(CropKind::Regular))),
                    ),
                    4 => world.place_feature(
                        tile,
                        TerrainFeature::Soil(Soil::with_crop(Crop::ripe(CropKind::Flower))),
                    ),
                    5 => world.place_feature(tile, TerrainFeature::Soil(Soil::default())),
                    6 => world.place_feature(tile, TerrainFeature::Grass),
                    7 => world.place_object(tile, TileObject::Forage),
                    8 => world.place_feature(
                        tile,
                        TerrainFeature::Soil(Soil::with_crop(Crop::withered())),
                    ),
                    9 => world.place_feature(
                        tile,
                        TerrainFeature::Tree(Tree {
                            growth_stage: 5,
                            tapped: false,
                            stump: true,
                        }),
                    ),
                    10 => world.place_object(tile, TileObject::ResourceNode(NodeKind::Copper)),
                    _ => {}
                }
            }
        }

        let far = edge - 2;
        world.place_object(TilePos::new(1, 1), TileObject::Machine { output_ready: true });
        world.place_feature(
            TilePos::new(2, far),
            TerrainFeature::FruitTree(FruitTree { fruit: 3 }),
        );
        world.add_animal(FarmAnimal {
            id: EntityId(500),
            tile: TilePos::new(far, far),
            produce: Some(AnimalProduce::Milk),
            produce_ready: true,
        });
        world.add_animal(FarmAnimal {
            id: EntityId(501),
            tile: TilePos::new(far - 1, far),
            produce: Some(AnimalProduce::Wool),
            produce_ready: true,
        });
        world.add_monster(Monster {
            id: EntityId(900),
            tile: TilePos::new(edge / 2, edge / 2),
            health: 25,
        });
        world
    }

    /// Serpentine route covering a `size`-wide farm in lanes `2 * radius + 1`
    /// tiles apart.
    pub fn route(size: u32, radius: u32) -> Vec<TilePos> {
        let edge = size as i32;
        let spacing = (2 * radius + 1) as i32;
        let mut route = Vec::new();

        for (lane, y) in (radius as i32..edge).step_by(spacing as usize).enumerate() {
            let row = (0..edge).map(|x| TilePos::new(x, y));
            if lane % 2 == 0 {
                route.extend(row);
            } else {
                route.extend(row.rev());
            }
        }
        route
    }

    /// What the driver holds, one entry per lane, cycling.
    pub fn loadouts() -> Vec<HeldItem> {
        vec![
            HeldItem::Tool(Tool::new(ToolKind::Scythe)),
            HeldItem::Tool(Tool::new(ToolKind::Axe)),
            HeldItem::Tool(Tool::new(ToolKind::Pickaxe)),
            HeldItem::Tool(Tool::new(ToolKind::Hoe)),
            HeldItem::Item(ItemStack::new(FERTILIZER_ITEM, ItemCategory::Fertilizer, 30)),
            HeldItem::Item(ItemStack::new(SEED_ITEM, ItemCategory::Seeds, 30)),
            HeldItem::Tool(Tool::watering_can(40)),
            HeldItem::Tool(Tool::new(ToolKind::MeleeWeapon)),
            HeldItem::Tool(Tool::new(ToolKind::MilkPail)),
            HeldItem::Tool(Tool::new(ToolKind::Shears)),
        ]
    }
}
