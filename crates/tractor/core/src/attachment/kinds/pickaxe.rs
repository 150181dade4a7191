use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::PickaxeConfig;
use crate::state::{TerrainFeature, TileObject, ToolKind};

/// Breaks stones, ore nodes and boulders, and clears dirt with the pickaxe.
#[derive(Clone, Debug)]
pub struct PickaxeAttachment {
    config: PickaxeConfig,
}

impl PickaxeAttachment {
    pub fn new(config: PickaxeConfig) -> Self {
        Self { config }
    }
}

impl Attachment for PickaxeAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Pickaxe.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.config.enabled && cx.actor.holds_tool(ToolKind::Pickaxe)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        let config = &self.config;

        if let Some(object) = &target.object {
            let allowed = match object {
                TileObject::Stone => config.clear_debris,
                TileObject::ResourceNode(node) => {
                    let upgrade = cx.tool().map_or(0, |tool| tool.upgrade_level);
                    let toggle = if node.required_upgrade() > 0 {
                        config.break_boulders
                    } else {
                        config.break_nodes
                    };
                    toggle && upgrade >= node.required_upgrade()
                }
                _ => false,
            };
            return if allowed {
                cx.use_tool_on(target.tile)
            } else {
                Ok(false)
            };
        }

        let allowed = match &target.feature {
            Some(TerrainFeature::Soil(soil)) => match &soil.crop {
                Some(crop) if crop.dead => config.clear_dead_crops,
                Some(_) => false,
                None => config.clear_dirt,
            },
            Some(TerrainFeature::Flooring) => config.break_flooring,
            _ => false,
        };
        if allowed {
            cx.use_tool_on(target.tile)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Crop, CropKind, HeldItem, NodeKind, SimTime, Soil, TilePos, Tool};
    use crate::testing::{SpyWorld, mounted_actor};

    fn apply_with(
        tool: Tool,
        config: PickaxeConfig,
        target: &TileTarget,
    ) -> Result<bool, AttachmentError> {
        let mut world = SpyWorld::default();
        let mut actor = mounted_actor().holding(HeldItem::Tool(tool));
        let mut cx = ApplyContext::new(&mut actor, &mut world, Default::default(), SimTime::ZERO);
        PickaxeAttachment::new(config).apply(target, &mut cx)
    }

    fn object(object: TileObject) -> TileTarget {
        TileTarget {
            object: Some(object),
            ..TileTarget::new(TilePos::new(4, 4))
        }
    }

    fn feature(feature: TerrainFeature) -> TileTarget {
        TileTarget {
            feature: Some(feature),
            ..TileTarget::new(TilePos::new(4, 4))
        }
    }

    #[test]
    fn boulders_need_an_upgraded_pickaxe() {
        let boulder = object(TileObject::ResourceNode(NodeKind::Boulder));
        let basic = Tool::new(ToolKind::Pickaxe);
        let steel = Tool::new(ToolKind::Pickaxe).with_upgrade_level(2);

        assert_eq!(apply_with(basic, PickaxeConfig::default(), &boulder), Ok(false));
        assert_eq!(apply_with(steel.clone(), PickaxeConfig::default(), &boulder), Ok(true));

        let no_boulders = PickaxeConfig {
            break_boulders: false,
            ..PickaxeConfig::default()
        };
        assert_eq!(apply_with(steel, no_boulders, &boulder), Ok(false));
    }

    #[test]
    fn breaks_stones_and_nodes() {
        let pick = Tool::new(ToolKind::Pickaxe);
        for target in [
            object(TileObject::Stone),
            object(TileObject::ResourceNode(NodeKind::Copper)),
        ] {
            assert_eq!(apply_with(pick.clone(), PickaxeConfig::default(), &target), Ok(true));
        }
        assert_eq!(
            apply_with(pick, PickaxeConfig::default(), &object(TileObject::Twig)),
            Ok(false)
        );
    }

    #[test]
    fn never_breaks_live_crops() {
        let pick = Tool::new(ToolKind::Pickaxe);
        let growing = feature(TerrainFeature::Soil(Soil::with_crop(Crop::ripe(CropKind::Regular))));
        let dead = feature(TerrainFeature::Soil(Soil::with_crop(Crop::withered())));
        let bare = feature(TerrainFeature::Soil(Soil::default()));

        assert_eq!(apply_with(pick.clone(), PickaxeConfig::default(), &growing), Ok(false));
        assert_eq!(apply_with(pick.clone(), PickaxeConfig::default(), &dead), Ok(true));
        assert_eq!(apply_with(pick.clone(), PickaxeConfig::default(), &bare), Ok(true));
        assert_eq!(
            apply_with(pick, PickaxeConfig::default(), &feature(TerrainFeature::Flooring)),
            Ok(false)
        );
    }
}
