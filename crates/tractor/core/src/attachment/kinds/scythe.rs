use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::ScytheConfig;
use crate::state::{CropKind, TerrainFeature, TileObject, ToolKind};

/// Harvests crops, flowers, forage, fruit and grass with the scythe.
#[derive(Clone, Debug)]
pub struct ScytheAttachment {
    config: ScytheConfig,
}

impl ScytheAttachment {
    pub fn new(config: ScytheConfig) -> Self {
        Self { config }
    }
}

impl Attachment for ScytheAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Scythe.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.config.enabled && cx.actor.holds_tool(ToolKind::Scythe)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        let config = &self.config;
        let tile = target.tile;

        match &target.object {
            Some(TileObject::Forage) if config.harvest_forage => return cx.collect_forage(tile),
            Some(TileObject::Weeds) if config.clear_weeds => return cx.use_tool_on(tile),
            Some(_) => return Ok(false),
            None => {}
        }

        match &target.feature {
            Some(TerrainFeature::Soil(soil)) => match &soil.crop {
                Some(crop) if crop.dead && config.clear_dead_crops => cx.use_tool_on(tile),
                Some(crop) if crop.ready && !crop.dead => {
                    let allowed = match crop.kind {
                        CropKind::Flower => config.harvest_flowers,
                        CropKind::Regular => config.harvest_crops,
                    };
                    if allowed { cx.harvest_crop(tile) } else { Ok(false) }
                }
                _ => Ok(false),
            },
            Some(TerrainFeature::FruitTree(tree))
                if tree.fruit > 0 && config.harvest_fruit_trees =>
            {
                cx.collect_fruit(tile)
            }
            Some(TerrainFeature::Grass) if config.harvest_grass => cx.use_tool_on(tile),
            _ => Ok(false),
        }
    }
}
