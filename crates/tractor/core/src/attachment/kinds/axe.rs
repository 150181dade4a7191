use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::AxeConfig;
use crate::state::{TerrainFeature, TileObject, ToolKind};

/// Chops twigs, trees, stumps and crops with the axe.
#[derive(Clone, Debug)]
pub struct AxeAttachment {
    config: AxeConfig,
}

impl AxeAttachment {
    pub fn new(config: AxeConfig) -> Self {
        Self { config }
    }
}

impl Attachment for AxeAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Axe.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.config.enabled && cx.actor.holds_tool(ToolKind::Axe)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        let config = &self.config;

        if let Some(object) = &target.object {
            return match object {
                TileObject::Twig if config.clear_debris => cx.use_tool_on(target.tile),
                _ => Ok(false),
            };
        }

        let allowed = match &target.feature {
            Some(TerrainFeature::Tree(tree)) => {
                if tree.tapped && !config.cut_tapped_trees {
                    false
                } else if tree.stump {
                    config.clear_debris || config.cut_trees
                } else {
                    config.cut_trees
                }
            }
            Some(TerrainFeature::FruitTree(_)) => config.cut_fruit_trees,
            Some(TerrainFeature::GiantCrop) => config.cut_giant_crops,
            Some(TerrainFeature::Soil(soil)) => match &soil.crop {
                Some(crop) if crop.dead => config.clear_dead_crops,
                // Never destroy a live crop unless explicitly asked to.
                Some(_) => config.clear_live_crops,
                None => false,
            },
            _ => false,
        };

        if allowed {
            cx.use_tool_on(target.tile)
        } else {
            Ok(false)
        }
    }
}
