use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::HoeConfig;
use crate::state::{TileObject, ToolKind};

/// Tills empty dirt, digs artifact spots and clears weeds with the hoe.
#[derive(Clone, Debug)]
pub struct HoeAttachment {
    config: HoeConfig,
}

impl HoeAttachment {
    pub fn new(config: HoeConfig) -> Self {
        Self { config }
    }
}

impl Attachment for HoeAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Hoe.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.config.enabled && cx.actor.holds_tool(ToolKind::Hoe)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        match &target.object {
            Some(TileObject::Weeds) if self.config.clear_weeds => {
                return cx.use_tool_on(target.tile);
            }
            Some(TileObject::ArtifactSpot) if self.config.dig_artifact_spots => {
                return cx.use_tool_on(target.tile);
            }
            Some(_) => return Ok(false),
            None => {}
        }

        // Anything already on the ground (soil included) is left alone.
        if target.feature.is_some() || !self.config.till_dirt {
            return Ok(false);
        }
        if !cx.world().is_diggable(cx.location(), target.tile) {
            return Ok(false);
        }
        cx.use_tool_on(target.tile)
    }
}
