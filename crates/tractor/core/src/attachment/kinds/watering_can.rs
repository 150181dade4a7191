use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::state::ToolKind;

/// Waters dry tilled soil while the can has water left.
#[derive(Clone, Debug)]
pub struct WateringCanAttachment {
    enabled: bool,
}

impl WateringCanAttachment {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Attachment for WateringCanAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::WateringCan.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.enabled && cx.actor.holds_tool(ToolKind::WateringCan)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        if target.object.is_some() {
            return Ok(false);
        }
        let has_water = cx
            .tool()
            .and_then(|tool| tool.resource)
            .is_some_and(|water| water > 0);
        match target.soil() {
            Some(soil) if !soil.watered && has_water => cx.use_tool_on(target.tile),
            _ => Ok(false),
        }
    }
}
