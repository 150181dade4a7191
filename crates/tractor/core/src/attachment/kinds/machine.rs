use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::state::{TileObject, ToolKind};

/// Empties machines whose output is ready while the scythe is held.
#[derive(Clone, Debug)]
pub struct MachineOutputAttachment {
    enabled: bool,
}

impl MachineOutputAttachment {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Attachment for MachineOutputAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::MachineOutput.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.enabled && cx.actor.holds_tool(ToolKind::Scythe)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        match target.object {
            Some(TileObject::Machine { output_ready: true }) => {
                cx.collect_machine_output(target.tile)
            }
            _ => Ok(false),
        }
    }
}
