use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::state::ItemCategory;

/// Plants the held seeds in empty tilled soil.
#[derive(Clone, Debug)]
pub struct SeedsAttachment {
    enabled: bool,
}

impl SeedsAttachment {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Attachment for SeedsAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Seeds.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.enabled && cx.actor.holds_item(ItemCategory::Seeds)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        if target.object.is_some() {
            return Ok(false);
        }
        // The stack can run out partway through a dispatch.
        if cx.item().is_none_or(|item| item.is_empty()) {
            return Ok(false);
        }
        match target.soil() {
            Some(soil) if soil.crop.is_none() => cx.place_item(target.tile),
            _ => Ok(false),
        }
    }
}
