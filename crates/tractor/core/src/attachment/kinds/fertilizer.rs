use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::state::ItemCategory;

/// Spreads the held fertilizer on soil that has none yet.
#[derive(Clone, Debug)]
pub struct FertilizerAttachment {
    enabled: bool,
}

impl FertilizerAttachment {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Attachment for FertilizerAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::Fertilizer.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.enabled && cx.actor.holds_item(ItemCategory::Fertilizer)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        if target.object.is_some() || cx.item().is_none_or(|item| item.is_empty()) {
            return Ok(false);
        }
        let Some(soil) = target.soil() else {
            return Ok(false);
        };
        // Fertilizer only takes before the crop sprouts.
        let accepts = soil.fertilizer.is_none()
            && soil.crop.as_ref().is_none_or(|crop| crop.growth_stage == 0);
        if accepts {
            cx.place_item(target.tile)
        } else {
            Ok(false)
        }
    }
}
