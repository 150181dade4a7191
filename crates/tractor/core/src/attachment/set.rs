use super::{ApplyContext, Attachment, AttachmentError, EnableContext, TileTarget};
use crate::state::LocationId;

struct Slot {
    order: i32,
    attachment: Box<dyn Attachment>,
    /// First update tick at which the rate limit allows another application.
    ready_at: u64,
}

/// Explicitly ordered attachment collection.
///
/// Attachments are kept sorted by their declared order (ascending); equal
/// orders keep insertion order. This order is the tie-break for tiles: the
/// first attachment that handles a tile wins it.
#[derive(Default)]
pub struct AttachmentSet {
    slots: Vec<Slot>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attachment at its declared position.
    pub fn insert(&mut self, order: i32, attachment: Box<dyn Attachment>) {
        let index = self.slots.partition_point(|slot| slot.order <= order);
        self.slots.insert(
            index,
            Slot {
                order,
                attachment,
                ready_at: 0,
            },
        );
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, order: i32, attachment: impl Attachment + 'static) -> Self {
        self.insert(order, Box::new(attachment));
        self
    }

    /// Attachment names in dispatch order.
    pub fn order(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.attachment.name()).collect()
    }

    /// Declared order keys in dispatch order.
    pub fn order_keys(&self) -> Vec<i32> {
        self.slots.iter().map(|slot| slot.order).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn name(&self, index: usize) -> &'static str {
        self.slots[index].attachment.name()
    }

    /// Indices of attachments that participate in a dispatch at `tick`.
    ///
    /// Each selected attachment with a rate limit is armed here, so it sits
    /// out the following dispatches until `tick + rate_limit`.
    pub(crate) fn enabled(&mut self, cx: &EnableContext<'_>, tick: u64) -> Vec<usize> {
        let mut selected = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if tick < slot.ready_at || !slot.attachment.is_enabled(cx) {
                continue;
            }
            let rate_limit = slot.attachment.rate_limit();
            if rate_limit > 0 {
                slot.ready_at = tick + u64::from(rate_limit);
            }
            selected.push(index);
        }
        selected
    }

    pub(crate) fn apply(
        &mut self,
        index: usize,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        self.slots[index].attachment.apply(target, cx)
    }

    /// Resets rate limits and notifies every attachment of the new location.
    pub fn activate(&mut self, location: LocationId) {
        for slot in &mut self.slots {
            slot.ready_at = 0;
            slot.attachment.on_activated(location);
        }
    }
}

impl std::fmt::Debug for AttachmentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|slot| (slot.order, slot.attachment.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SimTime, TilePos};
    use crate::testing::{NamedAttachment, SpyWorld, mounted_actor};

    #[test]
    fn insert_sorts_by_declared_order() {
        let set = AttachmentSet::new()
            .with(30, NamedAttachment::new("till"))
            .with(10, NamedAttachment::new("harvest"))
            .with(20, NamedAttachment::new("water"));
        assert_eq!(set.order(), vec!["harvest", "water", "till"]);
        assert_eq!(set.order_keys(), vec![10, 20, 30]);
    }

    #[test]
    fn equal_orders_keep_insertion_order() {
        let set = AttachmentSet::new()
            .with(5, NamedAttachment::new("first"))
            .with(5, NamedAttachment::new("second"))
            .with(1, NamedAttachment::new("zeroth"))
            .with(5, NamedAttachment::new("third"));
        assert_eq!(set.order(), vec!["zeroth", "first", "second", "third"]);
    }

    #[test]
    fn enabled_filters_disabled_and_rate_limited() {
        let mut set = AttachmentSet::new()
            .with(1, NamedAttachment::new("on").with_rate_limit(10))
            .with(2, NamedAttachment::new("off").disabled())
            .with(3, NamedAttachment::new("free"));
        let actor = mounted_actor();
        let cx = EnableContext::new(&actor, Default::default());

        assert_eq!(set.enabled(&cx, 5), vec![0, 2]);
        assert_eq!(set.enabled(&cx, 14), vec![2]);
        assert_eq!(set.enabled(&cx, 15), vec![0, 2]);
        assert_eq!(set.enabled(&cx, 16), vec![2]);

        set.activate(Default::default());
        assert_eq!(set.enabled(&cx, 17), vec![0, 2]);
    }

    #[test]
    fn selected_attachment_works_every_tile() {
        let mut set =
            AttachmentSet::new().with(1, NamedAttachment::new("sword").with_rate_limit(30));
        let actor = mounted_actor();
        let selected = set.enabled(&EnableContext::new(&actor, Default::default()), 0);
        assert_eq!(selected, vec![0]);

        let mut world = SpyWorld::default();
        let mut actor = mounted_actor();
        let mut cx = ApplyContext::new(&mut actor, &mut world, Default::default(), SimTime::ZERO);
        for x in 0..3 {
            let target = TileTarget::new(TilePos::new(x, 0));
            assert_eq!(set.apply(0, &target, &mut cx), Ok(true));
        }
    }
}
