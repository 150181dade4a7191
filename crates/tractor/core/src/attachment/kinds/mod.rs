//! The standard attachment set, one module per tool or feature category.
mod animal_tool;
mod axe;
mod fertilizer;
mod hoe;
mod machine;
mod melee_weapon;
mod pickaxe;
mod scythe;
mod seeds;
mod watering_can;

pub use animal_tool::AnimalToolAttachment;
pub use axe::AxeAttachment;
pub use fertilizer::FertilizerAttachment;
pub use hoe::HoeAttachment;
pub use machine::MachineOutputAttachment;
pub use melee_weapon::MeleeWeaponAttachment;
pub use pickaxe::PickaxeAttachment;
pub use scythe::ScytheAttachment;
pub use seeds::SeedsAttachment;
pub use watering_can::WateringCanAttachment;

use super::{AttachmentKind, AttachmentSet};
use crate::config::StandardAttachmentsConfig;

/// Builds the standard attachment set from configuration.
///
/// Each attachment lands at its configured `order`, or at
/// [`AttachmentKind::default_order`] when none is declared. Attachments with
/// malformed settings are still inserted, but disabled.
pub fn standard_attachments(config: &StandardAttachmentsConfig) -> AttachmentSet {
    let order = |kind: AttachmentKind, declared: Option<i32>| {
        declared.unwrap_or_else(|| kind.default_order())
    };

    let mut set = AttachmentSet::new();
    set.insert(
        order(AttachmentKind::Axe, config.axe.order),
        Box::new(AxeAttachment::new(config.axe.clone())),
    );
    set.insert(
        order(AttachmentKind::Fertilizer, config.fertilizer.order),
        Box::new(FertilizerAttachment::new(config.fertilizer.enabled)),
    );
    set.insert(
        order(AttachmentKind::Hoe, config.hoe.order),
        Box::new(HoeAttachment::new(config.hoe.clone())),
    );
    set.insert(
        order(AttachmentKind::MeleeWeapon, config.melee_weapon.order),
        Box::new(MeleeWeaponAttachment::new(&config.melee_weapon)),
    );
    set.insert(
        order(AttachmentKind::MilkPail, config.milk_pail.order),
        Box::new(AnimalToolAttachment::milk_pail(&config.milk_pail)),
    );
    set.insert(
        order(AttachmentKind::Pickaxe, config.pickaxe.order),
        Box::new(PickaxeAttachment::new(config.pickaxe.clone())),
    );
    set.insert(
        order(AttachmentKind::MachineOutput, config.machine_output.order),
        Box::new(MachineOutputAttachment::new(config.machine_output.enabled)),
    );
    set.insert(
        order(AttachmentKind::Scythe, config.scythe.order),
        Box::new(ScytheAttachment::new(config.scythe.clone())),
    );
    set.insert(
        order(AttachmentKind::Seeds, config.seeds.order),
        Box::new(SeedsAttachment::new(config.seeds.enabled)),
    );
    set.insert(
        order(AttachmentKind::Shears, config.shears.order),
        Box::new(AnimalToolAttachment::shears(&config.shears)),
    );
    set.insert(
        order(AttachmentKind::WateringCan, config.watering_can.order),
        Box::new(WateringCanAttachment::new(config.watering_can.enabled)),
    );
    set
}
