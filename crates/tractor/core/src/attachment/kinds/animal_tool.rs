use std::time::Duration;

use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::AnimalToolConfig;
use crate::cooldown::CooldownTracker;
use crate::state::{AnimalProduce, ToolKind};

/// Collects produce from farm animals: milk with the pail, wool with shears.
///
/// Each animal is tried at most once per cooldown window, so an animal that
/// lingers under the tractor is not hammered every dispatch.
#[derive(Clone, Debug)]
pub struct AnimalToolAttachment {
    kind: AttachmentKind,
    tool: ToolKind,
    produce: AnimalProduce,
    enabled: bool,
    cooldown: Duration,
    cooldowns: CooldownTracker,
}

impl AnimalToolAttachment {
    pub fn milk_pail(config: &AnimalToolConfig) -> Self {
        Self::new(
            AttachmentKind::MilkPail,
            ToolKind::MilkPail,
            AnimalProduce::Milk,
            config,
        )
    }

    pub fn shears(config: &AnimalToolConfig) -> Self {
        Self::new(
            AttachmentKind::Shears,
            ToolKind::Shears,
            AnimalProduce::Wool,
            config,
        )
    }

    fn new(
        kind: AttachmentKind,
        tool: ToolKind,
        produce: AnimalProduce,
        config: &AnimalToolConfig,
    ) -> Self {
        let (enabled, cooldown) = match config.cooldown(kind.name()) {
            Ok(cooldown) => (config.enabled, cooldown),
            Err(err) => {
                tracing::warn!(error = %err, attachment = kind.name(), "disabling attachment");
                (false, Duration::ZERO)
            }
        };
        Self {
            kind,
            tool,
            produce,
            enabled,
            cooldown,
            cooldowns: CooldownTracker::new(),
        }
    }
}

impl Attachment for AnimalToolAttachment {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.enabled && cx.actor.holds_tool(self.tool)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        let animal = cx.world().animals(cx.location()).into_iter().find(|animal| {
            animal.tile == target.tile
                && animal.produce_ready
                && animal.produce == Some(self.produce)
        });
        let Some(animal) = animal else {
            return Ok(false);
        };

        let key = format!("{}:{}", self.kind, animal.id);
        if !self.cooldowns.try_start(&key, self.cooldown, cx.now()) {
            return Ok(false);
        }
        cx.collect_animal_produce(target.tile, animal.id)
    }

    fn cooldowns_mut(&mut self) -> Option<&mut CooldownTracker> {
        Some(&mut self.cooldowns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, FarmAnimal, HeldItem, SimTime, TilePos, Tool};
    use crate::testing::{Call, SpyWorld, mounted_actor};

    fn barn() -> SpyWorld {
        let mut world = SpyWorld::default();
        world.animals = vec![
            FarmAnimal {
                id: EntityId(7),
                tile: TilePos::new(3, 3),
                produce: Some(AnimalProduce::Milk),
                produce_ready: true,
            },
            FarmAnimal {
                id: EntityId(8),
                tile: TilePos::new(4, 3),
                produce: Some(AnimalProduce::Wool),
                produce_ready: true,
            },
        ];
        world
    }

    fn milk_at(
        pail: &mut AnimalToolAttachment,
        world: &mut SpyWorld,
        tile: TilePos,
        now: SimTime,
    ) -> Result<bool, AttachmentError> {
        let mut actor = mounted_actor().holding(HeldItem::Tool(Tool::new(ToolKind::MilkPail)));
        let mut cx = ApplyContext::new(&mut actor, world, Default::default(), now);
        pail.apply(&TileTarget::new(tile), &mut cx)
    }

    #[test]
    fn milks_matching_animal_once_per_cooldown() {
        let mut world = barn();
        let mut pail = AnimalToolAttachment::milk_pail(&AnimalToolConfig::default());
        let cow = TilePos::new(3, 3);

        assert_eq!(milk_at(&mut pail, &mut world, cow, SimTime::ZERO), Ok(true));
        assert_eq!(milk_at(&mut pail, &mut world, cow, SimTime::from_millis(1_000)), Ok(false));
        assert_eq!(milk_at(&mut pail, &mut world, cow, SimTime::from_millis(5_000)), Ok(true));
        assert_eq!(
            world.calls,
            vec![Call::CollectAnimalProduce(EntityId(7)), Call::CollectAnimalProduce(EntityId(7))]
        );
    }

    #[test]
    fn ignores_animals_with_other_produce() {
        let mut world = barn();
        let mut pail = AnimalToolAttachment::milk_pail(&AnimalToolConfig::default());
        assert_eq!(milk_at(&mut pail, &mut world, TilePos::new(4, 3), SimTime::ZERO), Ok(false));
        assert!(world.calls.is_empty());
    }

    #[test]
    fn activation_clears_cooldowns() {
        let mut world = barn();
        let mut pail = AnimalToolAttachment::milk_pail(&AnimalToolConfig::default());
        let cow = TilePos::new(3, 3);

        assert_eq!(milk_at(&mut pail, &mut world, cow, SimTime::ZERO), Ok(true));
        pail.on_activated(Default::default());
        assert_eq!(milk_at(&mut pail, &mut world, cow, SimTime::from_millis(10)), Ok(true));
    }

    #[test]
    fn invalid_cooldown_disables_attachment() {
        let shears = AnimalToolAttachment::shears(&AnimalToolConfig {
            cooldown_secs: -1.0,
            ..AnimalToolConfig::default()
        });
        let actor = mounted_actor().holding(HeldItem::Tool(Tool::new(ToolKind::Shears)));
        assert!(!shears.is_enabled(&EnableContext::new(&actor, Default::default())));
        assert_eq!(shears.name(), "shears");
    }
}
