use crate::attachment::{
    ApplyContext, Attachment, AttachmentError, AttachmentKind, EnableContext, TileTarget,
};
use crate::config::MeleeWeaponConfig;
use crate::state::{TerrainFeature, TileObject, ToolKind};

/// Attacks monsters and smashes mine containers with a melee weapon.
#[derive(Clone, Debug)]
pub struct MeleeWeaponAttachment {
    config: MeleeWeaponConfig,
    rate_limit: u32,
}

impl MeleeWeaponAttachment {
    /// Builds the attachment; a malformed rate limit disables it.
    pub fn new(config: &MeleeWeaponConfig) -> Self {
        let mut config = config.clone();
        let rate_limit = match config.rate_limit() {
            Ok(ticks) => ticks,
            Err(err) => {
                tracing::warn!(error = %err, "disabling melee weapon attachment");
                config.enabled = false;
                0
            }
        };
        Self { config, rate_limit }
    }
}

impl Attachment for MeleeWeaponAttachment {
    fn name(&self) -> &'static str {
        AttachmentKind::MeleeWeapon.name()
    }

    fn rate_limit(&self) -> u32 {
        self.rate_limit
    }

    fn is_enabled(&self, cx: &EnableContext<'_>) -> bool {
        self.config.enabled && cx.actor.holds_tool(ToolKind::MeleeWeapon)
    }

    fn apply(
        &mut self,
        target: &TileTarget,
        cx: &mut ApplyContext<'_>,
    ) -> Result<bool, AttachmentError> {
        let config = &self.config;

        if config.attack_monsters {
            let monster = cx
                .world()
                .monsters(cx.location())
                .into_iter()
                .find(|monster| monster.tile == target.tile && monster.is_alive());
            if let Some(monster) = monster {
                return cx.damage_monster(target.tile, monster.id);
            }
        }

        match (&target.object, &target.feature) {
            (Some(TileObject::MineContainer), _) if config.break_mine_containers => {
                cx.use_tool_on(target.tile)
            }
            (None, Some(TerrainFeature::Soil(soil)))
                if config.clear_dead_crops && soil.crop.as_ref().is_some_and(|crop| crop.dead) =>
            {
                cx.use_tool_on(target.tile)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, HeldItem, Monster, SimTime, TilePos, Tool};
    use crate::testing::{Call, SpyWorld, mounted_actor};

    fn sword_actor() -> crate::state::Actor {
        mounted_actor().holding(HeldItem::Tool(Tool::new(ToolKind::MeleeWeapon)))
    }

    #[test]
    fn attacks_living_monsters_on_the_tile() {
        let tile = TilePos::new(7, 7);
        let mut world = SpyWorld::default();
        world.monsters = vec![
            Monster {
                id: EntityId(40),
                tile,
                health: 0,
            },
            Monster {
                id: EntityId(41),
                tile,
                health: 12,
            },
        ];
        let mut actor = sword_actor();
        let mut weapon = MeleeWeaponAttachment::new(&MeleeWeaponConfig::default());
        let mut cx = ApplyContext::new(&mut actor, &mut world, Default::default(), SimTime::ZERO);

        assert_eq!(weapon.apply(&TileTarget::new(tile), &mut cx), Ok(true));
        assert_eq!(weapon.apply(&TileTarget::new(TilePos::new(0, 0)), &mut cx), Ok(false));
        assert_eq!(world.calls, vec![Call::DamageMonster(EntityId(41))]);
    }

    #[test]
    fn breaks_mine_containers() {
        let mut world = SpyWorld::default();
        let mut actor = sword_actor();
        let mut weapon = MeleeWeaponAttachment::new(&MeleeWeaponConfig::default());
        let mut cx = ApplyContext::new(&mut actor, &mut world, Default::default(), SimTime::ZERO);
        let barrel = TileTarget {
            object: Some(TileObject::MineContainer),
            ..TileTarget::new(TilePos::new(2, 3))
        };
        assert_eq!(weapon.apply(&barrel, &mut cx), Ok(true));
    }

    #[test]
    fn rate_limit_comes_from_config() {
        let weapon = MeleeWeaponAttachment::new(&MeleeWeaponConfig {
            rate_limit_ticks: 45,
            ..MeleeWeaponConfig::default()
        });
        assert_eq!(weapon.rate_limit(), 45);
    }

    #[test]
    fn negative_rate_limit_disables_attachment() {
        let weapon = MeleeWeaponAttachment::new(&MeleeWeaponConfig {
            rate_limit_ticks: -1,
            ..MeleeWeaponConfig::default()
        });
        let actor = sword_actor();
        assert!(!weapon.is_enabled(&EnableContext::new(&actor, Default::default())));
    }
}
