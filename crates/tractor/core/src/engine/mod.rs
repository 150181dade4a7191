//! Per-interval dispatch of attachments over the tile grid.
//!
//! [`DispatchLoop`] runs one dispatch: it picks the enabled attachments,
//! impersonates the rider through a [`DispatchGuard`] and gives every tile
//! around the vehicle to the first attachment, in declared order, that
//! handles it. Whatever happens inside, the guard puts the rider back before
//! the caller sees the result.

mod errors;
mod snapshot;

pub use errors::DispatchError;
pub use snapshot::{ActorStateSnapshot, DispatchGuard};

use crate::attachment::{ApplyContext, AttachmentSet, EnableContext, TileTarget};
use crate::env::WorldHost;
use crate::error::TractorError;
use crate::grid::tile_grid;
use crate::state::{Actor, LocationId, PixelPos, SimTime, TilePos};

/// Inputs for one dispatch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchFrame {
    pub location: LocationId,
    /// Center of the tile grid.
    pub origin: TilePos,
    pub radius: u32,
    /// Update tick the dispatch runs on; rate limits count these.
    pub tick: u64,
    pub now: SimTime,
}

/// What a completed dispatch did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of tiles visited.
    pub tiles: usize,
    /// Tiles handled this dispatch, with the attachment that claimed each.
    pub claims: Vec<(TilePos, &'static str)>,
}

impl DispatchReport {
    pub fn claimed_by(&self, tile: TilePos) -> Option<&'static str> {
        self.claims
            .iter()
            .find(|(claimed, _)| *claimed == tile)
            .map(|(_, attachment)| *attachment)
    }

    /// Number of tiles claimed by `attachment`.
    pub fn count(&self, attachment: &str) -> usize {
        self.claims
            .iter()
            .filter(|(_, name)| *name == attachment)
            .count()
    }
}

/// Runs dispatches against one attachment set.
pub struct DispatchLoop<'a> {
    attachments: &'a mut AttachmentSet,
}

impl<'a> DispatchLoop<'a> {
    pub fn new(attachments: &'a mut AttachmentSet) -> Self {
        Self { attachments }
    }

    /// Runs one dispatch.
    ///
    /// Returns `Ok(None)` without touching the actor or the world when no
    /// attachment is enabled. Attachment faults abort the dispatch; the
    /// actor and vehicle are restored before the error is returned.
    pub fn run(
        &mut self,
        frame: &DispatchFrame,
        actor: &mut Actor,
        vehicle_position: &mut PixelPos,
        world: &mut dyn WorldHost,
    ) -> Result<Option<DispatchReport>, DispatchError> {
        let enabled = self
            .attachments
            .enabled(&EnableContext::new(actor, frame.location), frame.tick);
        if enabled.is_empty() {
            return Ok(None);
        }

        let grid = tile_grid(frame.origin, frame.radius);
        let mut report = DispatchReport {
            tiles: grid.len(),
            claims: Vec::new(),
        };

        let mut guard = DispatchGuard::engage(actor, vehicle_position);
        for tile in grid {
            let target = TileTarget {
                tile,
                object: world.object_at(frame.location, tile),
                feature: world.feature_at(frame.location, tile),
            };

            for &index in &enabled {
                let mut cx =
                    ApplyContext::new(guard.actor_mut(), &mut *world, frame.location, frame.now);
                let handled = self
                    .attachments
                    .apply(index, &target, &mut cx)
                    .map_err(|source| {
                        let attachment = self.attachments.name(index);
                        tracing::warn!(
                            %tile,
                            attachment,
                            severity = %source.severity(),
                            error = %source,
                            "attachment faulted"
                        );
                        DispatchError::Attachment {
                            attachment,
                            tile,
                            source,
                        }
                    })?;
                if handled {
                    let attachment = self.attachments.name(index);
                    tracing::trace!(%tile, attachment, "tile claimed");
                    report.claims.push((tile, attachment));
                    break;
                }
            }
        }
        drop(guard);

        tracing::debug!(
            location = %frame.location,
            origin = %frame.origin,
            tiles = report.tiles,
            claimed = report.claims.len(),
            attachments = enabled.len(),
            "dispatch finished"
        );
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::MeleeWeaponAttachment;
    use crate::config::MeleeWeaponConfig;
    use crate::state::{
        Crop, CropKind, EntityId, HeldItem, Monster, Soil, TerrainFeature, Tool, ToolKind,
    };
    use crate::testing::{ApplyLog, Call, NamedAttachment, SpyWorld, mounted_actor, vehicle_home};

    fn frame(tick: u64) -> DispatchFrame {
        DispatchFrame {
            location: LocationId(1),
            origin: TilePos::new(5, 5),
            radius: 1,
            tick,
            now: SimTime::ZERO,
        }
    }

    #[test]
    fn first_handler_wins_each_tile() {
        let ripe = TilePos::new(5, 4);
        let log = ApplyLog::default();
        let mut set = AttachmentSet::new()
            .with(10, NamedAttachment::new("harvest").claiming([ripe]).sharing_log(&log))
            .with(20, NamedAttachment::new("till").sharing_log(&log));
        let mut world = SpyWorld::default().with_feature(
            ripe,
            TerrainFeature::Soil(Soil::with_crop(Crop::ripe(CropKind::Regular))),
        );
        let mut actor = mounted_actor();
        let mut vehicle = vehicle_home();

        let report = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap()
            .unwrap();

        assert_eq!(report.tiles, 9);
        assert_eq!(report.claimed_by(ripe), Some("harvest"));
        assert_eq!(report.count("till"), 8);
        let on_ripe: Vec<&str> = log
            .borrow()
            .iter()
            .filter(|(_, tile)| *tile == ripe)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(on_ripe, vec!["harvest"]);
    }

    #[test]
    fn nothing_enabled_touches_nothing() {
        let mut set = AttachmentSet::new().with(1, NamedAttachment::new("off").disabled());
        let mut world = SpyWorld::default();
        let mut actor = mounted_actor();
        let mut vehicle = vehicle_home();

        let report = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap();
        assert_eq!(report, None);
        assert_eq!(world.queries.get(), 0);
    }

    #[test]
    fn rate_limited_attachment_sits_out_whole_dispatches() {
        let mut set = AttachmentSet::new()
            .with(1, NamedAttachment::new("sword").with_rate_limit(30))
            .with(2, NamedAttachment::new("fallback"));
        let mut world = SpyWorld::default();
        let mut actor = mounted_actor();
        let mut vehicle = vehicle_home();

        let report = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap()
            .unwrap();
        assert_eq!(report.count("sword"), 9);
        assert_eq!(report.count("fallback"), 0);

        let report = DispatchLoop::new(&mut set)
            .run(&frame(24), &mut actor, &mut vehicle, &mut world)
            .unwrap()
            .unwrap();
        assert_eq!(report.count("sword"), 0);
        assert_eq!(report.count("fallback"), 9);

        let report = DispatchLoop::new(&mut set)
            .run(&frame(42), &mut actor, &mut vehicle, &mut world)
            .unwrap()
            .unwrap();
        assert_eq!(report.count("sword"), 9);
    }

    #[test]
    fn melee_weapon_hits_every_monster_in_range() {
        let weapon = MeleeWeaponAttachment::new(&MeleeWeaponConfig::default());
        let mut set = AttachmentSet::new().with(40, weapon);
        let mut world = SpyWorld::default();
        world.monsters = vec![
            Monster {
                id: EntityId(1),
                tile: TilePos::new(4, 4),
                health: 20,
            },
            Monster {
                id: EntityId(2),
                tile: TilePos::new(6, 6),
                health: 20,
            },
        ];
        let mut actor = mounted_actor().holding(HeldItem::Tool(Tool::new(ToolKind::MeleeWeapon)));
        let mut vehicle = vehicle_home();

        let report = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap()
            .unwrap();

        assert_eq!(report.count("melee_weapon"), 2);
        assert_eq!(
            world.calls,
            vec![Call::DamageMonster(EntityId(1)), Call::DamageMonster(EntityId(2))]
        );
    }

    #[test]
    fn declining_still_uses_up_the_window() {
        let mut set = AttachmentSet::new()
            .with(1, NamedAttachment::new("sword").with_rate_limit(30).declining_all());
        let mut world = SpyWorld::default();
        let mut actor = mounted_actor();
        let mut vehicle = vehicle_home();

        let first = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap();
        assert_eq!(first.map(|report| report.claims.len()), Some(0));
        let second = DispatchLoop::new(&mut set)
            .run(&frame(24), &mut actor, &mut vehicle, &mut world)
            .unwrap();
        assert_eq!(second, None);
    }

    #[test]
    fn fault_is_reported_after_restore() {
        let bad = TilePos::new(5, 5);
        let mut set = AttachmentSet::new().with(1, NamedAttachment::new("broken").failing_at(bad));
        let mut world = SpyWorld::default();
        let mut actor = mounted_actor();
        let before = actor.clone();
        let mut vehicle = vehicle_home();

        let err = DispatchLoop::new(&mut set)
            .run(&frame(12), &mut actor, &mut vehicle, &mut world)
            .unwrap_err();

        assert_eq!(err.attachment(), "broken");
        assert!(matches!(err, DispatchError::Attachment { tile, .. } if tile == bad));
        assert_eq!(actor, before);
        assert_eq!(vehicle, vehicle_home());
        // Tiles before the fault were worked; nothing after it was looked up.
        assert_eq!(world.calls.len(), 4);
        assert_eq!(world.queries.get(), 10);
    }
}
