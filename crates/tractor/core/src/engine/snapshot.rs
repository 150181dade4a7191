//! Capture and restore of the actor state a dispatch borrows.

use crate::state::{Actor, Direction, EntityId, PixelPos};

/// Actor state that attachment invocation is allowed to disturb.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorStateSnapshot {
    pub vehicle_position: PixelPos,
    pub mount: Option<EntityId>,
    pub tool_resource: Option<u32>,
    pub stamina: f32,
    pub position: PixelPos,
    pub facing: Direction,
    pub movement_locked: bool,
}

impl ActorStateSnapshot {
    pub fn capture(actor: &Actor, vehicle_position: PixelPos) -> Self {
        Self {
            vehicle_position,
            mount: actor.mount,
            tool_resource: actor.tool().and_then(|tool| tool.resource),
            stamina: actor.stamina,
            position: actor.position,
            facing: actor.facing,
            movement_locked: actor.movement_locked,
        }
    }

    /// Puts the captured values back.
    ///
    /// Order matters to hosts that react to individual writes: vehicle
    /// position, mount, tool resource, stamina, position, facing, then the
    /// movement lock.
    pub fn restore(&self, actor: &mut Actor, vehicle_position: &mut PixelPos) {
        *vehicle_position = self.vehicle_position;
        actor.mount = self.mount;
        if let Some(tool) = actor.tool_mut() {
            tool.resource = self.tool_resource;
        }
        actor.stamina = self.stamina;
        actor.position = self.position;
        actor.facing = self.facing;
        actor.movement_locked = self.movement_locked;
    }
}

/// Exclusive hold on the actor for the length of one dispatch.
///
/// Engaging the guard captures the actor, parks the vehicle off-screen and
/// detaches the mount so tool effects hit the tiles under the tractor.
/// Dropping it restores everything, including while unwinding.
pub struct DispatchGuard<'a> {
    actor: &'a mut Actor,
    vehicle_position: &'a mut PixelPos,
    snapshot: ActorStateSnapshot,
}

impl<'a> DispatchGuard<'a> {
    pub fn engage(actor: &'a mut Actor, vehicle_position: &'a mut PixelPos) -> Self {
        let snapshot = ActorStateSnapshot::capture(actor, *vehicle_position);
        *vehicle_position = PixelPos::OFFSCREEN;
        actor.mount = None;
        Self {
            actor,
            vehicle_position,
            snapshot,
        }
    }

    pub fn actor_mut(&mut self) -> &mut Actor {
        self.actor
    }

    pub fn snapshot(&self) -> &ActorStateSnapshot {
        &self.snapshot
    }

    pub fn vehicle_position(&self) -> PixelPos {
        *self.vehicle_position
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.snapshot.restore(self.actor, self.vehicle_position);
        if std::thread::panicking() {
            tracing::warn!(actor = %self.actor.id, "restored actor state while unwinding");
        }
    }
}
