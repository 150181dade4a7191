//! The drivable tractor.

use crate::attachment::{AttachmentSet, standard_attachments};
use crate::audio::{EngineAudio, EngineState};
use crate::config::TractorConfig;
use crate::engine::{DispatchError, DispatchFrame, DispatchLoop, DispatchReport};
use crate::env::{AudioSink, WorldHost};
use crate::grid::MAX_RADIUS;
use crate::state::{Actor, Direction, EntityId, LocationId, PixelPos, SimTime, TilePos};

/// Per-frame input from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub now: SimTime,
}

impl Frame {
    pub fn at(now: SimTime) -> Self {
        Self { now }
    }
}

/// Result of one [`Vehicle::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The action interval has not elapsed yet.
    Waiting,
    /// Interval elapsed, but nobody is riding.
    NotMounted,
    /// Interval elapsed, but no attachment is enabled.
    NoAttachments,
    Dispatched(DispatchReport),
}

/// Buffs applied to whoever rides the tractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiderEffects {
    pub speed_bonus: i32,
    pub magnetic_radius: u32,
    pub invincible: bool,
}

impl RiderEffects {
    pub fn from_config(config: &TractorConfig) -> Self {
        Self {
            speed_bonus: config.speed_bonus,
            magnetic_radius: config.magnetic_radius,
            invincible: config.invincible_on_tractor,
        }
    }

    /// Effects that leave the rider untouched.
    pub fn none() -> Self {
        Self {
            speed_bonus: 0,
            magnetic_radius: 0,
            invincible: false,
        }
    }

    fn capture(actor: &Actor) -> Self {
        Self {
            speed_bonus: actor.speed_bonus,
            magnetic_radius: actor.magnetic_radius,
            invincible: actor.invincible,
        }
    }

    fn apply_to(&self, actor: &mut Actor) {
        actor.speed_bonus += self.speed_bonus;
        actor.magnetic_radius = actor.magnetic_radius.max(self.magnetic_radius);
        actor.invincible |= self.invincible;
    }

    fn restore(&self, actor: &mut Actor) {
        actor.speed_bonus = self.speed_bonus;
        actor.magnetic_radius = self.magnetic_radius;
        actor.invincible = self.invincible;
    }
}

/// A tractor parked in, or driven around, one location.
///
/// The host calls [`update`](Self::update) once per frame. Every
/// `interval` updates, if someone is riding, the tractor dispatches its
/// attachments over the tiles within `radius` of its own tile.
pub struct Vehicle {
    id: EntityId,
    location: LocationId,
    position: PixelPos,
    facing: Direction,
    rider: Option<EntityId>,
    /// Updates since the last dispatch attempt.
    ticks: u32,
    /// Updates since construction; rate limits are measured against this.
    total_ticks: u64,
    interval: u32,
    radius: u32,
    attachments: AttachmentSet,
    audio: EngineAudio<Box<dyn AudioSink>>,
    engine_state: EngineState,
    effects: RiderEffects,
    /// Rider values overwritten by `effects`, put back on dismount.
    saved: Option<RiderEffects>,
}

impl Vehicle {
    pub fn new(
        id: EntityId,
        location: LocationId,
        position: PixelPos,
        attachments: AttachmentSet,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            id,
            location,
            position,
            facing: Direction::default(),
            rider: None,
            ticks: 0,
            total_ticks: 0,
            interval: TractorConfig::DEFAULT_TICKS_PER_ACTION,
            radius: TractorConfig::DEFAULT_DISTANCE as u32,
            attachments,
            audio: EngineAudio::new(audio, true),
            engine_state: EngineState::Stop,
            effects: RiderEffects::none(),
            saved: None,
        }
    }

    /// Builds a tractor carrying the standard attachment set.
    pub fn from_config(
        id: EntityId,
        location: LocationId,
        position: PixelPos,
        config: &TractorConfig,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let mut vehicle = Self::new(
            id,
            location,
            position,
            standard_attachments(&config.attachments),
            audio,
        )
        .with_interval(config.effective_interval())
        .with_radius(config.effective_radius())
        .with_rider_effects(RiderEffects::from_config(config));
        vehicle.audio.set_enabled(config.sound_effects);
        vehicle
    }

    /// Sets the number of updates between dispatches (at least 1).
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Sets the tile radius, clamped to [`MAX_RADIUS`].
    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius.min(MAX_RADIUS);
        self
    }

    #[must_use]
    pub fn with_rider_effects(mut self, effects: RiderEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn location(&self) -> LocationId {
        self.location
    }

    pub fn position(&self) -> PixelPos {
        self.position
    }

    pub fn tile(&self) -> TilePos {
        self.position.to_tile()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn rider(&self) -> Option<EntityId> {
        self.rider
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    /// Engine state requested on the latest update.
    pub fn engine_state(&self) -> EngineState {
        self.engine_state
    }

    pub fn audio(&self) -> &EngineAudio<Box<dyn AudioSink>> {
        &self.audio
    }

    pub fn set_sound_effects(&mut self, enabled: bool) {
        self.audio.set_enabled(enabled);
    }

    fn is_ridden_by(&self, actor: &Actor) -> bool {
        self.rider == Some(actor.id) && actor.mount == Some(self.id)
    }

    /// Places the tractor in a location, e.g. after being summoned or warped.
    ///
    /// Restarts the action interval and lets every attachment reset its
    /// per-location state.
    pub fn activate(&mut self, location: LocationId, position: PixelPos) {
        self.location = location;
        self.position = position;
        self.ticks = 0;
        self.attachments.activate(location);
        tracing::info!(vehicle = %self.id, %location, tile = %self.tile(), "tractor activated");
    }

    /// Seats `actor` on the tractor and applies rider effects.
    ///
    /// Returns false if someone else is already riding.
    pub fn mount(&mut self, actor: &mut Actor) -> bool {
        if self.rider.is_some_and(|rider| rider != actor.id) {
            return false;
        }
        if self.rider.is_none() {
            self.saved = Some(RiderEffects::capture(actor));
            self.effects.apply_to(actor);
        }
        self.rider = Some(actor.id);
        actor.mount = Some(self.id);
        actor.position = self.position;
        actor.facing = self.facing;
        tracing::info!(vehicle = %self.id, rider = %actor.id, "mounted");
        true
    }

    /// Drops `actor` off the tractor and reverts rider effects.
    ///
    /// Returns false if `actor` was not riding.
    pub fn dismount(&mut self, actor: &mut Actor) -> bool {
        if self.rider != Some(actor.id) {
            return false;
        }
        if let Some(saved) = self.saved.take() {
            saved.restore(actor);
        }
        self.rider = None;
        actor.mount = None;
        tracing::info!(vehicle = %self.id, rider = %actor.id, "dismounted");
        true
    }

    /// Advances the tractor by one frame.
    ///
    /// Audio is fed every frame. Every `interval` frames, and only while
    /// `actor` rides this tractor, the attachments are dispatched over the
    /// surrounding tiles.
    pub fn update(
        &mut self,
        frame: &Frame,
        actor: &mut Actor,
        world: &mut dyn WorldHost,
    ) -> Result<UpdateOutcome, DispatchError> {
        self.total_ticks += 1;
        let ridden = self.is_ridden_by(actor);
        if ridden {
            self.position = actor.position;
            self.facing = actor.facing;
        }

        self.engine_state = match (ridden, actor.is_moving) {
            (false, _) => EngineState::Stop,
            (true, true) => EngineState::Rev,
            (true, false) => EngineState::Idle,
        };
        self.audio.request(self.engine_state);
        self.audio.tick();

        self.ticks += 1;
        if self.ticks % self.interval != 0 {
            return Ok(UpdateOutcome::Waiting);
        }
        self.ticks = 0;

        if !ridden {
            return Ok(UpdateOutcome::NotMounted);
        }

        let dispatch = DispatchFrame {
            location: self.location,
            origin: self.tile(),
            radius: self.radius,
            tick: self.total_ticks,
            now: frame.now,
        };
        let report = DispatchLoop::new(&mut self.attachments).run(
            &dispatch,
            actor,
            &mut self.position,
            world,
        )?;
        Ok(match report {
            Some(report) => UpdateOutcome::Dispatched(report),
            None => UpdateOutcome::NoAttachments,
        })
    }
}

impl std::fmt::Debug for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vehicle")
            .field("id", &self.id)
            .field("location", &self.location)
            .field("position", &self.position)
            .field("rider", &self.rider)
            .field("ticks", &self.ticks)
            .field("interval", &self.interval)
            .field("radius", &self.radius)
            .field("attachments", &self.attachments)
            .field("engine_state", &self.engine_state)
            .finish_non_exhaustive()
    }
}
