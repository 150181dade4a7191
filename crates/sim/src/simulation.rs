//! Frame loop driving a mounted tractor around the generated farm.

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};
use tractor_core::{
    Actor, Direction, DispatchError, EngineCue, EntityId, Frame, HeldItem, LocationId, SimTime,
    TilePos, TractorConfig, TractorError, UpdateOutcome, Vehicle,
};

use crate::audio::{CueLog, RecordingAudio, SimClock};
use crate::config::SimConfig;
use crate::scenario::Scenario;
use crate::world::{MemoryWorld, Produce};

pub const FARM: LocationId = LocationId(1);
pub const TRACTOR: EntityId = EntityId(7);
pub const FARMER: EntityId = EntityId(1);

/// Totals for a finished run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimReport {
    pub frames: u32,
    /// Dispatches that completed, whether or not anything was claimed.
    pub dispatches: u32,
    /// Action intervals where no attachment was enabled or ready.
    pub skipped: u32,
    /// Dispatches aborted by an attachment fault.
    pub faults: u32,
    /// Error code of the fault that ended the run early, if any.
    pub halted: Option<&'static str>,
    /// Tiles claimed, per attachment.
    pub claims: BTreeMap<&'static str, usize>,
    pub inventory: BTreeMap<Produce, u32>,
    /// Engine cues started, in order.
    pub cues: Vec<EngineCue>,
    pub elapsed: SimTime,
}

impl SimReport {
    pub fn claimed(&self) -> usize {
        self.claims.values().sum()
    }
}

/// A farmer riding a tractor along a fixed route.
///
/// Each frame the farmer advances along the route at `frames_per_tile`, and
/// switches what they hold at the start of every lane.
pub struct Simulation {
    config: SimConfig,
    clock: SimClock,
    cues: CueLog,
    world: MemoryWorld,
    vehicle: Vehicle,
    actor: Actor,
    route: Vec<TilePos>,
    loadouts: Vec<HeldItem>,
    frame: u32,
    report: SimReport,
}

impl Simulation {
    pub fn new(config: SimConfig, tractor: &TractorConfig) -> Self {
        let clock = SimClock::new();
        let audio = RecordingAudio::new(clock.clone());
        let cues = audio.log();

        let world = Scenario::farm(FARM, config.farm_size);
        let route = Scenario::route(config.farm_size, tractor.effective_radius());
        let loadouts = Scenario::loadouts();
        let start = route.first().copied().unwrap_or_default();

        let mut vehicle =
            Vehicle::from_config(TRACTOR, FARM, start.to_pixel(), tractor, Box::new(audio));
        vehicle.activate(FARM, start.to_pixel());
        let mut actor = Actor::new(FARMER, start.to_pixel());
        if let Some(first) = loadouts.first() {
            actor.held = Some(first.clone());
        }
        vehicle.mount(&mut actor);

        Self {
            config,
            clock,
            cues,
            world,
            vehicle,
            actor,
            route,
            loadouts,
            frame: 0,
            report: SimReport::default(),
        }
    }

    pub fn world(&self) -> &MemoryWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut MemoryWorld {
        &mut self.world
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Advances one frame: moves the farmer, then updates the tractor.
    ///
    /// A failed dispatch is returned after being counted; the run can keep
    /// going.
    pub fn step(&mut self) -> Result<UpdateOutcome, DispatchError> {
        self.drive();
        self.clock.advance(self.config.frame_time);
        self.frame += 1;
        self.report.frames += 1;

        let frame = Frame::at(self.clock.now());
        let outcome = self.vehicle.update(&frame, &mut self.actor, &mut self.world);
        match &outcome {
            Ok(UpdateOutcome::Dispatched(report)) => {
                self.report.dispatches += 1;
                for (_, attachment) in &report.claims {
                    *self.report.claims.entry(attachment).or_default() += 1;
                }
            }
            Ok(UpdateOutcome::NoAttachments) => self.report.skipped += 1,
            Ok(_) => {}
            Err(err) => {
                self.report.faults += 1;
                let severity = err.severity();
                if severity.is_recoverable() {
                    debug!(frame = self.frame, code = err.error_code(), "dispatch aborted: {err}");
                } else {
                    warn!(
                        frame = self.frame,
                        attachment = err.attachment(),
                        code = err.error_code(),
                        %severity,
                        "dispatch aborted: {err}"
                    );
                }
            }
        }
        outcome
    }

    /// Runs the configured number of frames, then parks the tractor.
    ///
    /// A fault whose severity halts the host ends the run early.
    pub fn run(mut self) -> SimReport {
        info!(
            frames = self.config.frames,
            farm_size = self.config.farm_size,
            attachments = ?self.vehicle.attachments().order(),
            "simulation started"
        );
        for _ in 0..self.config.frames {
            if let Err(err) = self.step() {
                if err.severity().halts_host() {
                    let code = err.error_code();
                    error!(frame = self.frame, code, "stopping simulation: {err}");
                    self.report.halted = Some(code);
                    break;
                }
            }
        }
        self.vehicle.dismount(&mut self.actor);

        let mut report = self.report;
        report.inventory = self.world.inventory().clone();
        report.cues = self.cues.borrow().iter().map(|(_, cue)| *cue).collect();
        report.elapsed = self.clock.now();
        report
    }

    /// Places the farmer on the route tile for the current frame.
    ///
    /// The farmer is moving during the first half of each tile and idles for
    /// the rest.
    fn drive(&mut self) {
        if self.route.is_empty() {
            return;
        }
        let pace = self.config.frames_per_tile.max(1);
        let step = (self.frame / pace) as usize;
        let index = step % self.route.len();
        let tile = self.route[index];
        let previous = self.route[index.saturating_sub(1)];

        if self.frame % pace == 0 {
            let lane_length = self.config.farm_size.max(1) as usize;
            if index % lane_length == 0 && !self.loadouts.is_empty() {
                let lane = step / lane_length;
                let held = self.loadouts[lane % self.loadouts.len()].clone();
                debug!(frame = self.frame, lane, ?held, "switching loadout");
                self.actor.held = Some(held);
            }
            self.actor.position = tile.to_pixel();
            if previous != tile {
                self.actor.facing = Direction::toward(previous, tile);
            }
        }
        self.actor.is_moving = self.frame % pace < pace / 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimConfig {
        SimConfig {
            frames: 240,
            farm_size: 6,
            frames_per_tile: 4,
            ..SimConfig::default()
        }
    }

    #[test]
    fn farmer_follows_route_and_stays_mounted() {
        let mut sim = Simulation::new(small(), &TractorConfig::default());
        for _ in 0..8 {
            let _ = sim.step();
        }
        assert_eq!(sim.actor().mount, Some(TRACTOR));
        assert_eq!(sim.actor().tile(), TilePos::new(1, 1));
        assert_eq!(sim.vehicle().tile(), TilePos::new(1, 1));
    }

    #[test]
    fn host_failure_stops_the_run() {
        let mut sim = Simulation::new(small(), &TractorConfig::default());
        sim.world_mut().take_offline("host crashed");
        let report = sim.run();

        assert_eq!(report.halted, Some("INVOCATION_HOST_FAILURE"));
        assert_eq!(report.faults, 1);
        assert_eq!(report.frames, TractorConfig::default().effective_interval());
    }

    #[test]
    fn run_dispatches_every_interval() {
        let config = small();
        let frames = config.frames;
        let tractor = TractorConfig::default();
        let report = Simulation::new(config, &tractor).run();

        assert_eq!(report.frames, frames);
        assert_eq!(
            report.dispatches + report.skipped + report.faults,
            frames / tractor.effective_interval()
        );
        assert!(report.claimed() > 0);
        assert_eq!(report.cues.first(), Some(&EngineCue::Rev));
    }
}
