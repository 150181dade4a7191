//! Headless tractor simulation binary.
//!
//! ```bash
//! TRACTOR_CONFIG=config/tractor.toml TRACTOR_FRAMES=7200 cargo run -p tractor-sim
//! ```

use anyhow::Result;
use tractor_content::ConfigLoader;
use tractor_core::TractorConfig;
use tractor_sim::{SimConfig, Simulation, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let sim_config = SimConfig::from_env();

    // 2. Setup logging
    logging::setup_logging();

    // 3. Load tractor settings
    let tractor_config = match &sim_config.config_path {
        Some(path) => ConfigLoader::load_or_default(path)?,
        None => TractorConfig::default(),
    };
    tracing::info!(
        radius = tractor_config.effective_radius(),
        interval = tractor_config.effective_interval(),
        sound_effects = tractor_config.sound_effects,
        "tractor configured"
    );

    // 4. Drive
    let report = Simulation::new(sim_config, &tractor_config).run();

    tracing::info!(
        frames = report.frames,
        elapsed = %report.elapsed,
        dispatches = report.dispatches,
        skipped = report.skipped,
        faults = report.faults,
        halted = ?report.halted,
        claimed = report.claimed(),
        cues = report.cues.len(),
        "simulation finished"
    );
    for (attachment, count) in &report.claims {
        tracing::info!(attachment, count, "claims");
    }
    for (produce, count) in &report.inventory {
        tracing::info!(produce = %produce, count, "collected");
    }

    if let Some(code) = report.halted {
        anyhow::bail!("simulation halted by {code}");
    }
    Ok(())
}
