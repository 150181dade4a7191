//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Tractor config file; defaults are used when unset or missing.
    pub config_path: Option<PathBuf>,
    /// Number of frames to simulate.
    pub frames: u32,
    /// Width and height of the generated farm, in tiles.
    pub farm_size: u32,
    /// Simulation time covered by one frame.
    pub frame_time: Duration,
    /// Frames the driver spends on each tile of the route.
    pub frames_per_tile: u32,
}

impl SimConfig {
    pub const DEFAULT_FRAMES: u32 = 3_600;
    pub const DEFAULT_FARM_SIZE: u32 = 16;
    pub const MIN_FARM_SIZE: u32 = 4;
    pub const DEFAULT_FRAME_MILLIS: u64 = 16;
    pub const DEFAULT_FRAMES_PER_TILE: u32 = 24;

    /// Construct simulation configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TRACTOR_CONFIG` - Path to a TOML/RON/JSON tractor config
    /// - `TRACTOR_FRAMES` - Frames to simulate (default: 3600)
    /// - `TRACTOR_FARM_SIZE` - Farm width and height in tiles (default: 16, min: 4)
    /// - `TRACTOR_FRAME_MS` - Milliseconds per frame (default: 16)
    /// - `TRACTOR_FRAMES_PER_TILE` - Driving pace (default: 24)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("TRACTOR_CONFIG") {
            config.config_path = Some(PathBuf::from(path));
        }
        if let Some(frames) = read_env::<u32>("TRACTOR_FRAMES") {
            config.frames = frames;
        }
        if let Some(size) = read_env::<u32>("TRACTOR_FARM_SIZE") {
            config.farm_size = size.max(Self::MIN_FARM_SIZE);
        }
        if let Some(millis) = read_env::<u64>("TRACTOR_FRAME_MS") {
            config.frame_time = Duration::from_millis(millis.max(1));
        }
        if let Some(pace) = read_env::<u32>("TRACTOR_FRAMES_PER_TILE") {
            config.frames_per_tile = pace.max(1);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            frames: Self::DEFAULT_FRAMES,
            farm_size: Self::DEFAULT_FARM_SIZE,
            frame_time: Duration::from_millis(Self::DEFAULT_FRAME_MILLIS),
            frames_per_tile: Self::DEFAULT_FRAMES_PER_TILE,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
