//! Tractor configuration and per-attachment toggles.
//!
//! Configuration is read once when the vehicle and its attachments are
//! constructed; the dispatch loop never re-reads it mid-tick.

use crate::error::{ErrorSeverity, TractorError};

/// Errors detected while validating configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("tile radius must not be negative (got {0})")]
    NegativeRadius(i32),

    #[error("tile radius {value} exceeds the maximum of {max}")]
    RadiusTooLarge { value: i32, max: i32 },

    #[error("action interval must be at least one tick")]
    ZeroInterval,

    #[error("{attachment}: rate limit must not be negative (got {value})")]
    NegativeRateLimit {
        attachment: &'static str,
        value: i32,
    },

    #[error("{attachment}: cooldown must be a finite, non-negative number of seconds (got {value})")]
    InvalidCooldown {
        attachment: &'static str,
        value: f32,
    },
}

impl TractorError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeRadius(_) => "CONFIG_NEGATIVE_RADIUS",
            Self::RadiusTooLarge { .. } => "CONFIG_RADIUS_TOO_LARGE",
            Self::ZeroInterval => "CONFIG_ZERO_INTERVAL",
            Self::NegativeRateLimit { .. } => "CONFIG_NEGATIVE_RATE_LIMIT",
            Self::InvalidCooldown { .. } => "CONFIG_INVALID_COOLDOWN",
        }
    }
}

/// Top-level tractor configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TractorConfig {
    /// Number of tiles in each direction the tractor affects.
    pub distance: i32,
    /// Update calls between two dispatch ticks.
    pub ticks_per_action: u32,
    /// Item pickup radius (pixels) granted to the rider.
    pub magnetic_radius: u32,
    /// Speed bonus granted to the rider.
    pub speed_bonus: i32,
    /// Whether the rider takes no damage while mounted.
    pub invincible_on_tractor: bool,
    /// Whether engine sounds play.
    pub sound_effects: bool,
    pub attachments: StandardAttachmentsConfig,
}

impl TractorConfig {
    pub const DEFAULT_DISTANCE: i32 = 1;
    pub const MAX_DISTANCE: i32 = 15;
    pub const DEFAULT_TICKS_PER_ACTION: u32 = 12;
    pub const DEFAULT_MAGNETIC_RADIUS: u32 = 384;
    pub const DEFAULT_SPEED_BONUS: i32 = 2;

    pub fn new() -> Self {
        Self {
            distance: Self::DEFAULT_DISTANCE,
            ticks_per_action: Self::DEFAULT_TICKS_PER_ACTION,
            magnetic_radius: Self::DEFAULT_MAGNETIC_RADIUS,
            speed_bonus: Self::DEFAULT_SPEED_BONUS,
            invincible_on_tractor: true,
            sound_effects: true,
            attachments: StandardAttachmentsConfig::default(),
        }
    }

    /// Validates the configured tile radius.
    pub fn radius(&self) -> Result<u32, ConfigError> {
        if self.distance < 0 {
            return Err(ConfigError::NegativeRadius(self.distance));
        }
        if self.distance > Self::MAX_DISTANCE {
            return Err(ConfigError::RadiusTooLarge {
                value: self.distance,
                max: Self::MAX_DISTANCE,
            });
        }
        Ok(self.distance as u32)
    }

    /// Validates the configured action interval.
    pub fn interval(&self) -> Result<u32, ConfigError> {
        if self.ticks_per_action == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(self.ticks_per_action)
    }

    /// Tile radius, falling back to the default when the configured one is malformed.
    pub fn effective_radius(&self) -> u32 {
        self.radius().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid tractor radius, using default");
            Self::DEFAULT_DISTANCE as u32
        })
    }

    /// Action interval, falling back to the default when the configured one is malformed.
    pub fn effective_interval(&self) -> u32 {
        self.interval().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid action interval, using default");
            Self::DEFAULT_TICKS_PER_ACTION
        })
    }
}

impl Default for TractorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the standard attachment set.
///
/// Each attachment may declare an explicit `order`; lower values are tried
/// first on every tile. Attachments without one keep their standard position.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StandardAttachmentsConfig {
    pub axe: AxeConfig,
    pub fertilizer: ToggleConfig,
    pub hoe: HoeConfig,
    pub melee_weapon: MeleeWeaponConfig,
    pub milk_pail: AnimalToolConfig,
    pub pickaxe: PickaxeConfig,
    pub machine_output: ToggleConfig,
    pub scythe: ScytheConfig,
    pub seeds: ToggleConfig,
    pub shears: AnimalToolConfig,
    pub watering_can: ToggleConfig,
}

/// Attachment with no options beyond being switched on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToggleConfig {
    pub enabled: bool,
    pub order: Option<i32>,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AxeConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    pub cut_trees: bool,
    pub cut_tapped_trees: bool,
    pub cut_fruit_trees: bool,
    pub cut_giant_crops: bool,
    pub clear_debris: bool,
    pub clear_dead_crops: bool,
    pub clear_live_crops: bool,
}

impl Default for AxeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            cut_trees: false,
            cut_tapped_trees: false,
            cut_fruit_trees: false,
            cut_giant_crops: false,
            clear_debris: true,
            clear_dead_crops: true,
            clear_live_crops: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoeConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    pub till_dirt: bool,
    pub clear_weeds: bool,
    pub dig_artifact_spots: bool,
}

impl Default for HoeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            till_dirt: true,
            clear_weeds: true,
            dig_artifact_spots: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickaxeConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    pub break_nodes: bool,
    pub break_boulders: bool,
    pub clear_debris: bool,
    pub clear_dead_crops: bool,
    pub clear_dirt: bool,
    pub break_flooring: bool,
}

impl Default for PickaxeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            break_nodes: true,
            break_boulders: true,
            clear_debris: true,
            clear_dead_crops: true,
            clear_dirt: true,
            break_flooring: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScytheConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    pub harvest_crops: bool,
    pub harvest_flowers: bool,
    pub harvest_forage: bool,
    pub harvest_fruit_trees: bool,
    pub harvest_grass: bool,
    pub clear_dead_crops: bool,
    pub clear_weeds: bool,
}

impl Default for ScytheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            harvest_crops: true,
            harvest_flowers: true,
            harvest_forage: true,
            harvest_fruit_trees: true,
            harvest_grass: true,
            clear_dead_crops: true,
            clear_weeds: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeleeWeaponConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    pub attack_monsters: bool,
    pub break_mine_containers: bool,
    pub clear_dead_crops: bool,
    /// Minimum update ticks between two successful uses.
    pub rate_limit_ticks: i32,
}

impl MeleeWeaponConfig {
    pub fn rate_limit(&self) -> Result<u32, ConfigError> {
        u32::try_from(self.rate_limit_ticks).map_err(|_| ConfigError::NegativeRateLimit {
            attachment: "melee_weapon",
            value: self.rate_limit_ticks,
        })
    }
}

impl Default for MeleeWeaponConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            attack_monsters: true,
            break_mine_containers: true,
            clear_dead_crops: true,
            rate_limit_ticks: 30,
        }
    }
}

/// Milk pail and shears.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimalToolConfig {
    pub enabled: bool,
    pub order: Option<i32>,
    /// Seconds of simulation time before the same animal is tried again.
    pub cooldown_secs: f32,
}

impl AnimalToolConfig {
    pub const DEFAULT_COOLDOWN_SECS: f32 = 5.0;

    pub fn cooldown(&self, attachment: &'static str) -> Result<std::time::Duration, ConfigError> {
        std::time::Duration::try_from_secs_f32(self.cooldown_secs).map_err(|_| {
            ConfigError::InvalidCooldown {
                attachment,
                value: self.cooldown_secs,
            }
        })
    }
}

impl Default for AnimalToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            order: None,
            cooldown_secs: Self::DEFAULT_COOLDOWN_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TractorConfig::default();
        assert_eq!(config.radius(), Ok(1));
        assert_eq!(config.interval(), Ok(12));
        assert_eq!(config.attachments.melee_weapon.rate_limit(), Ok(30));
        assert!(config.attachments.milk_pail.cooldown("milk_pail").is_ok());
    }

    #[test]
    fn malformed_radius_falls_back_to_default() {
        let config = TractorConfig {
            distance: -3,
            ..TractorConfig::default()
        };
        assert_eq!(config.radius(), Err(ConfigError::NegativeRadius(-3)));
        assert_eq!(config.effective_radius(), 1);

        let config = TractorConfig {
            distance: 40,
            ..TractorConfig::default()
        };
        assert!(matches!(
            config.radius(),
            Err(ConfigError::RadiusTooLarge { value: 40, .. })
        ));
    }

    #[test]
    fn zero_interval_falls_back_to_default() {
        let config = TractorConfig {
            ticks_per_action: 0,
            ..TractorConfig::default()
        };
        assert_eq!(config.interval(), Err(ConfigError::ZeroInterval));
        assert_eq!(
            config.effective_interval(),
            TractorConfig::DEFAULT_TICKS_PER_ACTION
        );
    }

    #[test]
    fn invalid_cooldowns_are_rejected() {
        for value in [-1.0, f32::NAN, f32::INFINITY] {
            let config = AnimalToolConfig {
                cooldown_secs: value,
                ..AnimalToolConfig::default()
            };
            assert!(config.cooldown("shears").is_err());
        }
    }
}
