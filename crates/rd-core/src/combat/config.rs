//! Tunable combat constants

use serde::{Deserialize, Serialize};

use crate::{MAX_BURN_STACKS, MAX_TICKS, MIN_ATTACK_SPEED, TICKS_PER_SECOND};

/// Combat engine configuration
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub ticks_per_second: u32,
    /// Safety cap; reaching it ends the combat as a stalemate
    pub max_ticks: u32,
    pub min_attack_speed: f64,
    pub max_burn_stacks: u8,
    /// Damage multiplier against soaked targets
    pub soak_amplifier: f64,
    /// Fraction removed from an attack weakened by a neural hack
    pub neural_hack_reduction: f64,
    /// HP fraction below which angelic healing is doubled
    pub desperate_threshold: f64,
    pub desperate_multiplier: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            max_ticks: MAX_TICKS,
            min_attack_speed: MIN_ATTACK_SPEED,
            max_burn_stacks: MAX_BURN_STACKS,
            soak_amplifier: 1.25,
            neural_hack_reduction: 0.4,
            desperate_threshold: 0.25,
            desperate_multiplier: 2.0,
        }
    }
}

impl CombatConfig {
    /// Simulated seconds per tick
    pub fn tick_duration(&self) -> f64 {
        1.0 / self.ticks_per_second.max(1) as f64
    }

    /// Convert a duration in seconds to whole ticks (at least one)
    pub fn seconds_to_ticks(&self, seconds: f64) -> u32 {
        ((seconds * self.ticks_per_second.max(1) as f64).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CombatConfig::default();
        assert_eq!(config.ticks_per_second, 10);
        assert_eq!(config.max_ticks, 1000);
        assert!((config.tick_duration() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CombatConfig = serde_json::from_str(r#"{"max_ticks": 50}"#).unwrap();
        assert_eq!(config.max_ticks, 50);
        assert_eq!(config.max_burn_stacks, 3);
    }

    #[test]
    fn test_seconds_to_ticks() {
        let config = CombatConfig::default();
        assert_eq!(config.seconds_to_ticks(3.0), 30);
        assert_eq!(config.seconds_to_ticks(0.0), 1);
    }
}
