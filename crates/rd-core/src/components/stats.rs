//! Combat statistics shared by players and monsters

use serde::{Deserialize, Serialize};

/// Combat-relevant numbers for one entity
///
/// `current_hp` never exceeds `max_hp`. Damage and healing saturate at the
/// bounds and report the amount actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    // Health
    pub max_hp: u32,
    pub current_hp: u32,

    // Offense
    pub base_damage: f64,
    /// Attacks per second
    pub attack_speed: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    /// Added after defense and resistance
    pub true_damage: f64,
    /// Fraction of dealt damage healed back
    pub life_steal: f64,
    /// Fraction of a primary hit splashed onto every other foe
    pub cleave: f64,

    // Defense
    /// Flat reduction
    pub defense: u32,
    /// Percentage reduction
    pub resistance: f64,
    pub dodge_chance: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            max_hp: 100,
            current_hp: 100,
            base_damage: 10.0,
            attack_speed: 1.0,
            crit_chance: 0.05,
            crit_multiplier: 2.0,
            true_damage: 0.0,
            life_steal: 0.0,
            cleave: 0.0,
            defense: 0,
            resistance: 0.0,
            dodge_chance: 0.0,
        }
    }
}

impl Stats {
    /// Default stats at full health with the given maximum
    pub fn with_hp(max_hp: u32) -> Self {
        Self {
            max_hp,
            current_hp: max_hp,
            ..Self::default()
        }
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Apply damage and return the damage actually taken
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current_hp);
        self.current_hp -= actual;
        actual
    }

    /// Heal and return the healing actually done
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.max_hp.saturating_sub(self.current_hp);
        let actual = amount.min(missing);
        self.current_hp += actual;
        actual
    }

    pub fn full_heal(&mut self) {
        self.current_hp = self.max_hp;
    }

    /// Current HP as a fraction of max (0 when max is 0)
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.current_hp as f64 / self.max_hp as f64
        }
    }

    pub fn missing_hp_fraction(&self) -> f64 {
        1.0 - self.hp_fraction()
    }

    /// Seconds between attacks, with speed floored at `min_speed`
    pub fn attack_interval(&self, min_speed: f64) -> f64 {
        1.0 / self.attack_speed.max(min_speed)
    }
}
