//! The damage formula
//!
//! Every attack in combat, including free procs such as a steam burst, goes
//! through [`calculate_damage`].

use crate::GameRng;
use crate::components::Stats;

/// Situational scaling applied after mitigation and before the floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageModifiers {
    pub multiplier: f64,
    /// Flat damage added after the multiplier
    pub bonus: f64,
}

impl DamageModifiers {
    pub const NONE: Self = Self {
        multiplier: 1.0,
        bonus: 0.0,
    };

    pub fn amplify(mut self, factor: f64) -> Self {
        self.multiplier *= factor;
        self
    }

    pub fn with_bonus(mut self, bonus: f64) -> Self {
        self.bonus += bonus;
        self
    }
}

impl Default for DamageModifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// Result of one attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Evaded entirely; no mitigation was computed
    Dodged,
    Hit { damage: u32, critical: bool },
}

impl AttackOutcome {
    pub fn damage(&self) -> u32 {
        match self {
            Self::Dodged => 0,
            Self::Hit { damage, .. } => *damage,
        }
    }

    pub fn is_dodged(&self) -> bool {
        matches!(self, Self::Dodged)
    }
}

/// Resolve a single attack
///
/// Crit and dodge are independent draws (crit first). A dodge short-circuits
/// to [`AttackOutcome::Dodged`]; any other outcome deals at least 1.
pub fn calculate_damage(
    attacker: &Stats,
    defender: &Stats,
    modifiers: DamageModifiers,
    rng: &mut GameRng,
) -> AttackOutcome {
    let mut damage = attacker.base_damage;

    let critical = rng.chance(attacker.crit_chance);
    if critical {
        damage *= attacker.crit_multiplier;
    }

    if rng.chance(defender.dodge_chance) {
        return AttackOutcome::Dodged;
    }

    damage -= defender.defense as f64;
    damage *= 1.0 - defender.resistance;
    damage += attacker.true_damage;
    damage = damage * modifiers.multiplier + modifiers.bonus;

    AttackOutcome::Hit {
        damage: damage.floor().max(1.0) as u32,
        critical,
    }
}
