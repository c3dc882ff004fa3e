//! Playable character templates
//!
//! Each character scales the base stats used by equipment recalculation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Playable characters
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum CharacterId {
    #[default]
    Warrior,
    Rogue,
    Berserker,
    Paladin,
    Gambler,
    Mage,
}

/// Stat multipliers and restrictions for a character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTemplate {
    pub name: &'static str,
    /// Gold cost to unlock (0 = starter)
    pub cost: u32,
    pub hp_mult: f64,
    pub damage_mult: f64,
    pub crit_chance_mult: f64,
    pub crit_damage_mult: f64,
    pub attack_speed_mult: f64,
    pub defense_mult: f64,
    /// Flat life steal
    pub life_steal_base: f64,
    pub gold_mult: f64,
    pub can_equip_armor: bool,
}

const BALANCED: CharacterTemplate = CharacterTemplate {
    name: "",
    cost: 0,
    hp_mult: 1.0,
    damage_mult: 1.0,
    crit_chance_mult: 1.0,
    crit_damage_mult: 1.0,
    attack_speed_mult: 1.0,
    defense_mult: 1.0,
    life_steal_base: 0.0,
    gold_mult: 1.0,
    can_equip_armor: true,
};

impl CharacterId {
    pub const fn template(&self) -> CharacterTemplate {
        match self {
            Self::Warrior => CharacterTemplate {
                name: "Warrior",
                hp_mult: 1.1,
                ..BALANCED
            },
            Self::Rogue => CharacterTemplate {
                name: "Rogue",
                cost: 500,
                hp_mult: 0.8,
                crit_chance_mult: 1.15,
                attack_speed_mult: 1.1,
                ..BALANCED
            },
            Self::Berserker => CharacterTemplate {
                name: "Berserker",
                cost: 750,
                damage_mult: 1.3,
                life_steal_base: 0.1,
                ..BALANCED
            },
            Self::Paladin => CharacterTemplate {
                name: "Paladin",
                cost: 600,
                damage_mult: 0.85,
                defense_mult: 1.2,
                ..BALANCED
            },
            Self::Gambler => CharacterTemplate {
                name: "Gambler",
                cost: 800,
                hp_mult: 0.85,
                damage_mult: 0.85,
                crit_chance_mult: 0.85,
                defense_mult: 0.85,
                gold_mult: 1.3,
                ..BALANCED
            },
            Self::Mage => CharacterTemplate {
                name: "Mage",
                cost: 1000,
                hp_mult: 0.7,
                can_equip_armor: false,
                ..BALANCED
            },
        }
    }
}
