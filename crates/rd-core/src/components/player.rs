//! Player run data

use serde::{Deserialize, Serialize};

use crate::data::CharacterId;

/// Player-specific run bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerComponent {
    pub name: String,
    pub character: CharacterId,
    pub gold: u32,
    /// Modified by blessings and character
    pub gold_multiplier: f64,
    pub monsters_killed: u32,
    pub items_collected: u32,
}

impl Default for PlayerComponent {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            character: CharacterId::Warrior,
            gold: 0,
            gold_multiplier: 1.0,
            monsters_killed: 0,
            items_collected: 0,
        }
    }
}

impl PlayerComponent {
    /// Add gold after the multiplier; returns the amount added
    pub fn add_gold(&mut self, amount: u32) -> u32 {
        let actual = (amount as f64 * self.gold_multiplier).max(0.0) as u32;
        self.gold = self.gold.saturating_add(actual);
        actual
    }

    pub fn record_kills(&mut self, count: u32) {
        self.monsters_killed = self.monsters_killed.saturating_add(count);
    }
}
