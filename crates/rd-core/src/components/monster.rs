//! Monster template data

use serde::{Deserialize, Serialize};

/// A named boss move that scales one attack's damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialMove {
    pub name: String,
    pub damage_mult: f64,
}

/// Static, template-derived monster data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterComponent {
    pub name: String,
    pub template_id: String,
    /// Difficulty tier
    pub tier: u32,

    pub sprite_name: String,

    // Loot
    pub drop_chance: f64,
    pub gold_reward: u32,
    pub xp_reward: u32,

    /// Used in rotation by bosses
    pub special_moves: Vec<SpecialMove>,
}

impl Default for MonsterComponent {
    fn default() -> Self {
        Self {
            name: String::new(),
            template_id: String::new(),
            tier: 1,
            sprite_name: "goblin".to_string(),
            drop_chance: 0.5,
            gold_reward: 10,
            xp_reward: 10,
            special_moves: Vec::new(),
        }
    }
}

impl MonsterComponent {
    /// Name with a tier suffix above tier 1
    pub fn display_name(&self) -> String {
        if self.tier > 1 {
            format!("{} (Tier {})", self.name, self.tier)
        } else {
            self.name.clone()
        }
    }

    pub fn has_special_moves(&self) -> bool {
        !self.special_moves.is_empty()
    }
}
