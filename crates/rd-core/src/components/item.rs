//! Item data: bonuses, rarity, theme and element

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Item rarity levels
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
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythical,
}

impl Rarity {
    /// Stat multiplier for this rarity
    pub const fn multiplier(&self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 1.3,
            Self::Rare => 1.7,
            Self::Epic => 2.2,
            Self::Legendary => 3.0,
            Self::Mythical => 4.0,
        }
    }
}

/// Equipment category, which decides the slot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ItemType {
    #[default]
    Weapon,
    Armor,
    Jewelry,
}

/// Cosmetic family that unlocks combat effects
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
pub enum Theme {
    #[default]
    None,
    Cyberpunk,
    Steampunk,
    Magical,
    Elemental,
    Angelic,
    Demonic,
}

/// Elemental subtype, only meaningful for [`Theme::Elemental`]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Wind,
    Earth,
    Electric,
}

/// Properties of an item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemComponent {
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub level: u32,
    pub template_id: String,

    // Offense bonuses
    pub damage_bonus: f64,
    pub attack_speed_bonus: f64,
    pub crit_chance_bonus: f64,
    pub crit_multiplier_bonus: f64,
    pub true_damage_bonus: f64,
    pub life_steal_bonus: f64,
    pub cleave_bonus: f64,

    // Defense bonuses
    pub defense_bonus: u32,
    pub hp_bonus: u32,
    pub resistance_bonus: f64,
    pub dodge_bonus: f64,

    pub theme: Theme,
    pub element: Option<Element>,
}

impl Default for ItemComponent {
    fn default() -> Self {
        Self {
            name: String::new(),
            item_type: ItemType::Weapon,
            rarity: Rarity::Common,
            level: 1,
            template_id: String::new(),
            damage_bonus: 0.0,
            attack_speed_bonus: 0.0,
            crit_chance_bonus: 0.0,
            crit_multiplier_bonus: 0.0,
            true_damage_bonus: 0.0,
            life_steal_bonus: 0.0,
            cleave_bonus: 0.0,
            defense_bonus: 0,
            hp_bonus: 0,
            resistance_bonus: 0.0,
            dodge_bonus: 0.0,
            theme: Theme::None,
            element: None,
        }
    }
}

impl ItemComponent {
    /// Element, if this item is elemental
    pub fn active_element(&self) -> Option<Element> {
        match self.theme {
            Theme::Elemental => self.element,
            _ => None,
        }
    }

    /// Strength of this item's theme effects: rarity × (1 + 10% per level above 1)
    pub fn effect_scale(&self) -> f64 {
        let level_factor = 1.0 + 0.1 * self.level.saturating_sub(1) as f64;
        self.rarity.multiplier() * level_factor
    }

    /// Gold value when sold
    pub fn sell_value(&self) -> u32 {
        let level_factor = 1.0 + 0.2 * self.level.saturating_sub(1) as f64;
        (10.0 * level_factor * self.rarity.multiplier()) as u32
    }

    /// Item name without a legacy `" +{level}"` suffix
    pub fn base_name(&self) -> &str {
        let suffix = format!(" +{}", self.level);
        self.name
            .strip_suffix(suffix.as_str())
            .unwrap_or(self.name.as_str())
    }

    pub fn display_name(&self) -> String {
        format!("T{}: {}", self.level, self.base_name())
    }

    /// Short comma-separated summary of positive bonuses
    pub fn stat_summary(&self) -> String {
        let mut parts = Vec::new();
        if self.damage_bonus > 0.0 {
            parts.push(format!("+{:.0} dmg", self.damage_bonus));
        }
        if self.attack_speed_bonus > 0.0 {
            parts.push(format!("+{:.0}% spd", self.attack_speed_bonus * 100.0));
        }
        if self.crit_chance_bonus > 0.0 {
            parts.push(format!("+{:.0}% crit", self.crit_chance_bonus * 100.0));
        }
        if self.defense_bonus > 0 {
            parts.push(format!("+{} def", self.defense_bonus));
        }
        if self.hp_bonus > 0 {
            parts.push(format!("+{} HP", self.hp_bonus));
        }
        if self.life_steal_bonus > 0.0 {
            parts.push(format!("+{:.0}% ls", self.life_steal_bonus * 100.0));
        }
        if self.dodge_bonus > 0.0 {
            parts.push(format!("+{:.0}% dodge", self.dodge_bonus * 100.0));
        }
        if parts.is_empty() {
            "no bonuses".to_string()
        } else {
            parts.join(", ")
        }
    }
}
