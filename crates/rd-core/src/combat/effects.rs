//! Theme and element effects active for one combat
//!
//! Derived once from the player's equipped items when a combat starts and
//! held constant until it ends. Each effect takes the strongest item that
//! grants it; effects of the same kind do not stack across items.

use bitflags::bitflags;

use super::CombatConfig;
use crate::components::{Element, EquipmentComponent, ItemComponent, Theme};
use crate::ecs::{EntityId, World};

bitflags! {
    /// Which effects are enabled for the current combat
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EffectFlags: u16 {
        const BURN = 1 << 0;
        const SOAK = 1 << 1;
        const FLINCH = 1 << 2;
        const TREMOR = 1 << 3;
        const PARALYZE = 1 << 4;
        const PRESSURE = 1 << 5;
        const MANA_BURST = 1 << 6;
        const NEURAL_HACK = 1 << 7;
        const CREDIT_SKIM = 1 << 8;
        const ANGELIC_HEAL = 1 << 9;
        const GUARDIAN_ANGEL = 1 << 10;
        const BLOOD_PRICE = 1 << 11;
        const FURY = 1 << 12;
        const SOUL_HARVEST = 1 << 13;
    }
}

/// Upper bound on consecutive mana-burst amplification
pub const MANA_STREAK_CAP: u32 = 5;

/// Enabled effects and their magnitudes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveEffects {
    pub flags: EffectFlags,

    // Fire
    pub burn_chance: f64,
    pub burn_per_stack: u32,
    pub burn_ticks: u32,

    // Water
    pub soak_chance: f64,
    pub soak_ticks: u32,

    // Wind
    pub flinch_chance: f64,

    // Earth
    pub tremor_chance: f64,
    /// Seconds added to the target's next attack
    pub tremor_delay: f64,

    // Electric
    pub paralyze_chance: f64,
    pub paralyze_ticks: u32,

    // Steampunk
    /// Player attacks per steam burst
    pub pressure_interval: u32,
    pub burst_multiplier: f64,

    // Magical
    pub mana_chance: f64,
    /// Fraction of base damage added by a first mana burst
    pub mana_fraction: f64,

    // Cyberpunk
    pub neural_chance: f64,
    pub credit_skim: f64,

    // Angelic
    pub heal_fraction: f64,

    // Demonic
    /// Fraction of max HP paid per attack
    pub blood_price: f64,
    pub fury_scaling: f64,
    pub harvest_fraction: f64,
}

impl ActiveEffects {
    /// No effects
    pub fn none() -> Self {
        Self::default()
    }

    /// Effects granted by whatever `entity` has equipped
    ///
    /// Missing equipment or dangling item references contribute nothing.
    pub fn for_entity(world: &World, entity: EntityId, config: &CombatConfig) -> Self {
        let Some(equipment) = world.get_component::<EquipmentComponent>(entity) else {
            return Self::none();
        };
        let items = equipment
            .all_equipped()
            .into_iter()
            .filter_map(|id| world.get_component::<ItemComponent>(id));
        Self::from_items(items, config)
    }

    pub fn from_items<'a, I>(items: I, config: &CombatConfig) -> Self
    where
        I: IntoIterator<Item = &'a ItemComponent>,
    {
        let items: Vec<&ItemComponent> = items.into_iter().collect();
        let strongest = |theme: Theme, element: Option<Element>| {
            items
                .iter()
                .filter(|item| item.theme == theme && item.active_element() == element)
                .map(|item| item.effect_scale())
                .reduce(f64::max)
        };

        let mut fx = Self::none();

        if let Some(s) = strongest(Theme::Elemental, Some(Element::Fire)) {
            fx.flags |= EffectFlags::BURN;
            fx.burn_chance = (0.25 * s).min(0.7);
            fx.burn_per_stack = ((2.0 * s).round() as u32).max(1);
            fx.burn_ticks = config.seconds_to_ticks(3.0);
        }
        if let Some(s) = strongest(Theme::Elemental, Some(Element::Water)) {
            fx.flags |= EffectFlags::SOAK;
            fx.soak_chance = (0.25 * s).min(0.6);
            fx.soak_ticks = config.seconds_to_ticks(3.0);
        }
        if let Some(s) = strongest(Theme::Elemental, Some(Element::Wind)) {
            fx.flags |= EffectFlags::FLINCH;
            fx.flinch_chance = (0.2 * s).min(0.5);
        }
        if let Some(s) = strongest(Theme::Elemental, Some(Element::Earth)) {
            fx.flags |= EffectFlags::TREMOR;
            fx.tremor_chance = (0.2 * s).min(0.5);
            fx.tremor_delay = 0.3 * s;
        }
        if let Some(s) = strongest(Theme::Elemental, Some(Element::Electric)) {
            fx.flags |= EffectFlags::PARALYZE;
            fx.paralyze_chance = (0.15 * s).min(0.5);
            fx.paralyze_ticks = config.seconds_to_ticks(1.0 + 0.5 * s);
        }
        if let Some(s) = strongest(Theme::Steampunk, None) {
            fx.flags |= EffectFlags::PRESSURE;
            fx.pressure_interval = (6.0 - s.floor()).max(2.0) as u32;
            fx.burst_multiplier = 1.0 + 0.25 * s;
        }
        if let Some(s) = strongest(Theme::Magical, None) {
            fx.flags |= EffectFlags::MANA_BURST;
            fx.mana_chance = (0.2 * s).min(0.6);
            fx.mana_fraction = 0.25 * s;
        }
        if let Some(s) = strongest(Theme::Cyberpunk, None) {
            fx.flags |= EffectFlags::NEURAL_HACK | EffectFlags::CREDIT_SKIM;
            fx.neural_chance = (0.15 * s).min(0.5);
            fx.credit_skim = 0.1 * s;
        }
        if let Some(s) = strongest(Theme::Angelic, None) {
            fx.flags |= EffectFlags::ANGELIC_HEAL | EffectFlags::GUARDIAN_ANGEL;
            fx.heal_fraction = 0.05 * s;
        }
        if let Some(s) = strongest(Theme::Demonic, None) {
            fx.flags |= EffectFlags::BLOOD_PRICE | EffectFlags::FURY | EffectFlags::SOUL_HARVEST;
            fx.blood_price = 0.02;
            fx.fury_scaling = 0.5 * s;
            fx.harvest_fraction = 0.05 * s;
        }

        fx
    }

    pub fn has(&self, flag: EffectFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Paralysis length; soaked targets are held twice as long
    pub fn paralysis_ticks(&self, soaked: bool) -> u32 {
        if soaked {
            self.paralyze_ticks * 2
        } else {
            self.paralyze_ticks
        }
    }

    /// Bonus damage for a mana burst that is the `streak`-th in a row
    pub fn mana_bonus(&self, base_damage: f64, streak: u32) -> f64 {
        let streak = streak.clamp(1, MANA_STREAK_CAP);
        (base_damage * self.mana_fraction * (1.0 + 0.5 * (streak - 1) as f64)).floor()
    }

    /// HP paid for one demonic attack
    pub fn blood_price_cost(&self, max_hp: u32) -> u32 {
        ((max_hp as f64 * self.blood_price).floor() as u32).max(1)
    }

    /// Damage multiplier from demonic fury at the given missing-HP fraction
    pub fn fury_multiplier(&self, missing_fraction: f64) -> f64 {
        1.0 + missing_fraction.clamp(0.0, 1.0) * self.fury_scaling
    }
}
