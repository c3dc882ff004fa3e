//! Core game constants

/// Simulated combat ticks per second
pub const TICKS_PER_SECOND: u32 = 10;

/// Simulated seconds covered by one tick
pub const TICK_DURATION: f64 = 1.0 / TICKS_PER_SECOND as f64;

/// Hard cap on ticks in a single combat
pub const MAX_TICKS: u32 = 1000;

/// Floor applied to attack speed before computing attack intervals
pub const MIN_ATTACK_SPEED: f64 = 0.1;

/// Maximum concurrent burn stacks
pub const MAX_BURN_STACKS: u8 = 3;

/// Number of jewelry slots on an equipment component
pub const JEWELRY_SLOTS: usize = 3;

/// Default inventory capacity
pub const INVENTORY_CAPACITY: usize = 20;

/// Base stats before character multipliers and equipment
pub const BASE_MAX_HP: f64 = 100.0;
pub const BASE_DAMAGE: f64 = 10.0;
pub const BASE_ATTACK_SPEED: f64 = 1.0;
pub const BASE_CRIT_CHANCE: f64 = 0.05;
pub const BASE_CRIT_MULTIPLIER: f64 = 2.0;
pub const BASE_DEFENSE: f64 = 5.0;

/// Upper clamp for derived resistance and dodge
pub const MAX_RESISTANCE: f64 = 0.9;
pub const MAX_DODGE: f64 = 0.9;
