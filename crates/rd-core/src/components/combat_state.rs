//! Per-player combat state

use serde::{Deserialize, Serialize};

use crate::ecs::EntityId;

/// Ordered, append-only list of human-readable combat events
///
/// Only [`CombatState::start_combat`] empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    fn reset(&mut self) {
        self.entries.clear();
    }
}

/// Ephemeral combat bookkeeping owned by the player entity
///
/// One instance is reused across encounters: reset by `start_combat`,
/// finalized by `end_combat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub in_combat: bool,
    /// Primary opponent (a reference, not ownership)
    pub opponent_id: Option<EntityId>,
    pub combat_tick: u32,
    /// Simulated time at which the player next attacks
    pub next_attack_tick: f64,
    /// Simulated time at which the primary opponent next attacks
    pub opponent_next_attack_tick: f64,
    pub combat_log: CombatLog,

    // Combat results
    pub victory: Option<bool>,
    pub damage_dealt: u32,
    pub damage_taken: u32,
}

impl CombatState {
    /// Reset everything for a fresh encounter against `opponent`
    pub fn start_combat(&mut self, opponent: EntityId) {
        self.in_combat = true;
        self.opponent_id = Some(opponent);
        self.combat_tick = 0;
        self.next_attack_tick = 0.0;
        self.opponent_next_attack_tick = 0.0;
        self.combat_log.reset();
        self.combat_log.push("Combat started!");
        self.victory = None;
        self.damage_dealt = 0;
        self.damage_taken = 0;
    }

    /// Record the outcome and append the summary line
    pub fn end_combat(&mut self, victory: bool) {
        self.in_combat = false;
        self.victory = Some(victory);
        let result = if victory { "VICTORY!" } else { "DEFEAT..." };
        self.combat_log.push(format!("Combat ended: {result}"));
    }

    pub fn add_log(&mut self, message: impl Into<String>) {
        self.combat_log.push(message);
    }

    /// Leave combat without touching the log or totals
    pub fn clear(&mut self) {
        self.in_combat = false;
        self.opponent_id = None;
        self.combat_tick = 0;
        self.next_attack_tick = 0.0;
        self.opponent_next_attack_tick = 0.0;
        self.victory = None;
    }
}
