//! Status effects that evolve tick by tick during a combat

/// Stacking damage-over-time on the primary target
///
/// All stacks share one timer, refreshed whenever a stack is added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurnState {
    stacks: u8,
    remaining_ticks: u32,
}

impl BurnState {
    pub fn stacks(&self) -> u8 {
        self.stacks
    }

    pub fn is_active(&self) -> bool {
        self.stacks > 0 && self.remaining_ticks > 0
    }

    /// Add a stack (capped) and refresh the timer
    pub fn ignite(&mut self, max_stacks: u8, duration_ticks: u32) {
        self.stacks = self.stacks.saturating_add(1).min(max_stacks);
        self.remaining_ticks = duration_ticks;
    }

    /// Damage for this tick, advancing the timer
    pub fn tick(&mut self, per_stack: u32) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        let damage = self.stacks as u32 * per_stack;
        self.remaining_ticks -= 1;
        if self.remaining_ticks == 0 {
            self.stacks = 0;
        }
        Some(damage)
    }

    pub fn extinguish(&mut self) {
        *self = Self::default();
    }
}

/// Debuffs carried by one monster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoeStatus {
    soak_ticks: u32,
    paralysis_ticks: u32,
    flinch: bool,
}

impl FoeStatus {
    pub fn soak(&mut self, ticks: u32) {
        self.soak_ticks = self.soak_ticks.max(ticks);
    }

    pub fn is_soaked(&self) -> bool {
        self.soak_ticks > 0
    }

    pub fn paralyze(&mut self, ticks: u32) {
        self.paralysis_ticks = self.paralysis_ticks.max(ticks);
    }

    pub fn is_paralyzed(&self) -> bool {
        self.paralysis_ticks > 0
    }

    pub fn paralysis_remaining(&self) -> u32 {
        self.paralysis_ticks
    }

    pub fn flinch(&mut self) {
        self.flinch = true;
    }

    /// Consume a pending flinch
    pub fn take_flinch(&mut self) -> bool {
        core::mem::take(&mut self.flinch)
    }

    /// Count timed windows down by one tick
    pub fn advance(&mut self) {
        self.soak_ticks = self.soak_ticks.saturating_sub(1);
        self.paralysis_ticks = self.paralysis_ticks.saturating_sub(1);
    }
}

/// Counters on the player's side of a combat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    /// Attacks since the last steam burst
    pub pressure: u32,
    /// Consecutive mana-burst procs
    pub mana_streak: u32,
    /// Next enemy attack is weakened
    pub neural_hack_pending: bool,
    pub guardian_used: bool,
}

impl PlayerStatus {
    /// Count one attack; true when a burst is due
    pub fn build_pressure(&mut self, interval: u32) -> bool {
        self.pressure += 1;
        if self.pressure >= interval.max(1) {
            self.pressure = 0;
            true
        } else {
            false
        }
    }

    pub fn take_neural_hack(&mut self) -> bool {
        core::mem::take(&mut self.neural_hack_pending)
    }
}
