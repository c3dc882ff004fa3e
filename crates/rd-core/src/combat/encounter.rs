//! The tick loop shared by single- and multi-monster combat
//!
//! A single-monster fight is an encounter with one foe; the only
//! differences are the foe's log label and that cleave needs a second foe.

use tracing::{debug, warn};

use super::damage::{AttackOutcome, DamageModifiers, calculate_damage};
use super::effects::{ActiveEffects, EffectFlags, MANA_STREAK_CAP};
use super::status::{BurnState, FoeStatus, PlayerStatus};
use super::{CombatConfig, CombatPhase};
use crate::GameRng;
use crate::components::{CombatState, MonsterComponent, SpecialMove, Stats};
use crate::ecs::EntityId;

/// Slack for comparing simulated time against attack thresholds
const TIME_EPSILON: f64 = 1e-9;

fn reached(now: f64, threshold: f64) -> bool {
    now + TIME_EPSILON >= threshold
}

/// One monster taking part in an encounter
#[derive(Debug, Clone)]
pub(crate) struct Foe {
    pub id: EntityId,
    /// Name used in the combat log
    pub label: String,
    pub stats: Stats,
    pub monster: Option<MonsterComponent>,
    pub next_attack: f64,
    pub status: FoeStatus,
    pub attacks_made: u32,
    pub slain: bool,
}

impl Foe {
    pub fn new(
        id: EntityId,
        label: String,
        stats: Stats,
        monster: Option<MonsterComponent>,
    ) -> Self {
        Self {
            id,
            label,
            stats,
            monster,
            next_attack: 0.0,
            status: FoeStatus::default(),
            attacks_made: 0,
            slain: false,
        }
    }

    /// Special move for the attack just counted, if one is due
    fn special_move(&self) -> Option<SpecialMove> {
        let moves = &self.monster.as_ref()?.special_moves;
        if moves.is_empty() || self.attacks_made == 0 || self.attacks_made % 3 != 0 {
            return None;
        }
        let index = (self.attacks_made / 3 - 1) as usize % moves.len();
        moves.get(index).cloned()
    }
}

/// Simulation state for one combat, checked out of the world
pub(crate) struct Encounter<'c> {
    config: &'c CombatConfig,
    pub player: Stats,
    pub state: CombatState,
    pub foes: Vec<Foe>,
    effects: ActiveEffects,
    status: PlayerStatus,
    burn: BurnState,
    pub phase: CombatPhase,
    pub kills: u32,
    pub timed_out: bool,
}

impl<'c> Encounter<'c> {
    pub fn new(
        config: &'c CombatConfig,
        player: Stats,
        state: CombatState,
        foes: Vec<Foe>,
        effects: ActiveEffects,
    ) -> Self {
        Self {
            config,
            player,
            state,
            foes,
            effects,
            status: PlayerStatus::default(),
            burn: BurnState::default(),
            phase: CombatPhase::NotStarted,
            kills: 0,
            timed_out: false,
        }
    }

    fn log(&mut self, line: impl Into<String>) {
        self.state.add_log(line);
    }

    /// Intro lines; `start_combat` has already written "Combat started!"
    fn announce(&mut self) {
        let player_line = format!("Your HP: {}/{}", self.player.current_hp, self.player.max_hp);
        let intros: Vec<String> = self
            .foes
            .iter()
            .map(|foe| {
                let name = foe
                    .monster
                    .as_ref()
                    .map(MonsterComponent::display_name)
                    .unwrap_or_else(|| foe.label.clone());
                format!("You encounter a {name}!")
            })
            .collect();
        for line in intros {
            self.log(line);
        }
        self.log(player_line);
        if let [foe] = self.foes.as_slice() {
            let line = format!("Enemy HP: {}/{}", foe.stats.current_hp, foe.stats.max_hp);
            self.log(line);
        }
    }

    /// Run ticks until the combat reaches a terminal phase or the tick cap
    pub fn run(&mut self, rng: &mut GameRng) {
        self.announce();
        self.phase = CombatPhase::Running;
        self.check_end();

        while self.phase == CombatPhase::Running {
            if self.state.combat_tick >= self.config.max_ticks {
                self.timed_out = true;
                self.phase = CombatPhase::Defeat;
                let line = format!(
                    "Combat timed out after {} ticks - stalemate",
                    self.state.combat_tick
                );
                self.log(line);
                warn!(
                    ticks = self.state.combat_tick,
                    player_hp = self.player.current_hp,
                    "combat reached the tick cap without a winner"
                );
                break;
            }
            self.process_tick(rng);
        }
    }

    fn primary_target(&self) -> Option<usize> {
        self.foes.iter().position(|foe| foe.stats.is_alive())
    }

    fn process_tick(&mut self, rng: &mut GameRng) {
        self.state.combat_tick += 1;
        let now = self.state.combat_tick as f64 * self.config.tick_duration();
        let stamp = format!("[{now:.1}s]");

        self.apply_burn(&stamp);
        for foe in &mut self.foes {
            foe.status.advance();
        }

        if reached(now, self.state.next_attack_tick) {
            if let Some(target) = self.primary_target() {
                self.player_attack(target, &stamp, rng);
                self.state.next_attack_tick =
                    now + self.player.attack_interval(self.config.min_attack_speed);
            }
        }

        for idx in 0..self.foes.len() {
            if !self.player.is_alive() {
                break;
            }
            if !self.foes[idx].stats.is_alive() || !reached(now, self.foes[idx].next_attack) {
                continue;
            }
            let interval = self.foes[idx]
                .stats
                .attack_interval(self.config.min_attack_speed);
            self.foes[idx].next_attack = now + interval;
            self.foe_attack(idx, &stamp, rng);
        }

        if let Some(target) = self.primary_target() {
            self.state.opponent_next_attack_tick = self.foes[target].next_attack;
        }
        self.check_end();
    }

    fn check_end(&mut self) {
        if self.phase != CombatPhase::Running {
            return;
        }
        if self.foes.iter().all(|foe| !foe.stats.is_alive()) {
            if self.foes.len() > 1 {
                self.log("All enemies defeated!");
            }
            self.phase = CombatPhase::Victory;
        } else if !self.player.is_alive() {
            self.log("You have been defeated...");
            self.phase = CombatPhase::Defeat;
        }
    }

    fn apply_burn(&mut self, stamp: &str) {
        if !self.burn.is_active() {
            return;
        }
        let Some(target) = self.primary_target() else {
            self.burn.extinguish();
            return;
        };
        let stacks = self.burn.stacks();
        if let Some(damage) = self.burn.tick(self.effects.burn_per_stack) {
            let dealt = self.foes[target].stats.take_damage(damage);
            self.state.damage_dealt += dealt;
            let line = format!(
                "{stamp} [Burn] {} takes {dealt} fire damage! ({stacks} stacks)",
                self.foes[target].label
            );
            self.log(line);
            self.handle_kill(target);
        }
    }

    /// Record a kill the first time a foe is seen at zero HP
    fn handle_kill(&mut self, idx: usize) {
        let foe = &mut self.foes[idx];
        if foe.stats.is_alive() || foe.slain {
            return;
        }
        foe.slain = true;
        self.kills += 1;
        let line = format!("{} defeated!", foe.label);
        debug!(foe = %foe.id, kills = self.kills, "monster slain");
        self.log(line);

        if self.effects.has(EffectFlags::SOUL_HARVEST) {
            let amount = (self.player.max_hp as f64 * self.effects.harvest_fraction).floor() as u32;
            let healed = self.player.heal(amount);
            if healed > 0 {
                self.log(format!("  [Demonic] Soul harvest: +{healed} HP"));
            }
        }
    }

    fn player_attack(&mut self, target: usize, stamp: &str, rng: &mut GameRng) {
        if self.effects.has(EffectFlags::BLOOD_PRICE) {
            let cost = self
                .effects
                .blood_price_cost(self.player.max_hp)
                .min(self.player.current_hp.saturating_sub(1));
            if cost > 0 {
                self.player.current_hp -= cost;
                self.log(format!("  [Demonic] Blood price: -{cost} HP"));
            }
        }

        let mut modifiers = DamageModifiers::NONE;
        if self.foes[target].status.is_soaked() {
            modifiers = modifiers.amplify(self.config.soak_amplifier);
        }
        if self.effects.has(EffectFlags::FURY) {
            let fury = self
                .effects
                .fury_multiplier(self.player.missing_hp_fraction());
            modifiers = modifiers.amplify(fury);
        }
        let mana_bonus = self.roll_mana_burst(rng);
        if let Some(bonus) = mana_bonus {
            modifiers = modifiers.with_bonus(bonus);
        }

        let label = self.foes[target].label.clone();
        match calculate_damage(&self.player, &self.foes[target].stats, modifiers, rng) {
            AttackOutcome::Dodged => {
                self.log(format!("{stamp} {label} dodges your attack!"));
            }
            AttackOutcome::Hit { damage, critical } => {
                let dealt = self.foes[target].stats.take_damage(damage);
                self.state.damage_dealt += dealt;
                let crit = if critical { "CRITICAL! " } else { "" };
                let remaining = self.foes[target].stats.current_hp;
                self.log(format!(
                    "{stamp} {crit}You deal {dealt} damage! ({label}: {remaining} HP)"
                ));
                if let Some(bonus) = mana_bonus {
                    let streak = self.status.mana_streak;
                    self.log(format!("  [Mana Burst] +{bonus:.0} damage! (x{streak})"));
                }
                self.after_hit(target, dealt, rng);
            }
        }

        self.build_pressure(rng);
    }

    fn roll_mana_burst(&mut self, rng: &mut GameRng) -> Option<f64> {
        if !self.effects.has(EffectFlags::MANA_BURST) {
            return None;
        }
        if rng.chance(self.effects.mana_chance) {
            self.status.mana_streak = (self.status.mana_streak + 1).min(MANA_STREAK_CAP);
            Some(
                self.effects
                    .mana_bonus(self.player.base_damage, self.status.mana_streak),
            )
        } else {
            self.status.mana_streak = 0;
            None
        }
    }

    /// Sustain, procs, cleave and kill handling after a landed player hit
    fn after_hit(&mut self, target: usize, dealt: u32, rng: &mut GameRng) {
        let steal = (dealt as f64 * self.player.life_steal).floor() as u32;
        let stolen = self.player.heal(steal);
        if stolen > 0 {
            self.log(format!("  [Life steal: +{stolen} HP]"));
        }

        if self.effects.has(EffectFlags::ANGELIC_HEAL) {
            let mut fraction = self.effects.heal_fraction;
            let desperate = self.player.hp_fraction() < self.config.desperate_threshold;
            if desperate {
                fraction *= self.config.desperate_multiplier;
            }
            let healed = self.player.heal((dealt as f64 * fraction).floor() as u32);
            if healed > 0 {
                let note = if desperate { " (desperate)" } else { "" };
                self.log(format!("  [Angelic] Holy light heals +{healed} HP{note}"));
            }
        }

        if self.foes[target].stats.is_alive() {
            self.apply_procs(target, rng);
        }

        if self.foes.len() > 1 && self.player.cleave > 0.0 {
            let splash = (dealt as f64 * self.player.cleave.min(1.0)).floor() as u32;
            if splash > 0 {
                for idx in 0..self.foes.len() {
                    if idx == target || !self.foes[idx].stats.is_alive() {
                        continue;
                    }
                    let taken = self.foes[idx].stats.take_damage(splash);
                    self.state.damage_dealt += taken;
                    let line = format!("  [Cleave] {} takes {taken} damage!", self.foes[idx].label);
                    self.log(line);
                    self.handle_kill(idx);
                }
            }
        }

        self.handle_kill(target);
    }

    /// On-hit theme and element procs against a still-living target
    fn apply_procs(&mut self, target: usize, rng: &mut GameRng) {
        let fx = &self.effects;
        let label = self.foes[target].label.clone();
        let mut lines = Vec::new();

        if fx.has(EffectFlags::BURN) && rng.chance(fx.burn_chance) {
            self.burn.ignite(self.config.max_burn_stacks, fx.burn_ticks);
            lines.push(format!(
                "  [Fire] {label} is burning! ({} stacks)",
                self.burn.stacks()
            ));
        }
        if fx.has(EffectFlags::SOAK) && rng.chance(fx.soak_chance) {
            self.foes[target].status.soak(fx.soak_ticks);
            lines.push(format!("  [Water] {label} is soaked!"));
        }
        if fx.has(EffectFlags::PARALYZE) && rng.chance(fx.paralyze_chance) {
            let soaked = self.foes[target].status.is_soaked();
            let ticks = fx.paralysis_ticks(soaked);
            self.foes[target].status.paralyze(ticks);
            let note = if soaked { " Conducted through water!" } else { "" };
            lines.push(format!("  [Electric] {label} is paralyzed!{note}"));
        }
        if fx.has(EffectFlags::FLINCH) && rng.chance(fx.flinch_chance) {
            self.foes[target].status.flinch();
            lines.push(format!("  [Wind] {label} flinches!"));
        }
        if fx.has(EffectFlags::TREMOR) && rng.chance(fx.tremor_chance) {
            self.foes[target].next_attack += fx.tremor_delay;
            lines.push(format!("  [Earth] Tremor staggers {label}!"));
        }
        if fx.has(EffectFlags::NEURAL_HACK) && rng.chance(fx.neural_chance) {
            self.status.neural_hack_pending = true;
            lines.push(format!("  [Cyberpunk] Neural hack disrupts {label}!"));
        }

        if !lines.is_empty() {
            debug!(foe = %self.foes[target].id, procs = lines.len(), "on-hit effects");
        }
        for line in lines {
            self.log(line);
        }
    }

    fn build_pressure(&mut self, rng: &mut GameRng) {
        if !self.effects.has(EffectFlags::PRESSURE)
            || !self.status.build_pressure(self.effects.pressure_interval)
        {
            return;
        }
        let Some(target) = self.primary_target() else {
            return;
        };

        let burst = Stats {
            base_damage: self.player.base_damage * self.effects.burst_multiplier,
            ..self.player.clone()
        };
        let mut modifiers = DamageModifiers::NONE;
        if self.foes[target].status.is_soaked() {
            modifiers = modifiers.amplify(self.config.soak_amplifier);
        }
        match calculate_damage(&burst, &self.foes[target].stats, modifiers, rng) {
            AttackOutcome::Dodged => self.log("  [Steampunk] Steam burst misses!"),
            AttackOutcome::Hit { damage, .. } => {
                let dealt = self.foes[target].stats.take_damage(damage);
                self.state.damage_dealt += dealt;
                let line = format!(
                    "  [Steampunk] Steam burst hits {} for {dealt} damage!",
                    self.foes[target].label
                );
                self.log(line);
                self.handle_kill(target);
            }
        }
    }

    fn foe_attack(&mut self, idx: usize, stamp: &str, rng: &mut GameRng) {
        let label = self.foes[idx].label.clone();

        if self.foes[idx].status.is_paralyzed() {
            self.log(format!("{stamp} {label} is paralyzed and cannot attack!"));
            return;
        }
        if self.foes[idx].status.take_flinch() {
            self.log(format!("{stamp} {label} flinches and loses its attack!"));
            return;
        }

        self.foes[idx].attacks_made += 1;
        let mut modifiers = DamageModifiers::NONE;
        if let Some(special) = self.foes[idx].special_move() {
            modifiers = modifiers.amplify(special.damage_mult);
            self.log(format!("{stamp} {label} uses {}!", special.name));
        }
        if self.status.take_neural_hack() {
            modifiers = modifiers.amplify(1.0 - self.config.neural_hack_reduction);
            self.log("  [Cyberpunk] Neural hack weakens the attack!");
        }

        match calculate_damage(&self.foes[idx].stats, &self.player, modifiers, rng) {
            AttackOutcome::Dodged => {
                self.log(format!("{stamp} You dodge {label}'s attack!"));
            }
            AttackOutcome::Hit { damage, critical } => {
                let taken = self.damage_player(damage);
                self.state.damage_taken += taken;
                let crit = if critical { "CRITICAL! " } else { "" };
                let remaining = self.player.current_hp;
                self.log(format!(
                    "{stamp} {crit}{label} deals {taken} damage! (You: {remaining} HP)"
                ));
            }
        }
    }

    /// Apply monster damage to the player, honoring the guardian angel
    fn damage_player(&mut self, damage: u32) -> u32 {
        if self.effects.has(EffectFlags::GUARDIAN_ANGEL)
            && !self.status.guardian_used
            && self.player.is_alive()
            && damage >= self.player.current_hp
        {
            self.status.guardian_used = true;
            let taken = self.player.current_hp - 1;
            self.player.current_hp = 1;
            self.log("  [Angelic] Guardian Angel saves you! (1 HP)");
            debug!("guardian angel consumed");
            return taken;
        }
        self.player.take_damage(damage)
    }
}
