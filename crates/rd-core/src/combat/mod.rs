//! Tick-driven combat resolution
//!
//! [`CombatSystem`] checks the combatants' components out of the [`World`],
//! runs an encounter to a terminal phase and writes the results back. The
//! outcome is reported as a [`CombatResult`]; expected game conditions
//! (dodges, missed drops, timeouts and even missing components) never
//! surface as `Err`.

mod config;
pub mod damage;
pub mod effects;
mod encounter;
pub mod status;

pub use config::CombatConfig;
pub use damage::{AttackOutcome, DamageModifiers, calculate_damage};
pub use effects::{ActiveEffects, EffectFlags};

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, warn};

use crate::GameRng;
use crate::components::{CombatState, MonsterComponent, Stats};
use crate::ecs::{ComponentKind, EntityId, World};
use crate::error::CombatError;
use encounter::{Encounter, Foe};

/// Name reported for a foe without a [`MonsterComponent`]
const UNNAMED_MONSTER: &str = "Monster";

/// Lifecycle of one combat; Victory and Defeat are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum CombatPhase {
    #[default]
    NotStarted,
    Running,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Read-only snapshot of a finished combat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub victory: bool,
    pub player_hp_remaining: u32,
    pub player_hp_max: u32,
    pub ticks: u32,
    /// Simulated seconds
    pub duration: f64,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub log: Vec<String>,
    pub monster_name: String,
    pub gold_earned: u32,
    pub item_dropped: bool,
    pub monsters_defeated: u32,
    pub monster_max_hp: u32,
    pub monster_sprite: String,
    /// The tick cap ended the combat
    pub timed_out: bool,
    /// Set when the combat could not run at all
    pub error: Option<CombatError>,
}

impl CombatResult {
    /// Zero-tick defeat describing why the combat could not run
    fn aborted(error: CombatError) -> Self {
        warn!(%error, "combat aborted");
        Self {
            log: vec![format!("Combat aborted: {error}")],
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn phase(&self) -> CombatPhase {
        if self.victory {
            CombatPhase::Victory
        } else {
            CombatPhase::Defeat
        }
    }
}

/// Runs combats between a player entity and monster entities
#[derive(Debug, Clone, Default)]
pub struct CombatSystem {
    config: CombatConfig,
}

impl CombatSystem {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Reset the player's combat state for a new fight
    ///
    /// Returns false when the player has no [`CombatState`].
    pub fn start_combat(&self, world: &mut World, player: EntityId, opponent: EntityId) -> bool {
        match world.get_component_mut::<CombatState>(player) {
            Some(state) => {
                state.start_combat(opponent);
                true
            }
            None => false,
        }
    }

    /// Finalize the player's combat state
    pub fn end_combat(&self, world: &mut World, player: EntityId, victory: bool) -> bool {
        match world.get_component_mut::<CombatState>(player) {
            Some(state) => {
                state.end_combat(victory);
                true
            }
            None => false,
        }
    }

    /// Fight one monster to the end
    pub fn run_full_combat(
        &self,
        world: &mut World,
        player: EntityId,
        monster: EntityId,
        rng: &mut GameRng,
    ) -> CombatResult {
        self.run_encounter(world, player, &[monster], false, rng)
    }

    /// Fight several monsters at once
    ///
    /// An empty list is an immediate victory. Duplicate ids and the player's
    /// own id are ignored.
    pub fn run_multi_combat(
        &self,
        world: &mut World,
        player: EntityId,
        monsters: &[EntityId],
        rng: &mut GameRng,
    ) -> CombatResult {
        let mut foes: Vec<EntityId> = Vec::with_capacity(monsters.len());
        for &id in monsters {
            if id != player && !foes.contains(&id) {
                foes.push(id);
            }
        }

        match foes.as_slice() {
            [] => {
                let (hp, max_hp) = world
                    .get_component::<Stats>(player)
                    .map(|s| (s.current_hp, s.max_hp))
                    .unwrap_or_default();
                debug!(%player, "multi-combat with no monsters");
                CombatResult {
                    victory: true,
                    player_hp_remaining: hp,
                    player_hp_max: max_hp,
                    log: vec!["No monsters to fight - automatic victory!".to_string()],
                    ..CombatResult::default()
                }
            }
            [single] => self.run_full_combat(world, player, *single, rng),
            _ => self.run_encounter(world, player, &foes, true, rng),
        }
    }

    fn run_encounter(
        &self,
        world: &mut World,
        player: EntityId,
        monsters: &[EntityId],
        multi: bool,
        rng: &mut GameRng,
    ) -> CombatResult {
        let Some(&primary) = monsters.first() else {
            return CombatResult::default();
        };

        let Some(player_stats) = world.get_component::<Stats>(player).cloned() else {
            return CombatResult::aborted(CombatError::MissingComponent {
                entity: player,
                component: ComponentKind::Stats,
            });
        };
        let Some(mut state) = world.get_component::<CombatState>(player).cloned() else {
            return CombatResult::aborted(CombatError::MissingComponent {
                entity: player,
                component: ComponentKind::CombatState,
            });
        };

        let mut foes = Vec::with_capacity(monsters.len());
        for &id in monsters {
            let Some(stats) = world.get_component::<Stats>(id).cloned() else {
                return CombatResult::aborted(CombatError::MissingComponent {
                    entity: id,
                    component: ComponentKind::Stats,
                });
            };
            let monster = world.get_component::<MonsterComponent>(id).cloned();
            let label = match (&monster, multi) {
                (Some(m), true) => m.display_name(),
                (None, true) => UNNAMED_MONSTER.to_string(),
                (_, false) => "Enemy".to_string(),
            };
            foes.push(Foe::new(id, label, stats, monster));
        }

        let effects = ActiveEffects::for_entity(world, player, &self.config);
        debug!(
            %player,
            foes = foes.len(),
            effects = ?effects.flags,
            "combat started"
        );

        state.start_combat(primary);
        let mut encounter =
            Encounter::new(&self.config, player_stats, state, foes, effects.clone());
        encounter.run(rng);

        let victory = encounter.phase == CombatPhase::Victory;
        encounter.state.end_combat(victory);

        let monster_name = encounter
            .foes
            .iter()
            .map(|foe| {
                foe.monster
                    .as_ref()
                    .map(MonsterComponent::display_name)
                    .unwrap_or_else(|| UNNAMED_MONSTER.to_string())
            })
            .collect::<Vec<_>>()
            .join(", ");
        let first = &encounter.foes[0];
        let monster_max_hp = first.stats.max_hp;
        let monster_sprite = first
            .monster
            .as_ref()
            .map(|m| m.sprite_name.clone())
            .unwrap_or_default();

        let (gold_earned, item_dropped) = if victory {
            self.roll_rewards(&encounter.foes, &effects, rng)
        } else {
            (0, false)
        };

        let result = CombatResult {
            victory,
            player_hp_remaining: encounter.player.current_hp,
            player_hp_max: encounter.player.max_hp,
            ticks: encounter.state.combat_tick,
            duration: encounter.state.combat_tick as f64 * self.config.tick_duration(),
            damage_dealt: encounter.state.damage_dealt,
            damage_taken: encounter.state.damage_taken,
            log: encounter.state.combat_log.entries().to_vec(),
            monster_name,
            gold_earned,
            item_dropped,
            monsters_defeated: encounter.kills,
            monster_max_hp,
            monster_sprite,
            timed_out: encounter.timed_out,
            error: None,
        };

        let Encounter {
            player: player_stats,
            state,
            foes,
            ..
        } = encounter;
        world.add_component(player, player_stats);
        world.add_component(player, state);
        for foe in foes {
            world.add_component(foe.id, foe.stats);
        }

        info!(
            victory,
            ticks = result.ticks,
            dealt = result.damage_dealt,
            taken = result.damage_taken,
            kills = result.monsters_defeated,
            "combat finished"
        );
        result
    }

    /// Gold and drop rolls for a won fight
    fn roll_rewards(
        &self,
        foes: &[Foe],
        effects: &ActiveEffects,
        rng: &mut GameRng,
    ) -> (u32, bool) {
        let mut gold: u32 = 0;
        let mut dropped = false;
        for monster in foes.iter().filter(|f| f.slain).filter_map(|f| f.monster.as_ref()) {
            gold = gold.saturating_add(monster.gold_reward);
            if rng.chance(monster.drop_chance) {
                dropped = true;
            }
        }
        if effects.has(EffectFlags::CREDIT_SKIM) {
            gold = (gold as f64 * (1.0 + effects.credit_skim)).floor() as u32;
        }
        (gold, dropped)
    }
}
