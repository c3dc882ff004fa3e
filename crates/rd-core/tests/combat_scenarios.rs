//! End-to-end combat scenarios through the public API

use rd_core::components::{
    CombatState, Element, EquipmentComponent, ItemComponent, MonsterComponent, Rarity,
    SpecialMove, Stats, Theme,
};
use rd_core::ecs::ComponentKind;
use rd_core::{CombatConfig, CombatError, CombatSystem, EntityId, GameRng, World};

fn stats(max_hp: u32, base_damage: f64, attack_speed: f64) -> Stats {
    Stats {
        max_hp,
        current_hp: max_hp,
        base_damage,
        attack_speed,
        crit_chance: 0.0,
        defense: 0,
        resistance: 0.0,
        dodge_chance: 0.0,
        ..Stats::default()
    }
}

fn spawn_player(world: &mut World, player_stats: Stats) -> EntityId {
    let id = world.create_entity();
    world.add_component(id, player_stats);
    world.add_component(id, CombatState::default());
    id
}

fn spawn_monster(world: &mut World, name: &str, monster_stats: Stats) -> EntityId {
    let id = world.create_entity();
    world.add_component(id, monster_stats);
    world.add_component(
        id,
        MonsterComponent {
            name: name.to_string(),
            ..Default::default()
        },
    );
    id
}

/// Equip a themed weapon without touching the player's stats
fn wield(world: &mut World, player: EntityId, theme: Theme, element: Option<Element>) {
    let item = world.create_entity();
    world.add_component(
        item,
        ItemComponent {
            theme,
            element,
            rarity: Rarity::Mythical,
            ..Default::default()
        },
    );
    let mut equipment = world
        .get_component::<EquipmentComponent>(player)
        .cloned()
        .unwrap_or_default();
    if equipment.weapon.is_none() {
        equipment.weapon = Some(item);
    } else {
        let slot = equipment.jewelry.iter().position(Option::is_none).unwrap();
        equipment.jewelry[slot] = Some(item);
    }
    world.add_component(player, equipment);
}

fn count(log: &[String], needle: &str) -> usize {
    log.iter().filter(|line| line.contains(needle)).count()
}

#[test]
fn test_one_hit_kill() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let monster = spawn_monster(&mut world, "Slime", stats(10, 0.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(1));

    assert!(result.victory);
    assert_eq!(result.ticks, 1);
    assert_eq!(result.damage_dealt, 10);
    assert_eq!(result.damage_taken, 0);
    assert_eq!(result.player_hp_remaining, 100);
    assert_eq!(result.monsters_defeated, 1);
    assert!(result.error.is_none());
    assert_eq!(result.log.first().map(String::as_str), Some("Combat started!"));
    assert_eq!(result.log.last().map(String::as_str), Some("Combat ended: VICTORY!"));
    assert!(result.log.iter().any(|l| l == "[0.1s] You deal 10 damage! (Enemy: 0 HP)"));
}

#[test]
fn test_fast_monster_wins_before_second_player_attack() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let monster = spawn_monster(&mut world, "Hasty Ogre", stats(1000, 50.0, 10.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(2));

    assert!(!result.victory);
    assert!(!result.timed_out);
    assert_eq!(result.ticks, 2);
    assert_eq!(result.damage_taken, 100);
    assert_eq!(result.damage_dealt, 10);
    assert_eq!(result.player_hp_remaining, 0);
    assert_eq!(count(&result.log, "Enemy deals 50 damage!"), 2);
    assert_eq!(count(&result.log, "You deal"), 1);
    assert!(result.log.iter().any(|l| l == "You have been defeated..."));
}

#[test]
fn test_results_are_written_back() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let monster = spawn_monster(&mut world, "Rat", stats(25, 1.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(3));

    assert!(result.victory);
    let state = world.get_component::<CombatState>(player).unwrap();
    assert!(!state.in_combat);
    assert_eq!(state.victory, Some(true));
    assert_eq!(state.opponent_id, Some(monster));
    assert_eq!(state.damage_dealt, result.damage_dealt);
    assert_eq!(state.combat_log.entries(), result.log.as_slice());
    assert_eq!(world.get_component::<Stats>(monster).unwrap().current_hp, 0);
    assert_eq!(
        world.get_component::<Stats>(player).unwrap().current_hp,
        result.player_hp_remaining
    );
}

#[test]
fn test_same_seed_same_result() {
    let run = || {
        let mut world = World::new();
        let player = spawn_player(
            &mut world,
            Stats {
                crit_chance: 0.3,
                dodge_chance: 0.2,
                ..stats(120, 9.0, 1.3)
            },
        );
        wield(&mut world, player, Theme::Elemental, Some(Element::Fire));
        let monster = spawn_monster(
            &mut world,
            "Wolf",
            Stats {
                crit_chance: 0.2,
                dodge_chance: 0.1,
                ..stats(150, 6.0, 1.1)
            },
        );
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(77))
    };
    assert_eq!(run(), run());
}

#[test]
fn test_stalemate_times_out() {
    let mut world = World::new();
    let player = spawn_player(
        &mut world,
        Stats {
            dodge_chance: 1.0,
            ..stats(100, 10.0, 1.0)
        },
    );
    let monster = spawn_monster(
        &mut world,
        "Ghost",
        Stats {
            dodge_chance: 1.0,
            ..stats(100, 10.0, 1.0)
        },
    );
    let config = CombatConfig {
        max_ticks: 50,
        ..CombatConfig::default()
    };

    let result =
        CombatSystem::new(config).run_full_combat(&mut world, player, monster, &mut GameRng::new(4));

    assert!(!result.victory);
    assert!(result.timed_out);
    assert_eq!(result.ticks, 50);
    assert_eq!(result.damage_dealt, 0);
    assert_eq!(result.damage_taken, 0);
    assert_eq!(count(&result.log, "timed out"), 1);
}

#[test]
fn test_missing_player_state_degrades() {
    let mut world = World::new();
    let player = world.create_entity();
    world.add_component(player, stats(100, 10.0, 1.0));
    let monster = spawn_monster(&mut world, "Rat", stats(10, 1.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(5));

    assert!(!result.victory);
    assert_eq!(result.ticks, 0);
    assert_eq!(
        result.error,
        Some(CombatError::MissingComponent {
            entity: player,
            component: ComponentKind::CombatState,
        })
    );
    assert_eq!(result.log.len(), 1);
    assert_eq!(world.get_component::<Stats>(monster).unwrap().current_hp, 10);
}

#[test]
fn test_missing_monster_stats_degrades() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let ok = spawn_monster(&mut world, "Rat", stats(10, 1.0, 1.0));
    let broken = world.create_entity();

    let result = CombatSystem::default().run_multi_combat(
        &mut world,
        player,
        &[ok, broken],
        &mut GameRng::new(6),
    );

    assert!(!result.victory);
    assert_eq!(result.ticks, 0);
    assert!(matches!(
        result.error,
        Some(CombatError::MissingComponent { entity, component: ComponentKind::Stats }) if entity == broken
    ));
    assert!(!world.get_component::<CombatState>(player).unwrap().in_combat);
}

#[test]
fn test_empty_multi_combat_is_victory() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(80, 10.0, 1.0));

    let result =
        CombatSystem::default().run_multi_combat(&mut world, player, &[], &mut GameRng::new(7));

    assert!(result.victory);
    assert_eq!(result.ticks, 0);
    assert_eq!(result.player_hp_remaining, 80);
    assert_eq!(result.log.len(), 1);
    assert!(result.error.is_none());
}

#[test]
fn test_multi_combat_collapses_to_single() {
    let build = || {
        let mut world = World::new();
        let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
        let monster = spawn_monster(&mut world, "Bat", stats(40, 3.0, 1.5));
        (world, player, monster)
    };
    let system = CombatSystem::default();

    let (mut world, player, monster) = build();
    let single = system.run_full_combat(&mut world, player, monster, &mut GameRng::new(8));

    let (mut world, player, monster) = build();
    let multi = system.run_multi_combat(
        &mut world,
        player,
        &[monster, monster, player],
        &mut GameRng::new(8),
    );

    assert_eq!(single, multi);
}

#[test]
fn test_multi_combat_kills_everything_once() {
    let mut world = World::new();
    let player = spawn_player(
        &mut world,
        Stats {
            cleave: 0.5,
            ..stats(500, 12.0, 2.0)
        },
    );
    let monsters: Vec<EntityId> = ["Goblin", "Orc", "Troll"]
        .iter()
        .zip([20, 35, 50])
        .map(|(name, hp)| spawn_monster(&mut world, name, stats(hp, 2.0, 1.0)))
        .collect();

    let result =
        CombatSystem::default().run_multi_combat(&mut world, player, &monsters, &mut GameRng::new(9));

    assert!(result.victory);
    assert_eq!(result.monsters_defeated, 3);
    assert_eq!(result.damage_dealt, 20 + 35 + 50);
    assert!(count(&result.log, "[Cleave]") > 0);
    assert_eq!(count(&result.log, "defeated!"), 3 + 1);
    assert!(result.log.iter().any(|l| l.contains("Orc deals")));
    for id in monsters {
        assert_eq!(world.get_component::<Stats>(id).unwrap().current_hp, 0);
    }
    assert_eq!(result.gold_earned, 30);
}

#[test]
fn test_guardian_angel_fires_once() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(60, 1.0, 1.0));
    wield(&mut world, player, Theme::Angelic, None);
    let monster = spawn_monster(&mut world, "Giant", stats(100_000, 400.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(10));

    assert!(!result.victory);
    assert_eq!(count(&result.log, "Guardian Angel"), 1);
    let save = result
        .log
        .iter()
        .position(|l| l.contains("Guardian Angel"))
        .unwrap();
    assert_eq!(result.log[save + 1], "[0.1s] Enemy deals 59 damage! (You: 1 HP)");
    assert_eq!(result.ticks, 11);
    assert_eq!(result.damage_taken, 60);
}

#[test]
fn test_burn_never_exceeds_stack_cap() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100_000, 5.0, 3.0));
    wield(&mut world, player, Theme::Elemental, Some(Element::Fire));
    let monster = spawn_monster(&mut world, "Treant", stats(1_000_000, 1.0, 0.5));
    let config = CombatConfig {
        max_ticks: 300,
        ..CombatConfig::default()
    };

    let result =
        CombatSystem::new(config).run_full_combat(&mut world, player, monster, &mut GameRng::new(11));

    // Mythical fire: 8 damage per stack
    let burns: Vec<u32> = result
        .log
        .iter()
        .filter_map(|line| line.split("takes ").nth(1))
        .filter_map(|rest| rest.strip_suffix(" stacks)"))
        .filter_map(|rest| rest.split_whitespace().next())
        .filter_map(|n| n.parse().ok())
        .collect();
    assert!(!burns.is_empty());
    assert!(burns.iter().all(|&dmg| dmg <= 3 * 8));
    assert!(burns.contains(&24));
}

#[test]
fn test_soaked_targets_are_paralyzed_longer() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100_000, 5.0, 2.0));
    wield(&mut world, player, Theme::Elemental, Some(Element::Water));
    wield(&mut world, player, Theme::Elemental, Some(Element::Electric));
    let monster = spawn_monster(&mut world, "Golem", stats(1_000_000, 1.0, 1.0));
    let config = CombatConfig {
        max_ticks: 400,
        ..CombatConfig::default()
    };

    let result =
        CombatSystem::new(config).run_full_combat(&mut world, player, monster, &mut GameRng::new(12));

    assert!(count(&result.log, "Conducted through water") > 0);
    assert!(count(&result.log, "is paralyzed and cannot attack") > 0);
}

#[test]
fn test_boss_uses_special_moves() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(10_000, 1.0, 1.0));
    let boss = world.create_entity();
    world.add_component(boss, stats(10_000, 10.0, 1.0));
    world.add_component(
        boss,
        MonsterComponent {
            name: "Dragon".into(),
            special_moves: vec![SpecialMove {
                name: "Inferno".into(),
                damage_mult: 3.0,
            }],
            ..Default::default()
        },
    );
    let config = CombatConfig {
        max_ticks: 100,
        ..CombatConfig::default()
    };

    let result =
        CombatSystem::new(config).run_full_combat(&mut world, player, boss, &mut GameRng::new(13));

    assert!(result.timed_out);
    assert_eq!(count(&result.log, "uses Inferno!"), 3);
    assert_eq!(count(&result.log, "Enemy deals 30 damage!"), 3);
}

#[test]
fn test_credit_skim_boosts_gold() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 50.0, 1.0));
    let item = world.create_entity();
    world.add_component(
        item,
        ItemComponent {
            theme: Theme::Cyberpunk,
            ..Default::default()
        },
    );
    world.add_component(
        player,
        EquipmentComponent {
            weapon: Some(item),
            ..Default::default()
        },
    );
    let monster = world.create_entity();
    world.add_component(monster, stats(10, 1.0, 1.0));
    world.add_component(
        monster,
        MonsterComponent {
            name: "Banker".into(),
            gold_reward: 100,
            ..Default::default()
        },
    );

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(14));

    assert!(result.victory);
    assert_eq!(result.gold_earned, 110);
}

fn long_config() -> CombatConfig {
    CombatConfig {
        max_ticks: 300,
        ..CombatConfig::default()
    }
}

/// A sturdy player trading blows with a punching bag for 30 seconds
fn long_fight(
    theme: Theme,
    element: Option<Element>,
    monster_damage: f64,
    seed: u64,
) -> Vec<String> {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100_000, 10.0, 1.0));
    wield(&mut world, player, theme, element);
    let monster = spawn_monster(&mut world, "Dummy", stats(1_000_000, monster_damage, 1.0));
    let result = CombatSystem::new(long_config()).run_full_combat(
        &mut world,
        player,
        monster,
        &mut GameRng::new(seed),
    );
    assert!(result.timed_out);
    result.log
}

#[test]
fn test_neural_hack_weakens_next_attack_once() {
    let log = long_fight(Theme::Cyberpunk, None, 100.0, 3);

    let weakened: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("Neural hack weakens the attack!"))
        .map(|(i, _)| i)
        .collect();
    assert!(!weakened.is_empty());
    for i in &weakened {
        assert!(log[i + 1].contains("Enemy deals 60 damage!"), "{}", log[i + 1]);
    }
    assert_eq!(count(&log, "Enemy deals 60 damage!"), weakened.len());
    assert_eq!(
        count(&log, "Enemy deals 100 damage!") + weakened.len(),
        count(&log, "Enemy deals")
    );
    assert!(count(&log, "Neural hack disrupts") >= weakened.len());
}

#[test]
fn test_demonic_fury_and_soul_harvest() {
    let mut world = World::new();
    let player = spawn_player(
        &mut world,
        Stats {
            current_hp: 50,
            ..stats(100, 10.0, 1.0)
        },
    );
    wield(&mut world, player, Theme::Demonic, None);
    let monster = spawn_monster(&mut world, "Imp", stats(20, 1.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(15));

    // 50 - 2 blood price leaves 52% missing: 10 x (1 + 0.52 x 2) = 20.4
    assert!(result.victory);
    assert_eq!(result.ticks, 1);
    assert_eq!(result.damage_dealt, 20);
    assert_eq!(result.player_hp_remaining, 68);
    let expected = [
        "  [Demonic] Blood price: -2 HP",
        "[0.1s] You deal 20 damage! (Enemy: 0 HP)",
        "Enemy defeated!",
        "  [Demonic] Soul harvest: +20 HP",
    ];
    let start = result.log.iter().position(|l| l == expected[0]).unwrap();
    assert_eq!(&result.log[start..start + expected.len()], expected.as_slice());
}

#[test]
fn test_soul_harvest_on_every_kill() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    wield(&mut world, player, Theme::Demonic, None);
    let monsters = [
        spawn_monster(&mut world, "Imp", stats(20, 1.0, 1.0)),
        spawn_monster(&mut world, "Fiend", stats(20, 1.0, 1.0)),
    ];

    let result =
        CombatSystem::default().run_multi_combat(&mut world, player, &monsters, &mut GameRng::new(16));

    assert!(result.victory);
    assert_eq!(result.monsters_defeated, 2);
    assert_eq!(count(&result.log, "Soul harvest"), 2);
}

#[test]
fn test_mana_burst_streak_grows_and_resets() {
    let log = long_fight(Theme::Magical, None, 1.0, 17);

    // Mythical: first burst adds 100% of base, each further one +50%
    let bursts: Vec<(usize, u32, u32)> = log
        .iter()
        .enumerate()
        .filter_map(|(i, l)| {
            let rest = l.strip_prefix("  [Mana Burst] +")?;
            let (bonus, streak) = rest.split_once(" damage! (x")?;
            let streak = streak.strip_suffix(')')?;
            Some((i, bonus.parse().ok()?, streak.parse().ok()?))
        })
        .collect();
    assert!(!bursts.is_empty());
    for &(i, bonus, streak) in &bursts {
        assert!((1..=5).contains(&streak));
        assert_eq!(bonus, 10 + 5 * (streak - 1));
        assert!(log[i - 1].contains(&format!("You deal {} damage!", 10 + bonus)));
    }
    assert!(bursts.iter().any(|&(_, _, streak)| streak >= 2));
    assert!(bursts.iter().filter(|&&(_, _, streak)| streak == 1).count() >= 2);
}

#[test]
fn test_flinch_costs_the_next_attack() {
    let log = long_fight(Theme::Elemental, Some(Element::Wind), 1.0, 18);

    let lost = count(&log, "Enemy flinches and loses its attack!");
    assert!(lost > 0);
    assert!(lost <= count(&log, "[Wind] Enemy flinches!"));
    // One attack slot per second over 30 seconds
    assert_eq!(count(&log, "Enemy deals") + lost, 30);
}

#[test]
fn test_tremor_delays_monster_attacks() {
    let log = long_fight(Theme::Elemental, Some(Element::Earth), 1.0, 19);

    assert!(count(&log, "[Earth] Tremor staggers Enemy!") > 0);
    assert!(count(&log, "Enemy deals") < 30);
    assert_eq!(count(&log, "flinches"), 0);
}

#[test]
fn test_steam_burst_every_second_attack() {
    let log = long_fight(Theme::Steampunk, None, 1.0, 20);

    // Mythical: interval 2, burst at 2x base damage
    assert_eq!(count(&log, "You deal 10 damage!"), 30);
    assert_eq!(count(&log, "Steam burst hits Enemy for 20 damage!"), 15);
    let mut attacks = 0;
    for line in &log {
        if line.contains("You deal") {
            attacks += 1;
        } else if line.contains("Steam burst") {
            assert_eq!(attacks % 2, 0);
        }
    }
}

#[test]
fn test_unnamed_monster_reported_as_monster() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let monster = world.create_entity();
    world.add_component(monster, stats(10, 1.0, 1.0));

    let result =
        CombatSystem::default().run_full_combat(&mut world, player, monster, &mut GameRng::new(21));

    assert!(result.victory);
    assert_eq!(result.monster_name, "Monster");
}

#[test]
fn test_unnamed_monsters_in_multi_combat() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let monsters: Vec<EntityId> = (0..2)
        .map(|_| {
            let id = world.create_entity();
            world.add_component(id, stats(10, 1.0, 1.0));
            id
        })
        .collect();

    let result =
        CombatSystem::default().run_multi_combat(&mut world, player, &monsters, &mut GameRng::new(22));

    assert!(result.victory);
    assert_eq!(result.monster_name, "Monster, Monster");
    assert_eq!(count(&result.log, "Monster defeated!"), 2);
}

#[test]
fn test_monster_already_at_zero_hp_is_not_a_kill() {
    let mut world = World::new();
    let player = spawn_player(&mut world, stats(100, 10.0, 1.0));
    let corpse = spawn_monster(
        &mut world,
        "Corpse",
        Stats {
            current_hp: 0,
            ..stats(50, 1.0, 1.0)
        },
    );
    let rat = spawn_monster(&mut world, "Rat", stats(10, 1.0, 1.0));

    let result = CombatSystem::default().run_multi_combat(
        &mut world,
        player,
        &[corpse, rat],
        &mut GameRng::new(23),
    );

    assert!(result.victory);
    assert_eq!(result.monsters_defeated, 1);
    assert_eq!(count(&result.log, "Corpse defeated!"), 0);
    assert_eq!(count(&result.log, "Rat defeated!"), 1);
}
