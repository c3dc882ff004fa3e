//! rd-sim: run a seeded RogueDice combat from the command line

mod scenario;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rd_core::components::{Element, Rarity, Theme};
use rd_core::data::CharacterId;
use rd_core::{CombatConfig, CombatSystem, GameRng, World};

use scenario::Scenario;

#[derive(Debug, Parser)]
#[command(name = "rd-sim")]
#[command(about = "Simulate a RogueDice combat", long_about = None)]
struct Args {
    /// RNG seed; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Playable character
    #[arg(short, long, default_value = "warrior")]
    character: CharacterId,

    /// Number of monsters in the encounter
    #[arg(short, long, default_value = "1")]
    monsters: usize,

    /// Monster max HP
    #[arg(long, default_value = "60")]
    monster_hp: u32,

    /// Monster base damage
    #[arg(long, default_value = "6")]
    monster_damage: f64,

    /// Monster attacks per second
    #[arg(long, default_value = "0.8")]
    monster_speed: f64,

    /// Theme of a weapon to equip before the fight
    #[arg(long)]
    theme: Option<Theme>,

    /// Element of the weapon (elemental theme only)
    #[arg(long)]
    element: Option<Element>,

    /// Rarity of the weapon
    #[arg(long, default_value = "common")]
    rarity: Rarity,

    /// Combat configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of the combat log
    #[arg(long)]
    json: bool,
}

fn load_config(path: &Path) -> Result<CombatConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rd_sim=info,rd_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CombatConfig::default(),
    };
    let mut rng = args.seed.map(GameRng::new).unwrap_or_else(GameRng::from_entropy);
    info!(
        seed = rng.seed(),
        character = %args.character,
        monsters = args.monsters,
        "simulating combat"
    );

    let scenario = Scenario {
        character: args.character,
        monsters: args.monsters,
        monster_hp: args.monster_hp,
        monster_damage: args.monster_damage,
        monster_speed: args.monster_speed,
        theme: args.theme,
        element: args.element,
        rarity: args.rarity,
    };
    let mut world = World::new();
    let (player, monsters) = scenario.build(&mut world)?;

    let result =
        CombatSystem::new(config).run_multi_combat(&mut world, player, &monsters, &mut rng);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for line in &result.log {
            println!("{line}");
        }
        println!();
        println!(
            "{} in {:.1}s: dealt {}, took {}, HP {}/{}, gold {}{}",
            if result.victory { "Victory" } else { "Defeat" },
            result.duration,
            result.damage_dealt,
            result.damage_taken,
            result.player_hp_remaining,
            result.player_hp_max,
            result.gold_earned,
            if result.item_dropped { ", item dropped" } else { "" },
        );
    }

    info!(victory = result.victory, ticks = result.ticks, "done");
    Ok(())
}
