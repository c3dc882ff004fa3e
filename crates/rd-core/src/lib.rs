//! rd-core: entity store and combat engine for RogueDice
//!
//! This crate holds the game-state object model (entities, components, the
//! world that owns them) and the tick-driven combat resolver built on top of
//! it. It performs no I/O; callers feed it entities and read back a
//! [`CombatResult`].

pub mod combat;
pub mod components;
pub mod data;
pub mod ecs;
pub mod equip;
pub mod error;

mod consts;
mod rng;

pub use combat::{CombatConfig, CombatPhase, CombatResult, CombatSystem};
pub use consts::*;
pub use ecs::{EntityId, World};
pub use error::{CombatError, EquipError};
pub use rng::GameRng;
