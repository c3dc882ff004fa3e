//! Component records
//!
//! Pure data attached to entities through the [`World`](crate::World). The
//! only behavior here is small mutators that keep each record's invariants.

mod combat_state;
mod equipment;
mod inventory;
mod item;
mod monster;
mod player;
mod stats;

pub use combat_state::{CombatLog, CombatState};
pub use equipment::{EquipSlot, EquipmentComponent};
pub use inventory::InventoryComponent;
pub use item::{Element, ItemComponent, ItemType, Rarity, Theme};
pub use monster::{MonsterComponent, SpecialMove};
pub use player::PlayerComponent;
pub use stats::Stats;

use crate::ecs::impl_component;

impl_component!(Stats, Stats, stats);
impl_component!(CombatState, CombatState, combat);
impl_component!(MonsterComponent, Monster, monsters);
impl_component!(ItemComponent, Item, items);
impl_component!(EquipmentComponent, Equipment, equipment);
impl_component!(InventoryComponent, Inventory, inventories);
impl_component!(PlayerComponent, Player, players);
