//! The component store: one typed column per component kind

use strum::IntoEnumIterator;

use super::component::{Column, ComponentKind};
use super::entity::EntityId;
use crate::components::{
    CombatState, EquipmentComponent, InventoryComponent, ItemComponent, MonsterComponent,
    PlayerComponent, Stats,
};

/// Typed columns for every [`ComponentKind`]
#[derive(Debug, Clone, Default)]
pub struct ComponentStore {
    pub(crate) stats: Column<Stats>,
    pub(crate) combat: Column<CombatState>,
    pub(crate) monsters: Column<MonsterComponent>,
    pub(crate) items: Column<ItemComponent>,
    pub(crate) equipment: Column<EquipmentComponent>,
    pub(crate) inventories: Column<InventoryComponent>,
    pub(crate) players: Column<PlayerComponent>,
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `entity` has a component of `kind`
    pub fn has_kind(&self, kind: ComponentKind, entity: EntityId) -> bool {
        match kind {
            ComponentKind::Stats => self.stats.contains(entity),
            ComponentKind::CombatState => self.combat.contains(entity),
            ComponentKind::Monster => self.monsters.contains(entity),
            ComponentKind::Item => self.items.contains(entity),
            ComponentKind::Equipment => self.equipment.contains(entity),
            ComponentKind::Inventory => self.inventories.contains(entity),
            ComponentKind::Player => self.players.contains(entity),
        }
    }

    /// Number of instances stored for `kind`
    pub fn len_of(&self, kind: ComponentKind) -> usize {
        match kind {
            ComponentKind::Stats => self.stats.len(),
            ComponentKind::CombatState => self.combat.len(),
            ComponentKind::Monster => self.monsters.len(),
            ComponentKind::Item => self.items.len(),
            ComponentKind::Equipment => self.equipment.len(),
            ComponentKind::Inventory => self.inventories.len(),
            ComponentKind::Player => self.players.len(),
        }
    }

    /// Entities holding a component of `kind`
    pub fn entities_of(&self, kind: ComponentKind) -> Vec<EntityId> {
        match kind {
            ComponentKind::Stats => self.stats.entities().collect(),
            ComponentKind::CombatState => self.combat.entities().collect(),
            ComponentKind::Monster => self.monsters.entities().collect(),
            ComponentKind::Item => self.items.entities().collect(),
            ComponentKind::Equipment => self.equipment.entities().collect(),
            ComponentKind::Inventory => self.inventories.entities().collect(),
            ComponentKind::Player => self.players.entities().collect(),
        }
    }

    fn remove_kind(&mut self, kind: ComponentKind, entity: EntityId) -> bool {
        match kind {
            ComponentKind::Stats => self.stats.remove(entity).is_some(),
            ComponentKind::CombatState => self.combat.remove(entity).is_some(),
            ComponentKind::Monster => self.monsters.remove(entity).is_some(),
            ComponentKind::Item => self.items.remove(entity).is_some(),
            ComponentKind::Equipment => self.equipment.remove(entity).is_some(),
            ComponentKind::Inventory => self.inventories.remove(entity).is_some(),
            ComponentKind::Player => self.players.remove(entity).is_some(),
        }
    }

    /// Split the store into independently borrowable columns
    pub fn columns_mut(&mut self) -> ColumnsMut<'_> {
        let Self {
            stats,
            combat,
            monsters,
            items,
            equipment,
            inventories,
            players,
        } = self;
        ColumnsMut {
            stats: Some(stats),
            combat: Some(combat),
            monsters: Some(monsters),
            items: Some(items),
            equipment: Some(equipment),
            inventories: Some(inventories),
            players: Some(players),
        }
    }

    /// Drop every component attached to `entity`, returning how many were removed
    pub fn remove_all(&mut self, entity: EntityId) -> usize {
        ComponentKind::iter()
            .filter(|kind| self.remove_kind(*kind, entity))
            .count()
    }
}

/// Disjoint mutable borrows of every column
///
/// Each column can be taken at most once, through
/// [`Component::take_column`](super::Component::take_column).
#[derive(Debug)]
pub struct ColumnsMut<'s> {
    pub(crate) stats: Option<&'s mut Column<Stats>>,
    pub(crate) combat: Option<&'s mut Column<CombatState>>,
    pub(crate) monsters: Option<&'s mut Column<MonsterComponent>>,
    pub(crate) items: Option<&'s mut Column<ItemComponent>>,
    pub(crate) equipment: Option<&'s mut Column<EquipmentComponent>>,
    pub(crate) inventories: Option<&'s mut Column<InventoryComponent>>,
    pub(crate) players: Option<&'s mut Column<PlayerComponent>>,
}
