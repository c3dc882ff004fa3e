//! Carried items

use serde::{Deserialize, Serialize};

use crate::INVENTORY_CAPACITY;
use crate::ecs::EntityId;

/// Item entities carried by an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryComponent {
    pub items: Vec<EntityId>,
    pub max_capacity: usize,
}

impl Default for InventoryComponent {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            max_capacity: INVENTORY_CAPACITY,
        }
    }
}

impl InventoryComponent {
    /// Add an item; false when full
    pub fn add_item(&mut self, item: EntityId) -> bool {
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove an item; false when absent
    pub fn remove_item(&mut self, item: EntityId) -> bool {
        match self.items.iter().position(|i| *i == item) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn has_item(&self, item: EntityId) -> bool {
        self.items.contains(&item)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_capacity
    }

    pub fn space_remaining(&self) -> usize {
        self.max_capacity.saturating_sub(self.items.len())
    }
}
