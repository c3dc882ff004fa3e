//! Error types
//!
//! Lookups in the world return `Option`; only operations with a caller
//! contract produce these errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ecs::{ComponentKind, EntityId};

/// Conditions that prevent a combat from being simulated
///
/// The combat engine never returns these as `Err`: they are attached to a
/// degraded [`CombatResult`](crate::CombatResult) instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatError {
    #[error("{entity} is missing its {component} component")]
    MissingComponent {
        entity: EntityId,
        component: ComponentKind,
    },
}

/// Failures when changing equipment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquipError {
    #[error("{entity} is missing its {component} component")]
    MissingComponent {
        entity: EntityId,
        component: ComponentKind,
    },

    #[error("{0} is not an item")]
    NotAnItem(EntityId),

    #[error("{item} is not in the inventory of {owner}")]
    NotInInventory { owner: EntityId, item: EntityId },

    #[error("inventory of {0} is full")]
    InventoryFull(EntityId),

    #[error("slot {0} is empty")]
    SlotEmpty(crate::components::EquipSlot),

    #[error("this character cannot wear armor")]
    ArmorForbidden,
}
