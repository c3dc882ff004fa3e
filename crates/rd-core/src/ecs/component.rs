//! Component kinds and typed columns

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::entity::EntityId;
use super::store::{ColumnsMut, ComponentStore};

/// Every component kind the store knows about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum ComponentKind {
    Stats,
    CombatState,
    Monster,
    Item,
    Equipment,
    Inventory,
    Player,
}

/// A pure-data record that can be attached to an entity
///
/// Each implementor maps to exactly one column of the [`ComponentStore`].
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    fn column(store: &ComponentStore) -> &Column<Self>;

    fn column_mut(store: &mut ComponentStore) -> &mut Column<Self>;

    /// Claim this type's column from a split store; `None` once taken
    fn take_column<'s>(columns: &mut ColumnsMut<'s>) -> Option<&'s mut Column<Self>>;
}

/// Storage for one component kind: at most one instance per entity
#[derive(Debug, Clone)]
pub struct Column<T> {
    entries: HashMap<EntityId, T>,
}

impl<T> Column<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert, returning the instance it replaced
    pub fn insert(&mut self, entity: EntityId, value: T) -> Option<T> {
        self.entries.insert(entity, value)
    }

    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.entries.get(&entity)
    }

    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.entries.get_mut(&entity)
    }

    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.entries.remove(&entity)
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.entries.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(e, v)| (*e, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.entries.iter_mut().map(|(e, v)| (*e, v))
    }
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire a component type to its column in [`ComponentStore`]
macro_rules! impl_component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl $crate::ecs::Component for $ty {
            const KIND: $crate::ecs::ComponentKind = $crate::ecs::ComponentKind::$kind;

            fn column(store: &$crate::ecs::ComponentStore) -> &$crate::ecs::Column<Self> {
                &store.$field
            }

            fn column_mut(
                store: &mut $crate::ecs::ComponentStore,
            ) -> &mut $crate::ecs::Column<Self> {
                &mut store.$field
            }

            fn take_column<'s>(
                columns: &mut $crate::ecs::ColumnsMut<'s>,
            ) -> Option<&'s mut $crate::ecs::Column<Self>> {
                columns.$field.take()
            }
        }
    };
}

pub(crate) use impl_component;
