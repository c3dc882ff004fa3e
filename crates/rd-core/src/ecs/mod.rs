//! Entity/component object model
//!
//! Entities are bare identities. Each component kind lives in its own typed
//! column keyed by entity, and the [`World`] owns the registry and every
//! column.

mod component;
mod entity;
mod query;
mod store;
mod world;

pub use component::{Column, Component, ComponentKind};
pub(crate) use component::impl_component;
pub use entity::{EntityId, EntityRegistry};
pub use query::{Query, QueryMut};
pub use store::{ColumnsMut, ComponentStore};
pub use world::World;
