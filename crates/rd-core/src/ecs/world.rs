//! The world: entity registry plus component store

use tracing::debug;

use super::component::Component;
use super::entity::{EntityId, EntityRegistry};
use super::query::{Query, QueryMut, candidates};
use super::store::ComponentStore;

/// Owner of every entity and component in a game session
#[derive(Debug, Clone, Default)]
pub struct World {
    registry: EntityRegistry,
    store: ComponentStore,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_entity(&mut self) -> EntityId {
        self.registry.create()
    }

    /// Remove every component of `id`, then mark it dead
    ///
    /// Unknown or already-destroyed ids are a no-op.
    pub fn destroy_entity(&mut self, id: EntityId) {
        let removed = self.store.remove_all(id);
        self.registry.destroy(id);
        debug!(entity = id.raw(), removed, "entity destroyed");
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.registry.is_alive(id)
    }

    /// All live entities, unordered
    pub fn entities(&self) -> Vec<EntityId> {
        self.registry.all()
    }

    pub fn entity_count(&self) -> usize {
        self.registry.count()
    }

    /// Attach `component`, replacing any instance of the same type
    ///
    /// Returns the replaced instance. Components offered to a dead entity are
    /// discarded so that no orphaned entries can exist.
    pub fn add_component<T: Component>(&mut self, id: EntityId, component: T) -> Option<T> {
        if !self.registry.is_alive(id) {
            debug!(entity = id.raw(), kind = %T::KIND, "component dropped for dead entity");
            return None;
        }
        T::column_mut(&mut self.store).insert(id, component)
    }

    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        T::column(&self.store).get(id)
    }

    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        T::column_mut(&mut self.store).get_mut(id)
    }

    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> Option<T> {
        T::column_mut(&mut self.store).remove(id)
    }

    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        T::column(&self.store).contains(id)
    }

    /// Every live entity holding all of `Q`'s component types
    ///
    /// Order is unspecified. An empty query (`()`) yields nothing.
    pub fn query<Q: Query>(&self) -> Vec<(EntityId, Q::Item<'_>)> {
        if Q::KINDS.is_empty() {
            return Vec::new();
        }
        candidates(&self.store, Q::KINDS)
            .into_iter()
            .filter(|id| self.registry.is_alive(*id))
            .filter_map(|id| Q::fetch(&self.store, id).map(|item| (id, item)))
            .collect()
    }

    /// First (arbitrary) match of [`World::query`]
    pub fn query_single<Q: Query>(&self) -> Option<(EntityId, Q::Item<'_>)> {
        if Q::KINDS.is_empty() {
            return None;
        }
        candidates(&self.store, Q::KINDS)
            .into_iter()
            .filter(|id| self.registry.is_alive(*id))
            .find_map(|id| Q::fetch(&self.store, id).map(|item| (id, item)))
    }

    /// Mutable iteration over one component type for live entities
    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        let registry = &self.registry;
        T::column_mut(&mut self.store)
            .iter_mut()
            .filter(move |(id, _)| registry.is_alive(*id))
    }

    /// Mutable visit of every live entity holding all of `Q`'s component types
    ///
    /// `Q` must name distinct types. Order is unspecified.
    pub fn for_each_mut<Q: QueryMut>(&mut self, f: impl FnMut(EntityId, Q::Item<'_>)) {
        if Q::KINDS.is_empty() {
            return;
        }
        let entities: Vec<EntityId> = candidates(&self.store, Q::KINDS)
            .into_iter()
            .filter(|id| self.registry.is_alive(*id))
            .collect();
        Q::for_each(&mut self.store, &entities, f);
    }
}
