//! Entity identities and liveness (entity registry)

use core::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Opaque entity identity
///
/// Carries no data of its own; it only keys component columns. Ids start at
/// 1 and are never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Raw numeric id
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates entity ids and tracks which are alive
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    next_id: u32,
    alive: HashSet<EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            alive: HashSet::new(),
        }
    }

    /// Allocate a fresh, live id
    pub fn create(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.alive.insert(id);
        id
    }

    /// Mark an id dead. Unknown or already-dead ids are ignored.
    pub fn destroy(&mut self, id: EntityId) {
        self.alive.remove(&id);
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.alive.contains(&id)
    }

    /// All live ids, in no particular order
    pub fn all(&self) -> Vec<EntityId> {
        self.alive.iter().copied().collect()
    }

    /// Number of live entities
    pub fn count(&self) -> usize {
        self.alive.len()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
