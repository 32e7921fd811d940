//! Live entity storage
//!
//! The registry is the only owner of enemies and bonuses. Entities are kept in
//! id order so iteration is stable across runs with the same seed.

use glam::Vec2;

use super::state::{Entity, EntityKind, Variant};

/// Handle shared with the host engine and contact reports
pub type EntityId = u32;

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    /// Sorted by id (ids are allocated increasing, removal keeps order)
    entities: Vec<Entity>,
    next_id: EntityId,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Take ownership of a new entity and return its id
    pub fn insert(&mut self, variant: Variant, point_value: i64, pos: Vec2, vel: Vec2) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            variant,
            point_value,
            pos,
            vel,
        });
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    /// Destroy one entity, handing it back to the caller
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.index_of(id).map(|i| self.entities.remove(i))
    }

    /// Move every entity by its velocity over `dt_ms` milliseconds
    pub fn advance(&mut self, dt_ms: u64) {
        if dt_ms == 0 {
            return;
        }
        let dt_ms = dt_ms as f32;
        for entity in &mut self.entities {
            entity.pos += entity.vel * dt_ms / 1000.0;
        }
    }

    /// Remove entities that scrolled past the left edge (`x < 0`).
    ///
    /// Returns the removed ids in id order. Calling again without movement
    /// removes nothing.
    pub fn prune(&mut self) -> Vec<EntityId> {
        let mut removed = Vec::new();
        self.entities.retain(|e| {
            let off_screen = e.pos.x < 0.0;
            if off_screen {
                removed.push(e.id);
            }
            !off_screen
        });
        removed
    }

    /// Visit every live entity of one kind in id order
    pub fn for_each_live(&self, kind: EntityKind, mut f: impl FnMut(&Entity)) {
        self.entities.iter().filter(|e| e.kind() == kind).for_each(|e| f(e));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }
}
