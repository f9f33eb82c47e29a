//! Entity registry - authoritative keyed collections
//!
//! Each entity kind lives in its own [`Registry`], keyed by a typed id that is
//! allocated from a per-registry counter. Ids are never reused, so a stale
//! weak reference can only ever miss, never hit a different entity.
//! Iteration is in id (creation) order.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::error::{Result, SimError};
use crate::core::types::{BuildingId, EnemyId, FollowerId, ProjectileId, TreeId};
use crate::entity::{Building, Enemy, Follower, Projectile, Tree};

/// Record that knows its own registry key
pub trait Identified {
    type Id: Copy + Ord + fmt::Debug + fmt::Display + From<u64>;

    fn id(&self) -> Self::Id;
}

impl Identified for Tree {
    type Id = TreeId;
    fn id(&self) -> TreeId {
        self.id
    }
}

impl Identified for Building {
    type Id = BuildingId;
    fn id(&self) -> BuildingId {
        self.id
    }
}

impl Identified for Follower {
    type Id = FollowerId;
    fn id(&self) -> FollowerId {
        self.id
    }
}

impl Identified for Enemy {
    type Id = EnemyId;
    fn id(&self) -> EnemyId {
        self.id
    }
}

impl Identified for Projectile {
    type Id = ProjectileId;
    fn id(&self) -> ProjectileId {
        self.id
    }
}

/// Keyed collection of one entity kind
#[derive(Debug, Clone)]
pub struct Registry<V: Identified> {
    entries: BTreeMap<V::Id, V>,
    next_id: u64,
}

impl<V: Identified> Default for Registry<V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }
}

impl<V: Identified> Registry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id
    pub fn allocate(&mut self) -> V::Id {
        let id = V::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an id and insert the record built from it
    pub fn spawn_with(&mut self, build: impl FnOnce(V::Id) -> V) -> V::Id {
        let id = self.allocate();
        let value = build(id);
        debug_assert!(value.id() == id, "record built with a foreign id");
        self.entries.insert(id, value);
        id
    }

    pub fn get(&self, id: V::Id) -> Option<&V> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: V::Id) -> Option<&mut V> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: V::Id) -> bool {
        self.entries.contains_key(&id)
    }

    /// Apply an in-place update to an existing record
    pub fn update(&mut self, id: V::Id, apply: impl FnOnce(&mut V)) -> Result<()> {
        match self.entries.get_mut(&id) {
            Some(value) => {
                apply(value);
                Ok(())
            }
            None => Err(SimError::EntityNotFound(id.to_string())),
        }
    }

    pub fn remove(&mut self, id: V::Id) -> Option<V> {
        self.entries.remove(&id)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&V) -> bool) {
        self.entries.retain(|_, value| keep(value));
    }

    /// Swap in the next generation of this collection.
    ///
    /// Records keep their ids; the id counter is untouched so removed ids stay
    /// retired.
    pub fn replace(&mut self, next: impl IntoIterator<Item = V>) {
        self.entries = next.into_iter().map(|v| (v.id(), v)).collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = V::Id> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copies of every record, in id order
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.values().cloned().collect()
    }
}

/// All entity collections of a world
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    pub trees: Registry<Tree>,
    pub buildings: Registry<Building>,
    pub followers: Registry<Follower>,
    pub enemies: Registry<Enemy>,
    pub projectiles: Registry<Projectile>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Read-only copy of one collection for the display layer
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct CollectionView<V>(pub Vec<V>);

impl<V: Identified + Clone> From<&Registry<V>> for CollectionView<V> {
    fn from(registry: &Registry<V>) -> Self {
        Self(registry.to_vec())
    }
}
