//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation step counter
pub type Tick = u64;

/// World-space point or direction. Positions of grounded entities lie on the
/// planet surface.
pub type Point = glam::Vec3;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier for trees
    TreeId,
    "tree"
);
entity_id!(
    /// Unique identifier for buildings
    BuildingId,
    "building"
);
entity_id!(
    /// Unique identifier for followers
    FollowerId,
    "follower"
);
entity_id!(
    /// Unique identifier for enemies
    EnemyId,
    "enemy"
);
entity_id!(
    /// Unique identifier for projectiles
    ProjectileId,
    "arrow"
);

/// Non-owning reference from a follower to the entity it works on.
///
/// Resolved by lookup every tick; a reference whose entity has disappeared
/// simply fails to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum TargetRef {
    Tree(TreeId),
    Building(BuildingId),
}

impl TargetRef {
    pub fn as_tree(&self) -> Option<TreeId> {
        match self {
            TargetRef::Tree(id) => Some(*id),
            TargetRef::Building(_) => None,
        }
    }

    pub fn as_building(&self) -> Option<BuildingId> {
        match self {
            TargetRef::Building(id) => Some(*id),
            TargetRef::Tree(_) => None,
        }
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetRef::Tree(id) => id.fmt(f),
            TargetRef::Building(id) => id.fmt(f),
        }
    }
}
