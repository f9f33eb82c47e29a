//! Raiders and the arrows shot at them

use serde::{Deserialize, Serialize};

use crate::core::types::{EnemyId, Point, ProjectileId};

/// Hostile agent walking straight at the base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Point,
    pub health: f32,
    /// Fixed at spawn, never re-aimed
    pub target_pos: Point,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Point, health: f32, target_pos: Point) -> Self {
        Self {
            id,
            position,
            health,
            target_pos,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Arrow in flight. Not bound to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Point,
    /// Weak reference to the enemy this arrow was shot at
    pub target_id: EnemyId,
    /// Displacement per tick
    pub velocity: Point,
}
