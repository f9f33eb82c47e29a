//! Trees - the only wood source

use serde::{Deserialize, Serialize};

use crate::core::types::{Point, TreeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub id: TreeId,
    pub position: Point,
    pub health: f32,
    pub max_health: f32,
}

impl Tree {
    pub fn new(id: TreeId, position: Point, max_health: f32) -> Self {
        Self {
            id,
            position,
            health: max_health,
            max_health,
        }
    }

    /// A tree with no health left is felled and gets cleaned up
    pub fn is_standing(&self) -> bool {
        self.health > 0.0
    }

    /// Remove `amount` of health, never dropping below zero
    pub fn chop(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chop_clamps_at_zero() {
        let mut tree = Tree::new(TreeId(0), Point::Y, 1.0);
        tree.chop(0.5);
        assert!(tree.is_standing());
        tree.chop(0.75);
        assert_eq!(tree.health, 0.0);
        assert!(!tree.is_standing());
    }
}
