//! Followers - the colony's autonomous workers

use serde::{Deserialize, Serialize};

use crate::core::types::{FollowerId, Point, TargetRef};

/// What a follower is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowerState {
    /// Idle: walk home, then patrol around the base
    Wander,
    /// Commanded walk to a point
    Move,
    /// Chop a tree
    Gather,
    /// Raise a building
    Build,
    /// Carry wood back to the base
    Deliver,
    /// Walk into a training hut to become a warrior
    Train,
    /// Man a tower
    Guard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowerRole {
    Worker,
    Warrior,
    Shaman,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follower {
    pub id: FollowerId,
    pub position: Point,
    pub state: FollowerState,
    pub role: FollowerRole,
    /// Weak reference to the tree or building being worked on
    pub target: Option<TargetRef>,
    /// Move destination or current patrol spot
    pub target_pos: Option<Point>,
    pub wood_carrying: f32,
}

impl Follower {
    pub fn new(id: FollowerId, position: Point, role: FollowerRole) -> Self {
        Self {
            id,
            position,
            state: FollowerState::Wander,
            role,
            target: None,
            target_pos: None,
            wood_carrying: 0.0,
        }
    }

    /// Drop the current job and go idle
    pub fn go_idle(&mut self) {
        self.state = FollowerState::Wander;
        self.target = None;
    }

    /// Assign a new job, replacing whatever the follower was doing
    pub fn assign(&mut self, state: FollowerState, target: TargetRef) {
        self.state = state;
        self.target = Some(target);
        self.target_pos = None;
    }

    pub fn is_guarding(&self, target: TargetRef) -> bool {
        self.state == FollowerState::Guard && self.target == Some(target)
    }
}
