//! Entity records stored in the world registries

pub mod building;
pub mod enemy;
pub mod follower;
pub mod tree;

pub use building::{Building, BuildingType, MAX_PROGRESS};
pub use enemy::{Enemy, Projectile};
pub use follower::{Follower, FollowerRole, FollowerState};
pub use tree::Tree;
