//! Tower garrison rosters
//!
//! A tower's `assigned_workers` and its guards' `target` form a two-way link.
//! Capacity is checked when a guard is assigned; rosters are pruned when a
//! guard is re-commanded elsewhere.

use thiserror::Error;

use crate::core::types::{BuildingId, FollowerId, TargetRef};
use crate::entity::{Building, BuildingType, Follower, FollowerRole};
use crate::world::Registry;

/// Why a guard assignment was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GarrisonRejection {
    #[error("building is not a tower")]
    NotATower,
    #[error("tower is still under construction")]
    UnderConstruction,
    #[error("only warriors can guard a tower")]
    NotAWarrior,
    #[error("tower garrison is full")]
    Full,
}

/// Check whether `follower` may join the garrison of `tower`
pub fn check_assignment(
    tower: &Building,
    follower: &Follower,
    capacity: usize,
) -> Result<(), GarrisonRejection> {
    if tower.building_type != BuildingType::Tower {
        return Err(GarrisonRejection::NotATower);
    }
    if !tower.is_complete {
        return Err(GarrisonRejection::UnderConstruction);
    }
    if follower.role != FollowerRole::Warrior {
        return Err(GarrisonRejection::NotAWarrior);
    }
    if tower.assigned_workers.contains(&follower.id) {
        return Ok(());
    }
    if tower.assigned_workers.len() >= capacity {
        return Err(GarrisonRejection::Full);
    }
    Ok(())
}

/// Add a follower to a tower roster. Re-adding an existing guard is a no-op.
pub fn enlist(tower: &mut Building, follower_id: FollowerId) {
    if !tower.assigned_workers.contains(&follower_id) {
        tower.assigned_workers.push(follower_id);
    }
}

/// Remove a follower from every roster it is on. Returns the towers it left.
pub fn release(buildings: &mut Registry<Building>, follower_id: FollowerId) -> Vec<BuildingId> {
    let mut left = Vec::new();
    for building in buildings.iter_mut() {
        let before = building.assigned_workers.len();
        building.assigned_workers.retain(|id| *id != follower_id);
        if building.assigned_workers.len() != before {
            left.push(building.id);
        }
    }
    left
}

/// Whether a tower has at least one follower actually on guard duty for it
pub fn is_manned<'a>(
    tower_id: BuildingId,
    followers: impl IntoIterator<Item = &'a Follower>,
) -> bool {
    let target = TargetRef::Building(tower_id);
    followers.into_iter().any(|f| f.is_guarding(target))
}
