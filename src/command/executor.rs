//! Command execution - applies player commands to the world between ticks
//!
//! Commands address the selected follower. Any command that gives a follower
//! a new job also takes it off every tower roster it was on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::city::garrison::{self, GarrisonRejection};
use crate::city::placement;
use crate::core::types::{BuildingId, FollowerId, Point, TargetRef};
use crate::ecs::world::World;
use crate::entity::{BuildingType, FollowerState};
use crate::spatial::sphere::project_to_surface;

/// Player command, as issued by the input layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    SelectFollower { follower: FollowerId },
    /// Walk the selected follower to a point
    IssueMove { point: Point },
    /// Send the selected follower to work on a tree or building
    IssueInteract { target: TargetRef },
    IssueGuard { tower: BuildingId },
    EnterPlacement { building_type: BuildingType },
    CancelPlacement,
    ConfirmPlacement { point: Point },
}

/// Why a command was not applied
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRejection {
    #[error("no follower selected")]
    NoSelection,
    #[error("follower does not exist")]
    UnknownFollower,
    #[error("target does not exist")]
    UnknownTarget,
    #[error("guard assignment refused: {0}")]
    Garrison(#[from] GarrisonRejection),
    #[error("not enough wood")]
    Unaffordable,
    #[error("not in placement mode")]
    NotPlacing,
}

/// Result of executing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    Applied,
    /// A construction site was placed
    Placed(BuildingId),
    Rejected(CommandRejection),
}

impl ExecutionResult {
    pub fn is_applied(&self) -> bool {
        !matches!(self, ExecutionResult::Rejected(_))
    }
}

impl From<Result<(), CommandRejection>> for ExecutionResult {
    fn from(result: Result<(), CommandRejection>) -> Self {
        match result {
            Ok(()) => ExecutionResult::Applied,
            Err(rejection) => ExecutionResult::Rejected(rejection),
        }
    }
}

/// Executes player commands against the world
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn execute(world: &mut World, command: &Command) -> ExecutionResult {
        let result = match command {
            Command::SelectFollower { follower } => select(world, *follower).into(),
            Command::IssueMove { point } => issue_move(world, *point).into(),
            Command::IssueInteract { target } => issue_interact(world, *target).into(),
            Command::IssueGuard { tower } => issue_guard(world, *tower).into(),
            Command::EnterPlacement { building_type } => {
                if placement::enter_placement(world, *building_type) {
                    ExecutionResult::Applied
                } else {
                    ExecutionResult::Rejected(CommandRejection::Unaffordable)
                }
            }
            Command::CancelPlacement => {
                placement::cancel_placement(world);
                ExecutionResult::Applied
            }
            Command::ConfirmPlacement { point } => {
                match placement::confirm_placement(world, *point) {
                    Some(building) => ExecutionResult::Placed(building),
                    None => ExecutionResult::Rejected(CommandRejection::NotPlacing),
                }
            }
        };

        if let ExecutionResult::Rejected(reason) = result {
            tracing::debug!("Command {:?} rejected: {}", command, reason);
        }
        result
    }
}

fn select(world: &mut World, follower: FollowerId) -> Result<(), CommandRejection> {
    if !world.entities.followers.contains(follower) {
        return Err(CommandRejection::UnknownFollower);
    }
    world.selected_follower = Some(follower);
    Ok(())
}

/// The selected follower, if it still exists
fn selected(world: &World) -> Result<FollowerId, CommandRejection> {
    let id = world.selected_follower.ok_or(CommandRejection::NoSelection)?;
    if world.entities.followers.contains(id) {
        Ok(id)
    } else {
        Err(CommandRejection::UnknownFollower)
    }
}

fn issue_move(world: &mut World, point: Point) -> Result<(), CommandRejection> {
    let id = selected(world)?;
    let destination = project_to_surface(point, world.radius());

    garrison::release(&mut world.entities.buildings, id);
    let follower = world
        .entities
        .followers
        .get_mut(id)
        .ok_or(CommandRejection::UnknownFollower)?;
    follower.state = FollowerState::Move;
    follower.target = None;
    follower.target_pos = Some(destination);
    Ok(())
}

fn issue_interact(world: &mut World, target: TargetRef) -> Result<(), CommandRejection> {
    let id = selected(world)?;

    // A target that no longer exists is still assigned; the follower drops
    // back to WANDER on its next tick
    let state = match target {
        TargetRef::Tree(_) => FollowerState::Gather,
        TargetRef::Building(building) => {
            let follower = world
                .entities
                .followers
                .get(id)
                .ok_or(CommandRejection::UnknownFollower)?;
            let capacity = world.config.combat.tower_capacity;
            let guards = world
                .entities
                .buildings
                .get(building)
                .is_some_and(|site| garrison::check_assignment(site, follower, capacity).is_ok());
            if guards {
                return issue_guard(world, building);
            }
            FollowerState::Build
        }
    };

    garrison::release(&mut world.entities.buildings, id);
    let follower = world
        .entities
        .followers
        .get_mut(id)
        .ok_or(CommandRejection::UnknownFollower)?;
    follower.assign(state, target);
    Ok(())
}

fn issue_guard(world: &mut World, tower: BuildingId) -> Result<(), CommandRejection> {
    let id = selected(world)?;
    {
        let site = world
            .entities
            .buildings
            .get(tower)
            .ok_or(CommandRejection::UnknownTarget)?;
        let follower = world
            .entities
            .followers
            .get(id)
            .ok_or(CommandRejection::UnknownFollower)?;
        garrison::check_assignment(site, follower, world.config.combat.tower_capacity)?;
    }

    garrison::release(&mut world.entities.buildings, id);
    if let Some(site) = world.entities.buildings.get_mut(tower) {
        garrison::enlist(site, id);
    }
    if let Some(follower) = world.entities.followers.get_mut(id) {
        follower.assign(FollowerState::Guard, TargetRef::Building(tower));
    }
    tracing::debug!("{} now guards {}", id, tower);
    Ok(())
}

impl World {
    pub fn select_follower(&mut self, follower: FollowerId) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::SelectFollower { follower })
    }

    pub fn issue_move(&mut self, point: Point) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::IssueMove { point })
    }

    pub fn issue_interact(&mut self, target: TargetRef) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::IssueInteract { target })
    }

    pub fn issue_guard(&mut self, tower: BuildingId) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::IssueGuard { tower })
    }

    pub fn enter_placement(&mut self, building_type: BuildingType) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::EnterPlacement { building_type })
    }

    pub fn cancel_placement(&mut self) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::CancelPlacement)
    }

    pub fn confirm_placement(&mut self, point: Point) -> ExecutionResult {
        CommandExecutor::execute(self, &Command::ConfirmPlacement { point })
    }
}
