//! Simulation tick - the ordered phases that advance the world by one step

use serde::Serialize;

use crate::core::types::{BuildingId, EnemyId, FollowerId, Point, ProjectileId, TreeId};
use crate::ecs::world::World;
use crate::entity::BuildingType;
use crate::simulation::combat::{advance_enemies, advance_projectiles, spawn_enemies, update_towers};
use crate::simulation::follower_ai::update_followers;
use crate::simulation::population::{clear_felled_trees, grow_population};

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A follower dropped its load at the base
    WoodDelivered { follower: FollowerId, amount: f32 },
    TreeFelled { tree: TreeId },
    BuildingCompleted {
        building: BuildingId,
        building_type: BuildingType,
    },
    /// A worker finished training and became a warrior
    FollowerPromoted { follower: FollowerId },
    FollowerBorn { follower: FollowerId, hut: BuildingId },
    EnemySpawned { enemy: EnemyId, position: Point },
    EnemyKilled { enemy: EnemyId },
    /// A raider walked into the base and vanished
    EnemyReachedBase { enemy: EnemyId },
    ProjectileFired {
        tower: BuildingId,
        projectile: ProjectileId,
        target: EnemyId,
    },
    ProjectileHit {
        projectile: ProjectileId,
        enemy: EnemyId,
    },
}

/// Run a single simulation tick
///
/// Phases run in order, each one seeing everything earlier phases committed:
/// 1. Followers (state machine, then chop/build/delivery effects folded in)
/// 2. Tower fire control
/// 3. Raider spawning
/// 4. Raider advance and absorption at the base
/// 5. Arrow flight and hit resolution
/// 6. Population growth
/// 7. Felled tree cleanup
/// 8. Publish population counters
/// 9. Advance tick counter
///
/// A negative `dt` is treated as zero. Returns the events of this tick for
/// UI logs.
pub fn run_simulation_tick(world: &mut World, dt: f32) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    let dt = dt.max(0.0);
    world.elapsed += dt;

    update_followers(world, dt, &mut events);

    update_towers(world, dt, &mut events);
    spawn_enemies(world, dt, &mut events);
    advance_enemies(world, dt, &mut events);
    advance_projectiles(world, &mut events);

    grow_population(world, dt, &mut events);
    clear_felled_trees(world, &mut events);

    world.refresh_counters();
    world.tick();

    events
}
