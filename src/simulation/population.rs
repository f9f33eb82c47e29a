//! Population growth and world cleanup
//!
//! Completed huts raise the population cap and slowly produce newborn workers
//! while the colony is below that cap.

use crate::city::construction::{count_complete, first_complete};
use crate::city::ledger::max_population_cap;
use crate::ecs::world::World;
use crate::entity::{BuildingType, FollowerRole};
use crate::simulation::tick::SimulationEvent;
use crate::spatial::sphere::random_surface_point;

/// Advance the growth timer and spawn a worker at the first finished hut
/// when it fills up. The newborn sets off toward a random point on the planet.
pub fn grow_population(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    let huts = count_complete(&world.entities.buildings, BuildingType::Hut);
    let cap = max_population_cap(huts, &world.config.population);
    let population = world.entities.followers.len();

    if huts == 0 || population >= cap as usize {
        return;
    }

    world.growth_timer += dt * world.config.population.growth_rate * huts as f32;
    if world.growth_timer < 1.0 {
        return;
    }
    world.growth_timer = 0.0;

    let Some(home) = first_complete(&world.entities.buildings, BuildingType::Hut) else {
        return;
    };
    let (hut, position) = (home.id, home.position);
    let follower = world.spawn_follower(position, FollowerRole::Worker);
    let radius = world.radius();
    let wander_to = random_surface_point(&mut world.rng, radius);
    if let Some(newborn) = world.entities.followers.get_mut(follower) {
        newborn.target_pos = Some(wander_to);
    }

    tracing::info!("{} was born at {}", follower, hut);
    events.push(SimulationEvent::FollowerBorn { follower, hut });
}

/// Drop trees that have been chopped down
pub fn clear_felled_trees(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let felled: Vec<_> = world
        .entities
        .trees
        .iter()
        .filter(|t| !t.is_standing())
        .map(|t| t.id)
        .collect();

    for tree in felled {
        world.entities.trees.remove(tree);
        tracing::debug!("{} felled", tree);
        events.push(SimulationEvent::TreeFelled { tree });
    }
}
