//! Integration tests for the colony economy
//!
//! These tests drive whole ticks through `World::advance` and check the
//! worker loop end to end:
//! - Gathering, carrying and delivering wood
//! - Construction with several builders on one site
//! - Hut completion raising the population cap and producing newborns
//! - Training workers into warriors

use shaman_sphere::core::config::SimulationConfig;
use shaman_sphere::core::types::{BuildingId, FollowerId, Point, TargetRef, TreeId};
use shaman_sphere::ecs::world::World;
use shaman_sphere::entity::{BuildingType, FollowerRole, FollowerState, MAX_PROGRESS};
use shaman_sphere::simulation::tick::SimulationEvent;
use shaman_sphere::spatial::sphere::surface_point;

const DT: f32 = 1.0 / 60.0;

fn empty_world() -> World {
    World::empty(SimulationConfig::default()).unwrap()
}

fn order(world: &mut World, follower: FollowerId, target: TargetRef) {
    assert!(world.select_follower(follower).is_applied());
    assert!(world.issue_interact(target).is_applied());
}

/// A worker next to a tree on the far side of the planet chops for 40 ticks:
/// the tree loses 20 health, the worker is full and already heading home.
#[test]
fn test_forty_chops_fill_a_load() {
    let mut world = empty_world();
    let spot = surface_point(2.0, 1.0, 20.0);
    let tree = world.spawn_tree(spot);
    let worker = world.spawn_follower(spot, FollowerRole::Worker);
    order(&mut world, worker, TargetRef::Tree(tree));

    for _ in 0..40 {
        world.advance(DT);
    }

    assert_eq!(world.entities.trees.get(tree).unwrap().health, 80.0);
    let f = world.entities.followers.get(worker).unwrap();
    assert_eq!(f.wood_carrying, 20.0);
    assert_eq!(f.state, FollowerState::Deliver);
    assert_eq!(world.ledger.wood, 800.0);
}

/// Two workers on the same tree both take their share in the same tick
#[test]
fn test_simultaneous_choppers_stack() {
    let mut world = empty_world();
    let spot = surface_point(1.5, 0.0, 20.0);
    let tree = world.spawn_tree(spot);
    for _ in 0..2 {
        let worker = world.spawn_follower(spot, FollowerRole::Worker);
        order(&mut world, worker, TargetRef::Tree(tree));
    }

    world.advance(DT);

    assert_eq!(world.entities.trees.get(tree).unwrap().health, 99.0);
}

/// A worker carries a full load across the planet and hands it in
#[test]
fn test_round_trip_delivers_wood() {
    let mut world = empty_world();
    let spot = surface_point(0.6, 0.0, 20.0);
    let tree = world.spawn_tree(spot);
    let worker = world.spawn_follower(spot, FollowerRole::Worker);
    order(&mut world, worker, TargetRef::Tree(tree));

    let mut delivered = Vec::new();
    for _ in 0..2000 {
        for event in world.advance(DT) {
            if let SimulationEvent::WoodDelivered { follower, amount } = event {
                delivered.push((follower, amount));
            }
        }
        if !delivered.is_empty() {
            break;
        }
    }

    assert_eq!(delivered, vec![(worker, 20.0)]);
    assert_eq!(world.ledger.wood, 820.0);
    assert_eq!(world.ledger.total_delivered, 20.0);
    let f = world.entities.followers.get(worker).unwrap();
    assert_eq!(f.state, FollowerState::Wander);
    assert_eq!(f.wood_carrying, 0.0);
    assert!(f.target.is_none());
}

/// When the tree a gatherer is working disappears, it brings home what it has
#[test]
fn test_felled_tree_sends_gatherer_home() {
    let mut world = empty_world();
    let spot = surface_point(1.0, 0.0, 20.0);
    let tree = world.spawn_tree(spot);
    world.entities.trees.get_mut(tree).unwrap().health = 1.0;
    let worker = world.spawn_follower(spot, FollowerRole::Worker);
    order(&mut world, worker, TargetRef::Tree(tree));

    // Two chops bring the tree down; it is cleared at the end of that tick
    let events = world.advance(DT);
    assert!(!events.contains(&SimulationEvent::TreeFelled { tree }));
    let events = world.advance(DT);
    assert!(events.contains(&SimulationEvent::TreeFelled { tree }));
    assert!(!world.entities.trees.contains(tree));

    world.advance(DT);

    let f = world.entities.followers.get(worker).unwrap();
    assert_eq!(f.state, FollowerState::Deliver);
    assert_eq!(f.wood_carrying, 1.0);
}

/// Three builders on one site each add the build increment in the same tick
#[test]
fn test_builders_stack_on_one_site() {
    let mut world = empty_world();
    let spot = surface_point(0.8, 2.0, 20.0);
    let site = world.spawn_building(BuildingType::Hut, spot);
    for _ in 0..3 {
        let worker = world.spawn_follower(spot, FollowerRole::Worker);
        order(&mut world, worker, TargetRef::Building(site));
    }

    world.advance(DT);

    let progress = world.entities.buildings.get(site).unwrap().progress;
    assert!((progress - 0.6).abs() < 1e-5);
}

/// Finishing a hut raises the cap by three and starts population growth
#[test]
fn test_hut_completion_grows_population() {
    let mut world = empty_world();
    let spot = surface_point(0.3, 0.0, 20.0);
    for i in 0..5 {
        world.spawn_follower(surface_point(0.2, i as f32, 20.0), FollowerRole::Worker);
    }
    let site = world.spawn_building(BuildingType::Hut, spot);
    world.entities.buildings.get_mut(site).unwrap().progress = 99.9;
    let builder = world.spawn_follower(spot, FollowerRole::Worker);
    order(&mut world, builder, TargetRef::Building(site));

    let events = world.advance(DT);

    assert!(events.contains(&SimulationEvent::BuildingCompleted {
        building: site,
        building_type: BuildingType::Hut,
    }));
    let hut = world.entities.buildings.get(site).unwrap();
    assert!(hut.is_complete);
    assert_eq!(hut.progress, MAX_PROGRESS);
    assert_eq!(world.ledger.max_population_cap, 8);
    assert_eq!(world.ledger.population, 6);

    // 0.05 growth per second with one hut: a newborn inside 21 seconds
    let mut born = Vec::new();
    for _ in 0..(21 * 60) {
        for event in world.advance(DT) {
            if let SimulationEvent::FollowerBorn { follower, hut } = event {
                born.push((follower, hut));
            }
        }
    }

    assert_eq!(born.len(), 1);
    assert_eq!(born[0].1, site);
    assert_eq!(world.ledger.population, 7);
    let newborn = world.entities.followers.get(born[0].0).unwrap();
    assert_eq!(newborn.role, FollowerRole::Worker);
}

/// The builder of a training hut trains there the moment it is finished
#[test]
fn test_training_hut_promotes_builder() {
    let mut world = empty_world();
    let spot = surface_point(0.9, 0.5, 20.0);
    let site = world.spawn_building(BuildingType::WarriorHut, spot);
    world.entities.buildings.get_mut(site).unwrap().progress = 99.9;
    let worker = world.spawn_follower(spot, FollowerRole::Worker);
    order(&mut world, worker, TargetRef::Building(site));

    // First tick completes the hut, second tick trains
    world.advance(DT);
    assert_eq!(
        world.entities.followers.get(worker).unwrap().role,
        FollowerRole::Worker
    );

    let events = world.advance(DT);
    assert!(events.contains(&SimulationEvent::FollowerPromoted { follower: worker }));
    let f = world.entities.followers.get(worker).unwrap();
    assert_eq!(f.role, FollowerRole::Warrior);
    assert_eq!(f.state, FollowerState::Wander);
}

/// Commanded movement ends in WANDER at the destination
#[test]
fn test_move_command_reaches_destination() {
    let mut world = empty_world();
    let worker = world.spawn_follower(surface_point(1.0, 0.0, 20.0), FollowerRole::Worker);
    let destination = surface_point(1.1, 0.3, 20.0);
    world.select_follower(worker);
    world.issue_move(destination);

    for _ in 0..600 {
        world.advance(DT);
        if world.entities.followers.get(worker).unwrap().state != FollowerState::Move {
            break;
        }
    }

    let f = world.entities.followers.get(worker).unwrap();
    assert_eq!(f.state, FollowerState::Wander);
    assert!(f.position.distance(destination) < 0.5);
}

/// Sending a follower to a tree or building that does not exist is not an
/// error: the follower gives up and goes back to wandering
#[test]
fn test_interact_with_missing_target_falls_back_to_wander() {
    let mut world = empty_world();
    let worker = world.spawn_follower(surface_point(1.0, 0.0, 20.0), FollowerRole::Worker);
    world.select_follower(worker);

    for target in [TargetRef::Tree(TreeId(999)), TargetRef::Building(BuildingId(999))] {
        assert!(world.issue_move(surface_point(1.4, 0.5, 20.0)).is_applied());
        assert_eq!(
            world.entities.followers.get(worker).unwrap().state,
            FollowerState::Move
        );

        assert!(world.issue_interact(target).is_applied());
        world.advance(DT);

        let f = world.entities.followers.get(worker).unwrap();
        assert_eq!(f.state, FollowerState::Wander, "{target}");
        assert!(f.target.is_none());
    }
}

/// Idle followers drift back into the patrol ring around the base
#[test]
fn test_idle_followers_return_home() {
    let mut world = empty_world();
    let worker = world.spawn_follower(surface_point(1.2, 0.0, 20.0), FollowerRole::Worker);

    for _ in 0..(60 * 60) {
        world.advance(DT);
    }

    let f = world.entities.followers.get(worker).unwrap();
    assert!(f.position.distance(world.base_position()) <= 6.5);
}

/// Ledger and population counters stay consistent over a busy run
#[test]
fn test_counters_stay_consistent() {
    let mut world = World::new(SimulationConfig::default()).unwrap();
    let followers: Vec<FollowerId> = world.entities.followers.ids().collect();
    let trees: Vec<_> = world.entities.trees.ids().collect();
    for (follower, tree) in followers.iter().zip(trees.iter()) {
        order(&mut world, *follower, TargetRef::Tree(*tree));
    }
    world.enter_placement(BuildingType::Hut);
    let site = world.confirm_placement(Point::new(2.0, 20.0, 0.0));
    assert!(site.is_applied());

    let mut last_cap = world.ledger.max_population_cap;
    for _ in 0..(90 * 30) {
        world.advance(1.0 / 30.0);

        assert_eq!(world.ledger.population as usize, world.entities.followers.len());
        assert!(world.ledger.max_population_cap >= last_cap);
        last_cap = world.ledger.max_population_cap;

        let expected = 800.0 + world.ledger.total_delivered - world.ledger.total_spent;
        assert!((world.ledger.wood - expected).abs() < 1e-2);
        assert!(world.ledger.wood >= 0.0);
        assert!(world
            .entities
            .followers
            .iter()
            .all(|f| f.wood_carrying <= 20.0 + 1e-4));
    }
}
