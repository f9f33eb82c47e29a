//! Follower state machine
//!
//! Each tick every follower is stepped independently from the start-of-tick
//! view of trees and buildings. Effects on other collections (chopping,
//! building, delivering) are collected as [`WorkIntents`] and folded in one
//! pass after all followers have moved, so simultaneous workers stack.
//!
//! State handlers run in a fixed order and a follower may pass through
//! several of them in one tick: a gatherer that fills up starts walking home
//! immediately, a builder that finds its training hut finished starts
//! training immediately.

use rand::Rng;
use std::f32::consts::TAU;

use crate::city::construction::fold_build_contributions;
use crate::core::config::SimulationConfig;
use crate::core::types::{BuildingId, FollowerId, Point, TreeId};
use crate::ecs::world::World;
use crate::entity::{Building, BuildingType, Follower, FollowerRole, FollowerState, Tree};
use crate::simulation::tick::SimulationEvent;
use crate::spatial::sphere::{step_toward_on_surface, surface_offset};
use crate::world::Registry;

/// Effects a follower wants to apply outside its own record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkIntents {
    pub chops: Vec<(TreeId, f32)>,
    pub builds: Vec<(BuildingId, f32)>,
    pub deliveries: Vec<(FollowerId, f32)>,
    pub promotions: Vec<FollowerId>,
}

/// Read-only view a follower decides from
pub struct FollowerContext<'a> {
    pub trees: &'a Registry<Tree>,
    pub buildings: &'a Registry<Building>,
    pub config: &'a SimulationConfig,
    pub base: Point,
    pub dt: f32,
}

impl FollowerContext<'_> {
    fn step_length(&self, factor: f32) -> f32 {
        self.config.movement.agent_speed * self.dt * factor
    }

    fn walk(&self, follower: &mut Follower, target: Point, factor: f32) {
        follower.position = step_toward_on_surface(
            follower.position,
            target,
            self.step_length(factor),
            self.config.world.planet_radius,
        );
    }

    fn work_walk(&self, follower: &mut Follower, target: Point) {
        self.walk(follower, target, self.config.movement.work_speed_factor);
    }
}

/// Run the follower phase and commit its effects
pub fn update_followers(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    let base = world.base_position();
    let mut intents = WorkIntents::default();

    let next: Vec<Follower> = {
        let ctx = FollowerContext {
            trees: &world.entities.trees,
            buildings: &world.entities.buildings,
            config: &world.config,
            base,
            dt,
        };
        let rng = &mut world.rng;
        world
            .entities
            .followers
            .iter()
            .map(|f| step_follower(f.clone(), &ctx, &mut *rng, &mut intents))
            .collect()
    };
    world.entities.followers.replace(next);

    commit_intents(world, intents, events);
}

/// Advance one follower by one tick
pub fn step_follower<R: Rng + ?Sized>(
    mut follower: Follower,
    ctx: &FollowerContext<'_>,
    rng: &mut R,
    intents: &mut WorkIntents,
) -> Follower {
    if follower.state == FollowerState::Wander {
        wander(&mut follower, ctx, rng);
    }
    if follower.state == FollowerState::Move {
        move_to_point(&mut follower, ctx);
    }
    if follower.state == FollowerState::Gather {
        gather(&mut follower, ctx, intents);
    }
    if follower.state == FollowerState::Deliver {
        deliver(&mut follower, ctx, intents);
    }
    if follower.state == FollowerState::Build {
        build(&mut follower, ctx, intents);
    }
    if follower.state == FollowerState::Train {
        train(&mut follower, ctx, intents);
    }
    if follower.state == FollowerState::Guard {
        guard(&mut follower, ctx);
    }
    follower
}

fn wander<R: Rng + ?Sized>(follower: &mut Follower, ctx: &FollowerContext<'_>, rng: &mut R) {
    let movement = &ctx.config.movement;

    if follower.position.distance(ctx.base) > movement.home_radius {
        ctx.walk(follower, ctx.base, movement.home_speed_factor);
        return;
    }

    let spot = match follower.target_pos {
        Some(spot) if follower.position.distance(spot) >= movement.arrival_threshold => spot,
        _ => {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen::<f32>() * movement.patrol_radius;
            surface_offset(ctx.base, angle, distance, ctx.config.world.planet_radius)
        }
    };
    follower.target_pos = Some(spot);
    ctx.walk(follower, spot, movement.patrol_speed_factor);
}

fn move_to_point(follower: &mut Follower, ctx: &FollowerContext<'_>) {
    let Some(destination) = follower.target_pos else {
        follower.go_idle();
        return;
    };

    ctx.work_walk(follower, destination);
    if follower.position.distance(destination) < ctx.config.movement.arrival_threshold {
        follower.state = FollowerState::Wander;
        follower.target_pos = None;
    }
}

fn gather(follower: &mut Follower, ctx: &FollowerContext<'_>, intents: &mut WorkIntents) {
    let tree = follower
        .target
        .and_then(|t| t.as_tree())
        .and_then(|id| ctx.trees.get(id))
        .filter(|t| t.is_standing());

    let Some(tree) = tree else {
        if follower.wood_carrying > 0.0 {
            follower.state = FollowerState::Deliver;
        } else {
            follower.go_idle();
        }
        return;
    };

    if follower.position.distance(tree.position) > ctx.config.movement.interaction_range {
        ctx.work_walk(follower, tree.position);
        return;
    }

    let chop = ctx.config.economy.chop_strength;
    intents.chops.push((tree.id, chop));
    follower.wood_carrying += chop;
    if follower.wood_carrying >= ctx.config.economy.wood_capacity {
        follower.state = FollowerState::Deliver;
    }
}

fn deliver(follower: &mut Follower, ctx: &FollowerContext<'_>, intents: &mut WorkIntents) {
    if follower.position.distance(ctx.base) > ctx.config.movement.interaction_range {
        ctx.work_walk(follower, ctx.base);
        return;
    }

    intents.deliveries.push((follower.id, follower.wood_carrying));
    follower.wood_carrying = 0.0;
    follower.go_idle();
    follower.target_pos = None;
}

fn build(follower: &mut Follower, ctx: &FollowerContext<'_>, intents: &mut WorkIntents) {
    let building = follower
        .target
        .and_then(|t| t.as_building())
        .and_then(|id| ctx.buildings.get(id));

    match building {
        Some(site) if !site.is_complete => {
            if follower.position.distance(site.position) > ctx.config.movement.interaction_range {
                ctx.work_walk(follower, site.position);
            } else {
                intents
                    .builds
                    .push((site.id, ctx.config.economy.build_strength));
            }
        }
        Some(hut)
            if hut.is_complete_of(BuildingType::WarriorHut)
                && follower.role == FollowerRole::Worker =>
        {
            follower.state = FollowerState::Train;
        }
        _ => follower.go_idle(),
    }
}

fn train(follower: &mut Follower, ctx: &FollowerContext<'_>, intents: &mut WorkIntents) {
    let hut = follower
        .target
        .and_then(|t| t.as_building())
        .and_then(|id| ctx.buildings.get(id))
        .filter(|b| b.is_complete);

    let Some(hut) = hut else {
        follower.go_idle();
        return;
    };

    if follower.position.distance(hut.position) > ctx.config.movement.training_range {
        ctx.work_walk(follower, hut.position);
        return;
    }

    if follower.role == FollowerRole::Worker {
        follower.role = FollowerRole::Warrior;
        intents.promotions.push(follower.id);
    }
    follower.go_idle();
}

fn guard(follower: &mut Follower, ctx: &FollowerContext<'_>) {
    let tower = follower
        .target
        .and_then(|t| t.as_building())
        .and_then(|id| ctx.buildings.get(id));

    let Some(tower) = tower else {
        follower.go_idle();
        return;
    };

    // Shooting is the tower's job; guards only take up their post
    if follower.position.distance(tower.position) > ctx.config.movement.guard_hold_distance {
        ctx.work_walk(follower, tower.position);
    }
}

/// Fold the follower phase's effects onto trees, buildings and the ledger
fn commit_intents(world: &mut World, intents: WorkIntents, events: &mut Vec<SimulationEvent>) {
    for (tree_id, amount) in &intents.chops {
        if let Some(tree) = world.entities.trees.get_mut(*tree_id) {
            tree.chop(*amount);
        }
    }

    for (follower_id, amount) in intents.deliveries {
        world.ledger.deposit(amount);
        events.push(SimulationEvent::WoodDelivered {
            follower: follower_id,
            amount,
        });
    }

    for building_id in fold_build_contributions(&mut world.entities.buildings, &intents.builds) {
        if let Some(building) = world.entities.buildings.get(building_id) {
            tracing::info!("{} finished: {}", building.building_type.label(), building_id);
            events.push(SimulationEvent::BuildingCompleted {
                building: building_id,
                building_type: building.building_type,
            });
        }
    }

    for follower_id in intents.promotions {
        tracing::info!("{} trained as a warrior", follower_id);
        events.push(SimulationEvent::FollowerPromoted {
            follower: follower_id,
        });
    }
}
