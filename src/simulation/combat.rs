//! Combat phase - raider spawning and advance, tower fire control, arrows
//!
//! Towers fire at an enemy's position at the instant of firing, but an arrow
//! hits when it comes within reach of its target's *current* position, so
//! arrows effectively home in on their target.

use ahash::AHashMap;

use crate::city::garrison::is_manned;
use crate::core::types::{BuildingId, EnemyId, Point};
use crate::ecs::world::World;
use crate::entity::{BuildingType, Enemy, Projectile};
use crate::simulation::tick::SimulationEvent;
use crate::spatial::sphere::{random_surface_point, step_toward_on_surface, surface_normal};

/// Where a tower's arrows are launched from
pub fn launch_point(tower_position: Point, height: f32) -> Point {
    tower_position + surface_normal(tower_position) * height
}

/// Accumulate fire timers on manned towers and loose arrows at raiders in range
pub fn update_towers(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    let combat = world.config.combat.clone();

    let towers: Vec<(BuildingId, Point)> = world
        .entities
        .buildings
        .iter()
        .filter(|b| b.is_complete_of(BuildingType::Tower))
        .filter(|b| is_manned(b.id, world.entities.followers.iter()))
        .map(|b| (b.id, b.position))
        .collect();

    for (tower_id, tower_pos) in towers {
        let timer = world.tower_fire_timers.entry(tower_id).or_insert(0.0);
        *timer += dt;
        if *timer < combat.fire_interval {
            continue;
        }

        let Some(target) = world
            .entities
            .enemies
            .iter()
            .find(|e| e.position.distance(tower_pos) < combat.tower_range)
        else {
            // Keep the charge until something wanders into range
            continue;
        };
        let (target_id, target_pos) = (target.id, target.position);
        *timer = 0.0;

        let start = launch_point(tower_pos, combat.tower_launch_height);
        let velocity = (target_pos - start).normalize_or_zero() * combat.projectile_speed;
        let projectile = world.entities.projectiles.spawn_with(|id| Projectile {
            id,
            position: start,
            target_id,
            velocity,
        });

        tracing::debug!("{} fired {} at {}", tower_id, projectile, target_id);
        events.push(SimulationEvent::ProjectileFired {
            tower: tower_id,
            projectile,
            target: target_id,
        });
    }
}

/// Spawn a raider whenever the spawn timer runs past its interval
pub fn spawn_enemies(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    world.spawn_timer += dt;
    if world.spawn_timer <= world.config.combat.enemy_spawn_interval {
        return;
    }
    world.spawn_timer = 0.0;

    let radius = world.radius();
    let position = random_surface_point(&mut world.rng, radius);
    let enemy = world.spawn_enemy(position);

    tracing::info!("Raider {} appeared", enemy);
    events.push(SimulationEvent::EnemySpawned { enemy, position });
}

/// Walk every raider towards its target; drop the dead and those that reached
/// the base
pub fn advance_enemies(world: &mut World, dt: f32, events: &mut Vec<SimulationEvent>) {
    let radius = world.radius();
    let base = world.base_position();
    let combat = &world.config.combat;
    let step = world.config.movement.agent_speed * dt * combat.enemy_speed_factor;

    let mut next = Vec::with_capacity(world.entities.enemies.len());
    for enemy in world.entities.enemies.iter() {
        let position = step_toward_on_surface(enemy.position, enemy.target_pos, step, radius);
        if !enemy.is_alive() {
            continue;
        }
        if position.distance(base) <= combat.base_absorb_distance {
            tracing::info!("Raider {} reached the base", enemy.id);
            events.push(SimulationEvent::EnemyReachedBase { enemy: enemy.id });
            continue;
        }
        next.push(Enemy {
            position,
            ..enemy.clone()
        });
    }
    world.entities.enemies.replace(next);
}

/// Fly every arrow one step and resolve hits.
///
/// Hits are folded in arrow id order against a running health table. An arrow
/// whose target is gone, or was brought to zero by an earlier arrow in the
/// same fold, is dropped without effect.
pub fn advance_projectiles(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let combat = &world.config.combat;
    let mut health: AHashMap<EnemyId, (f32, Point)> = world
        .entities
        .enemies
        .iter()
        .map(|e| (e.id, (e.health, e.position)))
        .collect();

    let mut in_flight = Vec::with_capacity(world.entities.projectiles.len());
    for projectile in world.entities.projectiles.iter() {
        let Some((remaining, target_pos)) = health.get_mut(&projectile.target_id) else {
            continue;
        };
        if *remaining <= 0.0 {
            continue;
        }

        let position = projectile.position + projectile.velocity;
        if position.distance(*target_pos) < combat.projectile_hit_radius {
            *remaining -= combat.projectile_damage;
            events.push(SimulationEvent::ProjectileHit {
                projectile: projectile.id,
                enemy: projectile.target_id,
            });
        } else {
            in_flight.push(Projectile {
                position,
                ..projectile.clone()
            });
        }
    }
    world.entities.projectiles.replace(in_flight);

    for enemy in world.entities.enemies.iter_mut() {
        if let Some((remaining, _)) = health.get(&enemy.id) {
            enemy.health = *remaining;
        }
    }

    let killed: Vec<EnemyId> = world
        .entities
        .enemies
        .iter()
        .filter(|e| !e.is_alive())
        .map(|e| e.id)
        .collect();
    for enemy in killed {
        world.entities.enemies.remove(enemy);
        tracing::info!("Raider {} killed", enemy);
        events.push(SimulationEvent::EnemyKilled { enemy });
    }
}
