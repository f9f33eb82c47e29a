//! World - owns every entity collection, the ledger and the engine timers

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::city::construction::count_complete;
use crate::city::ledger::Ledger;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{BuildingId, EnemyId, FollowerId, Point, Tick, TreeId};
use crate::entity::{Building, BuildingType, Enemy, Follower, FollowerRole, Projectile, Tree};
use crate::simulation::tick::{run_simulation_tick, SimulationEvent};
use crate::spatial::sphere::{project_to_surface, random_surface_point};
use crate::world::{CollectionView, EntityRegistry};

/// The game world
pub struct World {
    pub config: SimulationConfig,
    pub entities: EntityRegistry,
    pub ledger: Ledger,
    pub current_tick: Tick,
    /// Simulated seconds since creation
    pub elapsed: f32,
    /// Seconds accumulated towards the next raider spawn
    pub spawn_timer: f32,
    /// Progress towards the next newborn (1.0 = birth)
    pub growth_timer: f32,
    /// Seconds accumulated per manned tower towards its next shot
    pub tower_fire_timers: AHashMap<BuildingId, f32>,
    pub selected_follower: Option<FollowerId>,
    /// Building type awaiting a placement point
    pub placement: Option<BuildingType>,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
}

impl World {
    /// Create a populated world: scattered trees and the starting followers,
    /// the first of whom is the shaman
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;
        let radius = world.radius();

        for _ in 0..world.config.world.tree_count {
            let position = random_surface_point(&mut world.rng, radius);
            world.spawn_tree(position);
        }

        for i in 0..world.config.world.initial_followers {
            let role = if i == 0 {
                FollowerRole::Shaman
            } else {
                FollowerRole::Worker
            };
            let position = random_surface_point(&mut world.rng, radius);
            world.spawn_follower(position, role);
        }

        world.refresh_counters();
        tracing::info!(
            "World created: {} trees, {} followers, {} wood",
            world.entities.trees.len(),
            world.entities.followers.len(),
            world.ledger.wood
        );
        Ok(world)
    }

    /// Create a world with no entities, only the starting stockpile
    pub fn empty(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let ledger = Ledger::new(config.world.initial_wood);

        let mut world = Self {
            config,
            entities: EntityRegistry::new(),
            ledger,
            current_tick: 0,
            elapsed: 0.0,
            spawn_timer: 0.0,
            growth_timer: 0.0,
            tower_fire_timers: AHashMap::new(),
            selected_follower: None,
            placement: None,
            rng,
        };
        world.refresh_counters();
        Ok(world)
    }

    pub fn radius(&self) -> f32 {
        self.config.world.planet_radius
    }

    pub fn base_position(&self) -> Point {
        self.config.base_position()
    }

    /// Advance the simulation by one step of `dt` seconds
    pub fn advance(&mut self, dt: f32) -> Vec<SimulationEvent> {
        run_simulation_tick(self, dt)
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    pub fn spawn_tree(&mut self, position: Point) -> TreeId {
        let position = project_to_surface(position, self.radius());
        let health = self.config.world.tree_health;
        self.entities
            .trees
            .spawn_with(|id| Tree::new(id, position, health))
    }

    pub fn spawn_follower(&mut self, position: Point, role: FollowerRole) -> FollowerId {
        let position = project_to_surface(position, self.radius());
        self.entities
            .followers
            .spawn_with(|id| Follower::new(id, position, role))
    }

    /// Create a construction site without charging for it
    pub fn spawn_building(&mut self, building_type: BuildingType, position: Point) -> BuildingId {
        let position = project_to_surface(position, self.radius());
        self.entities
            .buildings
            .spawn_with(|id| Building::new(id, building_type, position))
    }

    /// Create a raider heading for the base
    pub fn spawn_enemy(&mut self, position: Point) -> EnemyId {
        let position = project_to_surface(position, self.radius());
        let health = self.config.combat.enemy_health;
        let base = self.base_position();
        self.entities
            .enemies
            .spawn_with(|id| Enemy::new(id, position, health, base))
    }

    pub fn completed_count(&self, building_type: BuildingType) -> usize {
        count_complete(&self.entities.buildings, building_type)
    }

    /// Recompute the derived population counters
    pub fn refresh_counters(&mut self) {
        let huts = self.completed_count(BuildingType::Hut);
        let population = self.entities.followers.len();
        self.ledger
            .publish(population, huts, &self.config.population);
    }

    /// Read-only copy of everything the display layer needs
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.current_tick,
            elapsed: self.elapsed,
            wood: self.ledger.wood,
            population: self.ledger.population,
            max_population_cap: self.ledger.max_population_cap,
            selected_follower: self.selected_follower,
            placement: self.placement,
            trees: CollectionView::from(&self.entities.trees),
            buildings: CollectionView::from(&self.entities.buildings),
            followers: CollectionView::from(&self.entities.followers),
            enemies: CollectionView::from(&self.entities.enemies),
            projectiles: CollectionView::from(&self.entities.projectiles),
        }
    }
}

/// Immutable per-tick view for rendering and HUD
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub elapsed: f32,
    pub wood: f32,
    pub population: u32,
    pub max_population_cap: u32,
    pub selected_follower: Option<FollowerId>,
    pub placement: Option<BuildingType>,
    pub trees: CollectionView<Tree>,
    pub buildings: CollectionView<Building>,
    pub followers: CollectionView<Follower>,
    pub enemies: CollectionView<Enemy>,
    pub projectiles: CollectionView<Projectile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::sphere::is_on_surface;

    #[test]
    fn test_new_world_population() {
        let world = World::new(SimulationConfig::default()).unwrap();

        assert_eq!(world.entities.trees.len(), 40);
        assert_eq!(world.entities.followers.len(), 5);
        assert_eq!(world.ledger.wood, 800.0);
        assert_eq!(world.ledger.population, 5);
        assert_eq!(world.ledger.max_population_cap, 5);

        let roles: Vec<FollowerRole> = world.entities.followers.iter().map(|f| f.role).collect();
        assert_eq!(roles[0], FollowerRole::Shaman);
        assert!(roles[1..].iter().all(|r| *r == FollowerRole::Worker));
    }

    #[test]
    fn test_new_world_entities_on_surface() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let r = world.radius();
        assert!(world.entities.trees.iter().all(|t| is_on_surface(t.position, r)));
        assert!(world.entities.followers.iter().all(|f| is_on_surface(f.position, r)));
        assert!(world.entities.trees.iter().all(|t| t.health == 100.0 && t.max_health == 100.0));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = World::new(SimulationConfig::default()).unwrap();
        let b = World::new(SimulationConfig::default()).unwrap();
        let pa: Vec<Point> = a.entities.trees.iter().map(|t| t.position).collect();
        let pb: Vec<Point> = b.entities.trees.iter().map(|t| t.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.world.planet_radius = -1.0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_spawn_helpers_project_to_surface() {
        let mut world = World::empty(SimulationConfig::default()).unwrap();
        let id = world.spawn_building(BuildingType::Hut, Point::new(0.0, 5.0, 0.0));
        let hut = world.entities.buildings.get(id).unwrap();
        assert!((hut.position - Point::new(0.0, 20.0, 0.0)).length() < 1e-4);
        assert_eq!(hut.progress, 0.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let snapshot = world.snapshot();
        assert_eq!(snapshot.trees.0.len(), 40);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["population"], 5);
        assert_eq!(json["followers"][0]["role"], "SHAMAN");
    }
}
