//! Simulation configuration with documented constants
//!
//! Every tuning value the engine reads lives here so tests and tools can build
//! worlds with their own numbers. Defaults reproduce the shipped game feel.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Point;
use crate::entity::building::BuildingType;

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the world RNG (tree scatter, spawns, patrol points)
    pub seed: u64,
    pub world: WorldTuning,
    pub economy: EconomyTuning,
    pub movement: MovementTuning,
    pub combat: CombatTuning,
    pub population: PopulationTuning,
    pub costs: BuildingCosts,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            world: WorldTuning::default(),
            economy: EconomyTuning::default(),
            movement: MovementTuning::default(),
            combat: CombatTuning::default(),
            population: PopulationTuning::default(),
            costs: BuildingCosts::default(),
        }
    }
}

/// Planet and initial population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    /// Radius of the planet sphere (world units)
    pub planet_radius: f32,
    /// Trees scattered at world creation
    pub tree_count: usize,
    /// Followers present at world creation; the first one is the shaman
    pub initial_followers: usize,
    /// Health of a freshly grown tree
    pub tree_health: f32,
    /// Wood in the stockpile at world creation
    pub initial_wood: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            planet_radius: 20.0,
            tree_count: 40,
            initial_followers: 5,
            tree_health: 100.0,
            initial_wood: 800.0,
        }
    }
}

/// Gathering and construction rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyTuning {
    /// Tree health removed (and wood picked up) per chop tick
    pub chop_strength: f32,
    /// Progress points added per build tick
    pub build_strength: f32,
    /// Wood a follower carries before heading home
    pub wood_capacity: f32,
}

impl Default for EconomyTuning {
    fn default() -> Self {
        Self {
            chop_strength: 0.5,
            build_strength: 0.2,
            wood_capacity: 20.0,
        }
    }
}

/// Follower movement
///
/// Step length per tick is `agent_speed * dt * factor`, with the factor
/// depending on what the follower is doing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub agent_speed: f32,
    /// Distance within which a follower chops, builds or delivers
    pub interaction_range: f32,
    /// Distance within which a worker gets trained at a training hut
    pub training_range: f32,
    /// Guards stop approaching their tower inside this distance
    pub guard_hold_distance: f32,
    /// Commanded moves and patrol legs end inside this distance
    pub arrival_threshold: f32,
    /// Wanderers further than this from the base walk home first
    pub home_radius: f32,
    /// Radius of the patrol area around the base
    pub patrol_radius: f32,
    pub home_speed_factor: f32,
    pub patrol_speed_factor: f32,
    /// Commanded movement and approach to work targets
    pub work_speed_factor: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            agent_speed: 0.15,
            interaction_range: 1.5,
            training_range: 1.5,
            guard_hold_distance: 0.1,
            arrival_threshold: 0.5,
            home_radius: 6.0,
            patrol_radius: 4.0,
            home_speed_factor: 10.0,
            patrol_speed_factor: 3.0,
            work_speed_factor: 15.0,
        }
    }
}

/// Towers, projectiles and raiders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Guards a single tower can hold
    pub tower_capacity: usize,
    /// Enemies closer than this to a tower can be targeted
    pub tower_range: f32,
    /// Seconds between shots of a manned tower
    pub fire_interval: f32,
    /// Arrow travel per tick
    pub projectile_speed: f32,
    /// Arrow hits when this close to its target
    pub projectile_hit_radius: f32,
    pub projectile_damage: f32,
    /// Height above the tower base where arrows are released
    pub tower_launch_height: f32,
    /// Seconds between raider spawns
    pub enemy_spawn_interval: f32,
    pub enemy_health: f32,
    pub enemy_speed_factor: f32,
    /// Raiders this close to the base vanish
    pub base_absorb_distance: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            tower_capacity: 2,
            tower_range: 15.0,
            fire_interval: 1.0,
            projectile_speed: 0.8,
            projectile_hit_radius: 1.0,
            projectile_damage: 50.0,
            tower_launch_height: 7.0,
            enemy_spawn_interval: 15.0,
            enemy_health: 100.0,
            enemy_speed_factor: 6.0,
            base_absorb_distance: 1.0,
        }
    }
}

/// Population growth and housing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationTuning {
    /// Newborns per second contributed by each completed hut
    pub growth_rate: f32,
    /// Population cap with no huts
    pub base_capacity: u32,
    /// Extra population cap per completed hut
    pub capacity_per_hut: u32,
}

impl Default for PopulationTuning {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            base_capacity: 5,
            capacity_per_hut: 3,
        }
    }
}

/// Wood cost of each building type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingCosts {
    pub hut: f32,
    pub warrior_hut: f32,
    pub tower: f32,
    pub temple: f32,
}

impl Default for BuildingCosts {
    fn default() -> Self {
        Self {
            hut: 200.0,
            warrior_hut: 400.0,
            tower: 300.0,
            temple: 1000.0,
        }
    }
}

impl BuildingCosts {
    pub fn cost(&self, building_type: BuildingType) -> f32 {
        match building_type {
            BuildingType::Hut => self.hut,
            BuildingType::WarriorHut => self.warrior_hut,
            BuildingType::Tower => self.tower,
            BuildingType::Temple => self.temple,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Home base sits on the north pole
    pub fn base_position(&self) -> Point {
        Point::new(0.0, self.world.planet_radius, 0.0)
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.world.planet_radius > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "planet_radius must be positive, got {}",
                self.world.planet_radius
            )));
        }

        let intervals = [
            ("fire_interval", self.combat.fire_interval),
            ("enemy_spawn_interval", self.combat.enemy_spawn_interval),
            ("agent_speed", self.movement.agent_speed),
            ("projectile_speed", self.combat.projectile_speed),
        ];
        for (name, value) in intervals {
            if !(value > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if self.combat.tower_capacity == 0 {
            return Err(SimError::InvalidConfig(
                "tower_capacity must be at least 1".into(),
            ));
        }

        let rates = [
            ("chop_strength", self.economy.chop_strength),
            ("build_strength", self.economy.build_strength),
            ("growth_rate", self.population.growth_rate),
            ("projectile_damage", self.combat.projectile_damage),
        ];
        for (name, value) in rates {
            if value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        for building_type in BuildingType::ALL {
            if self.costs.cost(building_type) < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "cost of {} must not be negative",
                    building_type.label()
                )));
            }
        }

        Ok(())
    }
}
