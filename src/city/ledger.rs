//! Colony ledger - stored wood and population counters

use serde::{Deserialize, Serialize};

use crate::core::config::PopulationTuning;

/// Population cap granted by `completed_huts` finished huts
pub fn max_population_cap(completed_huts: usize, tuning: &PopulationTuning) -> u32 {
    tuning.base_capacity + completed_huts as u32 * tuning.capacity_per_hut
}

/// Colony-wide counters
///
/// `wood` is mutated by deliveries and placements. `population` and
/// `max_population_cap` are derived from the entity collections at the end of
/// every tick and never tracked incrementally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub wood: f32,
    pub population: u32,
    pub max_population_cap: u32,
    /// Wood ever delivered to the base
    pub total_delivered: f32,
    /// Wood ever spent on placements
    pub total_spent: f32,
}

impl Ledger {
    pub fn new(initial_wood: f32) -> Self {
        Self {
            wood: initial_wood.max(0.0),
            ..Self::default()
        }
    }

    /// Add delivered wood to the stockpile
    pub fn deposit(&mut self, amount: f32) {
        self.wood += amount;
        self.total_delivered += amount;
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.wood >= cost
    }

    /// Deduct a cost. The stockpile never goes negative.
    pub fn spend(&mut self, cost: f32) {
        debug_assert!(self.can_afford(cost), "spending {cost} with {} wood", self.wood);
        let spent = cost.min(self.wood);
        self.wood -= spent;
        self.total_spent += spent;
    }

    /// Refresh the derived counters
    pub fn publish(&mut self, population: usize, completed_huts: usize, tuning: &PopulationTuning) {
        self.population = population as u32;
        self.max_population_cap = max_population_cap(completed_huts, tuning);
    }
}
