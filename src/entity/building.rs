//! Buildings placed by the player and raised by followers

use serde::{Deserialize, Serialize};

use crate::core::types::{BuildingId, FollowerId, Point};

/// Progress value at which construction is finished
pub const MAX_PROGRESS: f32 = 100.0;

/// Type of building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingType {
    /// Raises the population cap
    Hut,
    /// Turns workers into warriors
    WarriorHut,
    /// Garrisoned by warriors, shoots at raiders
    Tower,
    /// No mechanical effect yet
    Temple,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::Hut,
        BuildingType::WarriorHut,
        BuildingType::Tower,
        BuildingType::Temple,
    ];

    /// Display name for menus
    pub fn label(&self) -> &'static str {
        match self {
            BuildingType::Hut => "Hut",
            BuildingType::WarriorHut => "Training Hut",
            BuildingType::Tower => "Guard Tower",
            BuildingType::Temple => "Temple",
        }
    }

    /// One-line description for menus
    pub fn description(&self) -> &'static str {
        match self {
            BuildingType::Hut => "Increases population cap.",
            BuildingType::WarriorHut => "Trains followers into warriors.",
            BuildingType::Tower => "Defensive structure manned by warriors.",
            BuildingType::Temple => "Unlock powerful Shaman spells.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub position: Point,
    pub building_type: BuildingType,
    /// Construction progress, 0 to [`MAX_PROGRESS`]
    pub progress: f32,
    pub is_complete: bool,
    /// Garrison roster (towers only)
    pub assigned_workers: Vec<FollowerId>,
}

impl Building {
    /// New construction site
    pub fn new(id: BuildingId, building_type: BuildingType, position: Point) -> Self {
        Self {
            id,
            position,
            building_type,
            progress: 0.0,
            is_complete: false,
            assigned_workers: Vec::new(),
        }
    }

    /// Add construction progress. Returns true if this call finished the building.
    pub fn add_progress(&mut self, amount: f32) -> bool {
        if self.is_complete {
            return false;
        }
        self.progress = (self.progress + amount).min(MAX_PROGRESS);
        self.is_complete = self.progress >= MAX_PROGRESS;
        self.is_complete
    }

    pub fn is_complete_of(&self, building_type: BuildingType) -> bool {
        self.is_complete && self.building_type == building_type
    }
}
