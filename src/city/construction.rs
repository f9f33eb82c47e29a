//! Construction system - folds builder contributions onto building sites

use ahash::AHashMap;

use crate::core::types::BuildingId;
use crate::entity::{Building, BuildingType};
use crate::world::Registry;

/// Result of applying work to one building
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContributionResult {
    /// Work contributed, building still under construction
    InProgress { contributed: f32 },
    /// Work contributed, building is now complete
    Completed { contributed: f32 },
    /// Building is already complete
    AlreadyComplete,
    /// Building not found
    NotFound,
}

/// Apply construction work to a single building
pub fn apply_construction_work(
    buildings: &mut Registry<Building>,
    building_id: BuildingId,
    work_amount: f32,
) -> ContributionResult {
    let Some(building) = buildings.get_mut(building_id) else {
        return ContributionResult::NotFound;
    };

    if building.is_complete {
        return ContributionResult::AlreadyComplete;
    }

    let before = building.progress;
    let completed = building.add_progress(work_amount);
    let contributed = building.progress - before;

    if completed {
        ContributionResult::Completed { contributed }
    } else {
        ContributionResult::InProgress { contributed }
    }
}

/// Fold every builder's contribution for this tick onto the buildings.
///
/// Contributions to the same site are summed before being applied, so
/// simultaneous builders stack. Returns the buildings completed by this fold,
/// in id order.
pub fn fold_build_contributions(
    buildings: &mut Registry<Building>,
    contributions: &[(BuildingId, f32)],
) -> Vec<BuildingId> {
    let mut totals: AHashMap<BuildingId, f32> = AHashMap::new();
    for (building_id, amount) in contributions {
        *totals.entry(*building_id).or_insert(0.0) += amount;
    }

    let mut sites: Vec<(BuildingId, f32)> = totals.into_iter().collect();
    sites.sort_by_key(|(id, _)| *id);

    let mut completed = Vec::new();
    for (building_id, total) in sites {
        if let ContributionResult::Completed { .. } =
            apply_construction_work(buildings, building_id, total)
        {
            completed.push(building_id);
        }
    }
    completed
}

/// Number of finished buildings of a type
pub fn count_complete(buildings: &Registry<Building>, building_type: BuildingType) -> usize {
    buildings
        .iter()
        .filter(|b| b.is_complete_of(building_type))
        .count()
}

/// First finished building of a type, in id order
pub fn first_complete(
    buildings: &Registry<Building>,
    building_type: BuildingType,
) -> Option<&Building> {
    buildings.iter().find(|b| b.is_complete_of(building_type))
}
