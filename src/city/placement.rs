//! Building placement - choose a type, then a point on the planet
//!
//! Entering placement mode is the only affordability gate. Wood only grows
//! between entering and confirming, so the confirm step charges without
//! re-checking.

use crate::core::types::{BuildingId, Point};
use crate::ecs::world::World;
use crate::entity::BuildingType;

/// Start placing a building of `building_type`.
///
/// Returns false, leaving the world untouched, when the colony cannot afford
/// it. Entering again with another type replaces the pending choice.
pub fn enter_placement(world: &mut World, building_type: BuildingType) -> bool {
    let cost = world.config.costs.cost(building_type);
    if !world.ledger.can_afford(cost) {
        tracing::debug!(
            "Cannot afford {} ({} wood, have {})",
            building_type.label(),
            cost,
            world.ledger.wood
        );
        return false;
    }
    world.placement = Some(building_type);
    true
}

/// Leave placement mode without building anything
pub fn cancel_placement(world: &mut World) {
    world.placement = None;
}

/// Drop a construction site at `point` and pay for it.
///
/// Does nothing and returns `None` outside placement mode, so a repeated
/// confirm never charges twice.
pub fn confirm_placement(world: &mut World, point: Point) -> Option<BuildingId> {
    let building_type = world.placement.take()?;
    let cost = world.config.costs.cost(building_type);

    let building = world.spawn_building(building_type, point);
    world.ledger.spend(cost);

    tracing::info!(
        "Placed {} {} for {} wood ({} left)",
        building_type.label(),
        building,
        cost,
        world.ledger.wood
    );
    Some(building)
}
