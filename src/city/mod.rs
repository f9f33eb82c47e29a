//! City layer - stockpile, construction sites, placement, and tower garrisons

pub mod construction;
pub mod garrison;
pub mod ledger;
pub mod placement;

pub use construction::{
    apply_construction_work, count_complete, first_complete, fold_build_contributions,
    ContributionResult,
};
pub use garrison::GarrisonRejection;
pub use ledger::{max_population_cap, Ledger};
pub use placement::{cancel_placement, confirm_placement, enter_placement};
