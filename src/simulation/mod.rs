pub mod combat;
pub mod follower_ai;
pub mod population;
pub mod tick;

pub use tick::{run_simulation_tick, SimulationEvent};
