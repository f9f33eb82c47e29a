//! Command execution pipeline
//!
//! Player input (selection, orders, placement) arrives as [`Command`] values
//! and is applied to the world between ticks.

pub mod executor;

pub use executor::{Command, CommandExecutor, CommandRejection, ExecutionResult};
