//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod simulation;
mod window;

pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{format_title, WindowError, WindowSystem, WorldStatus};
