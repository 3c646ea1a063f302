//! Input Handling
//!
//! This crate turns keyboard and pointer input into the physics core's
//! movement controls, the player's look direction and one-shot game actions.

mod action;
mod player_input;

pub use action::GameAction;
pub use player_input::{LookControl, PlayerInput, DEFAULT_PITCH_LIMIT};
