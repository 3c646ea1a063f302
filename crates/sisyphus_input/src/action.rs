//! Game actions triggered by single key presses
//!
//! Held movement keys become [`MoveControls`](sisyphus_physics::MoveControls);
//! everything that fires once per press becomes a [`GameAction`].

use winit::keyboard::KeyCode;

/// One-shot actions the application reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Grab the pointer for free look
    CaptureCursor,
    /// Give the pointer back
    ReleaseCursor,
    /// Close the game
    Exit,
    /// Put the player back at the start
    ResetPlayer,
    ToggleFullscreen,
    /// Switch look smoothing on or off
    ToggleSmoothing,
    /// Shove the boulder uphill
    PushBoulder,
}

impl GameAction {
    /// Action bound to a pressed key
    ///
    /// Escape gives the pointer back first and only exits once it is free.
    pub fn for_key(key: KeyCode, cursor_captured: bool) -> Option<Self> {
        let action = match key {
            KeyCode::Escape if cursor_captured => Self::ReleaseCursor,
            KeyCode::Escape => Self::Exit,
            KeyCode::KeyR => Self::ResetPlayer,
            KeyCode::KeyF => Self::ToggleFullscreen,
            KeyCode::KeyG => Self::ToggleSmoothing,
            KeyCode::KeyB => Self::PushBoulder,
            _ => return None,
        };
        Some(action)
    }
}
