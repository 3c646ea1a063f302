//! Window management system
//!
//! Owns the winit window, the pointer grab used for free look, and the status
//! line in the title bar.

use std::fmt;
use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::{ExternalError, OsError},
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window, WindowAttributes},
};
use sisyphus_math::Vec3;
use sisyphus_physics::PhysicsWorld;
use crate::config::WindowConfig;

/// What the title bar reports about the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldStatus {
    pub player_position: Vec3,
    /// Player yaw in degrees
    pub yaw: f32,
    /// Player pitch in degrees
    pub pitch: f32,
    /// Distance the boulder still has to climb, and how often it rolled back
    pub boulder: Option<(f32, u64)>,
}

impl WorldStatus {
    /// Read the status off a world
    pub fn of(world: &PhysicsWorld) -> Self {
        let player = world.player();
        Self {
            player_position: player.position,
            yaw: player.yaw.to_degrees(),
            pitch: player.pitch.to_degrees(),
            boulder: world
                .boulder()
                .map(|boulder| ((-boulder.body().position.z).max(0.0), boulder.resets())),
        }
    }
}

impl fmt::Display for WorldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.player_position;
        write!(
            f,
            "({:.1}, {:.1}, {:.1}) Yaw:{:.1}° Pitch:{:.1}°",
            p.x, p.y, p.z, self.yaw, self.pitch
        )?;
        if let Some((to_go, resets)) = self.boulder {
            write!(f, " | boulder {:.1} to go, {} resets", to_go, resets)?;
        }
        Ok(())
    }
}

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Self, WindowError> {
        let window = event_loop
            .create_window(attributes(config))
            .map_err(WindowError::Create)?;

        log::info!("Opened {}x{} window", config.width, config.height);
        Ok(Self {
            window: Arc::new(window),
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Grab or free the pointer
    ///
    /// Grabbing prefers a locked pointer and falls back to confining it.
    pub fn set_cursor_captured(&mut self, captured: bool) -> Result<(), WindowError> {
        if captured {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
                .map_err(WindowError::CursorGrab)?;
        } else {
            self.window
                .set_cursor_grab(CursorGrabMode::None)
                .map_err(WindowError::CursorGrab)?;
        }
        self.window.set_cursor_visible(!captured);
        self.cursor_captured = captured;
        Ok(())
    }

    /// Toggle borderless fullscreen
    pub fn toggle_fullscreen(&self) {
        let fullscreen = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        self.window.set_fullscreen(fullscreen);
    }

    /// Show the world status in the title bar
    pub fn show_status(&self, status: &WorldStatus) {
        self.window
            .set_title(&format_title(&self.base_title, status, self.cursor_captured));
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn attributes(config: &WindowConfig) -> WindowAttributes {
    let fullscreen = config.fullscreen.then_some(Fullscreen::Borderless(None));
    Window::default_attributes()
        .with_title(&config.title)
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_fullscreen(fullscreen)
}

/// Title bar text: base title, world status and the pointer hint
pub fn format_title(base: &str, status: &WorldStatus, cursor_captured: bool) -> String {
    let hint = if cursor_captured {
        "Esc to release"
    } else {
        "Click to capture"
    };
    format!("{} - {} [{}]", base, status, hint)
}

#[derive(Debug)]
pub enum WindowError {
    Create(OsError),
    CursorGrab(ExternalError),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Create(e) => write!(f, "Window creation failed: {}", e),
            WindowError::CursorGrab(e) => write!(f, "Cursor grab failed: {}", e),
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::Create(e) => Some(e),
            WindowError::CursorGrab(e) => Some(e),
        }
    }
}
