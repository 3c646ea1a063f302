//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SISY_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use sisyphus_physics::PhysicsConfig;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Player configuration
    #[serde(default)]
    pub player: PlayerConfig,
    /// Physics tunables (per-tick constants)
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Scene layout
    #[serde(default)]
    pub scene: SceneConfig,
    /// Fixed tick loop configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SISY_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SISY_PHYSICS__GRAVITY=-0.04 -> physics.gravity = -0.04
        figment = figment.merge(Env::prefixed("SISY_").split("__"));

        let mut config: Self = figment.extract().map_err(ConfigError::from)?;
        config.physics = config.physics.validate();
        Ok(config)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sisyphus".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of look rotation per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable input smoothing by default
    pub smoothing_enabled: bool,
    /// Forward impulse given to the boulder by the push key
    pub boulder_push: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            pitch_limit: 60.0,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
            boulder_push: 5.0,
        }
    }
}

/// Player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Distance moved per tick
    pub move_speed: f32,
    /// Half-width of the square play area
    pub play_area: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 1.6, 0.0],
            move_speed: 0.15,
            play_area: 45.0,
        }
    }
}

/// Scene layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of boxes in the row
    pub box_count: u32,
    /// Distance between neighbouring box centers along X
    pub box_spacing: f32,
    /// Center of the first box [x, y, z]
    pub box_offset: [f32; 3],
    /// Half of a box's edge length
    pub box_half_extent: f32,
    /// Spawn the boulder
    pub boulder: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            box_count: 5,
            box_spacing: 3.0,
            box_offset: [-1.5, 0.5, 0.0],
            box_half_extent: 0.5,
            boulder: true,
        }
    }
}

/// Fixed tick loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Logical ticks per second
    pub tick_rate: f32,
    /// Backlog beyond this many ticks per frame is dropped
    pub max_ticks_per_frame: u32,
    /// Longest frame time fed to the accumulator, in seconds
    pub max_frame_time: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks_per_frame: 8,
            max_frame_time: 0.25,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show position and view angles in the window title
    pub show_overlay: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Ticks between debug-level state logs (0 disables)
    pub state_log_interval: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            log_level: "info".to_string(),
            state_log_interval: 300,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.physics.gravity, -0.02);
        assert_eq!(config.player.move_speed, 0.15);
        assert_eq!(config.scene.box_count, 5);
        assert_eq!(config.simulation.tick_rate, 60.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("gravity"));
        assert!(toml.contains("max_collision_iterations"));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [physics]
            push_force = 0.5

            [scene]
            box_count = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.physics.push_force, 0.5);
        assert_eq!(config.physics.gravity, -0.02);
        assert_eq!(config.scene.box_count, 2);
        assert_eq!(config.scene.box_spacing, 3.0);
        assert_eq!(config.window.title, "Sisyphus");
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.player.start_position, [0.0, 1.6, 0.0]);
    }
}
