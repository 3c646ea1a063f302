//! First-person input handling
//!
//! Controls:
//! - W/S or Up/Down: Forward/backward
//! - A/D or Left/Right: Strafe left/right
//! - Mouse drag (or any motion while the cursor is captured): look around
//! - Click: capture the cursor
//! - Escape, R, F, G, B: one-shot [`GameAction`]s

use crate::action::GameAction;
use sisyphus_math::Vec3;
use sisyphus_physics::{MoveControls, PlayerBody};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Default pitch limit (radians): ±60°
pub const DEFAULT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_3;

/// Collects key and pointer events between ticks
pub struct PlayerInput {
    // Movement state
    controls: MoveControls,

    // Mouse state
    mouse_pressed: bool,
    pending_yaw: f32,
    pending_pitch: f32,

    // Input smoothing state
    smooth_yaw: f32,
    smooth_pitch: f32,

    // Configuration
    pub mouse_sensitivity: f32,
    pub pitch_limit: f32,
    pub smoothing_half_life: f32, // Exponential smoothing half-life in seconds
    pub smoothing_enabled: bool,
}

impl Default for PlayerInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInput {
    pub fn new() -> Self {
        Self {
            controls: MoveControls::empty(),

            mouse_pressed: false,
            pending_yaw: 0.0,
            pending_pitch: 0.0,

            smooth_yaw: 0.0,
            smooth_pitch: 0.0,

            mouse_sensitivity: 0.002,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }

    /// Process keyboard input
    ///
    /// Movement keys update the held controls. Other bound keys return their
    /// action on press.
    pub fn process_keyboard(
        &mut self,
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<GameAction> {
        let pressed = state == ElementState::Pressed;

        let flag = match key {
            KeyCode::KeyW | KeyCode::ArrowUp => MoveControls::FORWARD,
            KeyCode::KeyS | KeyCode::ArrowDown => MoveControls::BACKWARD,
            KeyCode::KeyA | KeyCode::ArrowLeft => MoveControls::LEFT,
            KeyCode::KeyD | KeyCode::ArrowRight => MoveControls::RIGHT,
            _ if pressed => return GameAction::for_key(key, cursor_captured),
            _ => return None,
        };
        self.controls.set(flag, pressed);
        None
    }

    /// Process mouse button input
    ///
    /// Left press starts a drag-look and, with a free cursor, asks for capture.
    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<GameAction> {
        if button != MouseButton::Left {
            return None;
        }
        self.mouse_pressed = state == ElementState::Pressed;
        if !self.mouse_pressed {
            // Drag ended: drop motion that arrived after the release
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            return None;
        }
        (!cursor_captured).then_some(GameAction::CaptureCursor)
    }

    /// Process mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_yaw += delta_x as f32;
        self.pending_pitch += delta_y as f32;
    }

    /// Release every held control, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.controls = MoveControls::empty();
        self.mouse_pressed = false;
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
    }

    /// Movement controls currently held
    pub fn controls(&self) -> MoveControls {
        self.controls
    }

    /// Apply accumulated pointer motion to the look direction
    ///
    /// When `cursor_captured` is true, free look is enabled (no drag required).
    /// Returns the resulting view direction.
    pub fn update<L: LookControl>(&mut self, target: &mut L, dt: f32, cursor_captured: bool) -> Vec3 {
        let (yaw_input, pitch_input) = if self.smoothing_enabled && dt > 0.0 {
            let smooth_factor = 2.0f32.powf(-dt / self.smoothing_half_life);
            self.smooth_yaw = self.smooth_yaw * smooth_factor + self.pending_yaw * (1.0 - smooth_factor);
            self.smooth_pitch = self.smooth_pitch * smooth_factor + self.pending_pitch * (1.0 - smooth_factor);
            (self.smooth_yaw, self.smooth_pitch)
        } else {
            (self.pending_yaw, self.pending_pitch)
        };

        // Mouse right turns right (yaw decreases), mouse down looks down
        if cursor_captured || self.mouse_pressed {
            target.rotate_look(
                -yaw_input * self.mouse_sensitivity,
                -pitch_input * self.mouse_sensitivity,
                self.pitch_limit,
            );
        }

        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;

        target.view_direction()
    }

    /// Toggle input smoothing on/off
    pub fn toggle_smoothing(&mut self) -> bool {
        self.smoothing_enabled = !self.smoothing_enabled;
        self.smooth_yaw = 0.0;
        self.smooth_pitch = 0.0;
        self.smoothing_enabled
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set pitch limit (radians)
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = limit.abs();
        self
    }

    /// Builder: set smoothing half-life (lower = more responsive)
    pub fn with_smoothing_half_life(mut self, half_life: f32) -> Self {
        self.smoothing_half_life = half_life;
        self
    }

    /// Builder: enable or disable smoothing
    pub fn with_smoothing(mut self, enabled: bool) -> Self {
        self.smoothing_enabled = enabled;
        self
    }
}

/// Something whose view can be turned
pub trait LookControl {
    fn rotate_look(&mut self, delta_yaw: f32, delta_pitch: f32, pitch_limit: f32);
    fn yaw_pitch(&self) -> (f32, f32);

    /// Unit view direction; yaw 0 and pitch 0 look down -Z
    fn view_direction(&self) -> Vec3 {
        let (yaw, pitch) = self.yaw_pitch();
        Vec3::new(-yaw.sin() * pitch.cos(), pitch.sin(), -yaw.cos() * pitch.cos())
    }
}

impl LookControl for PlayerBody {
    fn rotate_look(&mut self, delta_yaw: f32, delta_pitch: f32, pitch_limit: f32) {
        PlayerBody::rotate_look(self, delta_yaw, delta_pitch, pitch_limit);
    }

    fn yaw_pitch(&self) -> (f32, f32) {
        (self.yaw, self.pitch)
    }
}
