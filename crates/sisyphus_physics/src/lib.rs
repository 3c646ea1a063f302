//! Physics core for Sisyphus
//!
//! This crate provides the fixed-tick simulation behind the game, including:
//! - Dynamic boxes with gravity, ground bounce and damping
//! - Player-vs-box collision detection and greedy resolution
//! - Push impulses and yaw torque on boxes the player walks into
//! - The boulder and its reset at the top of the hill
//! - A fixed-timestep accumulator for frame-independent ticking

pub mod body;
pub mod boulder;
pub mod collision;
pub mod controls;
pub mod integrator;
pub mod player;
pub mod resolver;
pub mod shapes;
pub mod timestep;
pub mod world;

// Re-export commonly used types
pub use body::{Body, BodyKey, BodyKind};
pub use boulder::Boulder;
pub use collision::{detect_player_box, penetration_overlap, CollisionResult, Contact};
pub use controls::MoveControls;
pub use integrator::{integrate_box, integrate_boxes};
pub use player::{PlayerBody, PlayerController, DEFAULT_MOVE_SPEED, DEFAULT_PLAYER_HEIGHT, DEFAULT_PLAYER_RADIUS};
pub use resolver::{resolve_player, PushImpulse, Resolution};
pub use shapes::{Aabb, BodyShape};
pub use timestep::{FixedTimestep, DEFAULT_TICK_RATE};
pub use world::{BodySnapshot, PhysicsConfig, PhysicsWorld, TickReport};
