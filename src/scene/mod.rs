//! Scene construction utilities
//!
//! This module provides a declarative API for building the physics world.

mod scene_builder;

pub use scene_builder::SceneBuilder;
