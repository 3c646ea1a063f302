//! Sisyphus - first-person box pushing
//!
//! Application layer over the physics core: layered configuration, scene
//! construction and the per-frame systems.

pub mod config;
pub mod scene;
pub mod systems;
