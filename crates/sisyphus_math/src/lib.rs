//! 3D Mathematics Library
//!
//! This crate provides the vector type shared by the Sisyphus physics core,
//! its input collaborator, and the application.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components (Y up)

mod vec3;

pub use vec3::Vec3;
