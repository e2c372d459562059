//! linalg-core - vectors and matrices for a real-time 3D pipeline
//!
//! Hand-unrolled `f32` value types: [`Vector3`], [`Matrix3`] and [`Matrix4`],
//! with the projection, view, rotation and normal-matrix builders a renderer
//! needs once per frame. Matrices follow the OpenGL column-vector convention
//! and export column-major through [`Matrix4::copy`].
//!
//! Degenerate inputs (zero-length vectors, singular matrices, parallel basis
//! vectors) are not checked; they propagate as Inf/NaN and can be detected
//! with the `is_finite` methods.

pub mod error;
pub mod interop;
pub mod matrix3;
pub mod matrix4;
pub mod projection;
pub mod vector3;

// Re-export commonly used types
pub use error::{LinalgError, LinalgResult};
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use projection::Frustum;
pub use vector3::Vector3;

/// π as `f32`.
pub const PI32: f32 = std::f32::consts::PI;
