//! Core shared types: math re-exports, errors, the mesh-builder capability.

pub use glam::{Vec2, Vec3, Vec4, vec2, vec3, vec4};

pub mod error;
pub mod mesh;

pub use error::{CoreError, CoreResult};
pub use mesh::{MeshBuilder, MeshVertex};
