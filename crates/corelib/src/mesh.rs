//! Interleaved vertex layout and the mesh-builder capability consumed by loaders.

use bytemuck::{Pod, Zeroable};

use crate::{CoreResult, Vec2, Vec3, Vec4};

/// One interleaved vertex: position, normal, uv, color. Values are in object space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl MeshVertex {
    /// Size in bytes of one vertex in a GPU buffer.
    pub const STRIDE: usize = std::mem::size_of::<MeshVertex>();

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            normal,
            uv,
            color,
        }
    }

    #[inline]
    pub fn from_attributes(position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) -> Self {
        Self::new(
            position.to_array(),
            normal.to_array(),
            uv.to_array(),
            color.to_array(),
        )
    }
}

/// Accumulates vertices and indices, then bakes them into a mesh the
/// renderer can consume.
///
/// Implementations must keep insertion order: the n-th call to
/// [`MeshBuilder::add_vertex`] returns `n` (0-based).
pub trait MeshBuilder {
    /// The finished, immutable mesh.
    type Mesh;

    /// Append one vertex and return its index.
    fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) -> u32;

    /// Append one index referencing a previously added vertex.
    fn add_index(&mut self, index: u32);

    /// Number of vertices added so far.
    fn vertex_count(&self) -> usize;

    /// Finalize the accumulated data.
    fn bake(self) -> CoreResult<Self::Mesh>;
}
