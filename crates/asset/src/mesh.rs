//! CPU-side mesh representation used by loaders.

use corelib::{CoreError, CoreResult, MeshBuilder, MeshVertex, Vec2, Vec3, Vec4};

/// Indexed triangle mesh with tightly-packed interleaved vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// Axis-aligned bounding box in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

impl MeshData {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Returns `true` if both vertex and index buffers are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }

    /// Number of triangles, assuming `indices` is a triangle list.
    /// Meshes loaded with [`Triangulation::Verbatim`](crate::Triangulation::Verbatim)
    /// are only triangle lists when every face was a triangle.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes (`u32` per index).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Bounds of all vertex positions, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Aabb { min, max })
    }
}

/// [`MeshBuilder`] that bakes into a [`MeshData`] kept in host memory.
#[derive(Debug, Default)]
pub struct CpuMeshBuilder {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl CpuMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MeshBuilder for CpuMeshBuilder {
    type Mesh = MeshData;

    fn add_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2, color: Vec4) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(MeshVertex::from_attributes(position, normal, uv, color));
        index
    }

    fn add_index(&mut self, index: u32) {
        self.indices.push(index);
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn bake(self) -> CoreResult<MeshData> {
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(CoreError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(MeshData::new(self.vertices, self.indices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::vec3;

    #[test]
    fn mesh_data_validity() {
        let data = MeshData::new(vec![MeshVertex::default()], vec![0]);
        assert!(data.is_valid());
        assert!(!MeshData::default().is_valid());
    }

    #[test]
    fn builder_returns_sequential_indices() {
        let mut b = CpuMeshBuilder::new();
        for i in 0..4 {
            let idx = b.add_vertex(Vec3::splat(i as f32), Vec3::ZERO, Vec2::ZERO, Vec4::ONE);
            assert_eq!(idx, i);
            b.add_index(idx);
        }
        let mesh = b.bake().expect("bake");
        assert_eq!(mesh.indices, vec![0, 1, 2, 3]);
        assert_eq!(mesh.vertices[2].position, [2.0; 3]);
    }

    #[test]
    fn bake_rejects_dangling_index() {
        let mut b = CpuMeshBuilder::new();
        b.add_vertex(Vec3::ZERO, Vec3::ZERO, Vec2::ZERO, Vec4::ONE);
        b.add_index(0);
        b.add_index(5);
        assert_eq!(
            b.bake(),
            Err(CoreError::IndexOutOfRange {
                index: 5,
                vertex_count: 1
            })
        );
    }

    #[test]
    fn bounds_and_byte_views() {
        let mut b = CpuMeshBuilder::new();
        for p in [vec3(-1.0, 0.0, 2.0), vec3(3.0, -2.0, 0.5), vec3(0.0, 4.0, 1.0)] {
            let idx = b.add_vertex(p, Vec3::Z, Vec2::ZERO, Vec4::ONE);
            b.add_index(idx);
        }
        let mesh = b.bake().expect("bake");
        let aabb = mesh.bounds().expect("non-empty");
        assert_eq!(aabb.min, vec3(-1.0, -2.0, 0.5));
        assert_eq!(aabb.max, vec3(3.0, 4.0, 2.0));
        assert_eq!(aabb.center(), vec3(1.0, 1.0, 1.25));
        assert_eq!(aabb.extent(), vec3(4.0, 6.0, 1.5));
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_bytes().len(), 3 * MeshVertex::STRIDE);
        assert_eq!(mesh.index_bytes().len(), 3 * 4);
        assert!(MeshData::default().bounds().is_none());
    }
}
