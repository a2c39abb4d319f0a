//! Asset loading: OBJ meshes baked through a [`corelib::MeshBuilder`].

pub mod error;
pub mod library;
pub mod mesh;
pub mod obj;

pub use error::{FormatError, ObjError};
pub use library::{MeshHandle, MeshLibrary};
pub use mesh::{Aabb, CpuMeshBuilder, MeshData};
pub use obj::{ObjOptions, Triangulation};
