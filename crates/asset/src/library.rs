//! Path-keyed cache of loaded meshes with shared ownership.
//!
//! Renderer components hold [`MeshHandle`]s; the library keeps one entry per
//! file so a mesh used by many entities is parsed once.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    error::ObjError,
    mesh::{CpuMeshBuilder, MeshData},
    obj::{ObjOptions, load_obj_path_with},
};

/// Shared handle to a loaded mesh.
pub type MeshHandle = Arc<MeshData>;

#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: HashMap<PathBuf, MeshHandle>,
    options: ObjOptions,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ObjOptions) -> Self {
        Self {
            meshes: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> &ObjOptions {
        &self.options
    }

    /// Return the cached mesh for `path`, loading it on first use.
    ///
    /// Failed loads are not cached; the next call retries.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<MeshHandle, ObjError> {
        let key = cache_key(path.as_ref());
        if let Some(handle) = self.meshes.get(&key) {
            log::debug!("Mesh cache hit: {}", key.display());
            return Ok(Arc::clone(handle));
        }

        let mesh = load_obj_path_with(&key, CpuMeshBuilder::new(), &self.options)?;
        log::info!(
            "Loaded mesh {} ({} vertices, {} indices)",
            key.display(),
            mesh.vertices.len(),
            mesh.indices.len()
        );
        let handle = Arc::new(mesh);
        self.meshes.insert(key, Arc::clone(&handle));
        Ok(handle)
    }

    /// Cached mesh for `path`, without loading.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<MeshHandle> {
        self.meshes.get(&cache_key(path.as_ref())).cloned()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.meshes.contains_key(&cache_key(path.as_ref()))
    }

    /// Drop the library's reference. Outstanding handles stay valid.
    pub fn evict(&mut self, path: impl AsRef<Path>) -> Option<MeshHandle> {
        self.meshes.remove(&cache_key(path.as_ref()))
    }

    /// Drop every mesh no one outside the library refers to.
    /// Returns the number of entries removed.
    pub fn purge_unused(&mut self) -> usize {
        let before = self.meshes.len();
        self.meshes.retain(|_, handle| Arc::strong_count(handle) > 1);
        let removed = before - self.meshes.len();
        if removed > 0 {
            log::debug!("Purged {removed} unused meshes");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }
}

/// Canonical path when the file exists, so `a/../a/x.obj` and `a/x.obj`
/// share one entry. Missing files keep their path and fail in the loader.
fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
