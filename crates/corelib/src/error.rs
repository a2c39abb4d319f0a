//! Core shared errors (renderer-agnostic).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An index was added that does not reference any vertex of the builder.
    #[error("index {index} does not reference a vertex (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
