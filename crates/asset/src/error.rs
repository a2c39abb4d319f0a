//! Errors produced while loading OBJ meshes.

use std::{io, path::PathBuf};

use corelib::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjError {
    /// The source file could not be opened. Raised before any parsing.
    #[error("failed to open OBJ file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from the source failed mid-stream.
    #[error("failed to read OBJ line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A line violates the OBJ grammar. `line` is 1-based.
    #[error("malformed OBJ line {line}: {kind}")]
    Format { line: usize, kind: FormatError },

    /// The mesh builder rejected the accumulated data.
    #[error("failed to bake mesh: {0}")]
    Bake(#[from] CoreError),
}

impl ObjError {
    /// `true` for failures of the underlying stream (open or read).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::Read { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Offending line for read/format errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Read { line, .. } | Self::Format { line, .. } => Some(*line),
            Self::Open { .. } | Self::Bake(_) => None,
        }
    }

    pub fn format_kind(&self) -> Option<&FormatError> {
        match self {
            Self::Format { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// What exactly was wrong with a malformed line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("missing {what}")]
    MissingValue { what: &'static str },

    #[error("invalid {what} '{token}'")]
    InvalidFloat { what: &'static str, token: String },

    #[error("invalid {attribute} index '{token}'")]
    InvalidIndex {
        attribute: &'static str,
        token: String,
    },

    #[error("{attribute} index 0 is invalid (OBJ indices are 1-based)")]
    ZeroIndex { attribute: &'static str },

    #[error("{attribute} index {index} out of range ({len} declared so far)")]
    IndexOutOfRange {
        attribute: &'static str,
        index: i64,
        len: usize,
    },

    #[error("malformed face reference '{token}'")]
    MalformedReference { token: String },

    #[error("face has {count} vertex references, at least 3 required")]
    TooFewVertices { count: usize },

    #[error("mesh exceeds {} vertices", u32::MAX)]
    TooManyVertices,
}
