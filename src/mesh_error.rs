//! Error handling for mesh loaders

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshLoadError`].
pub type Result<T> = std::result::Result<T, MeshLoadError>;

/// Unified error to report failures of all mesh readers. Parsing is all-or-nothing:
/// when any of these is returned, no partial mesh is produced.
#[derive(Error, Debug)]
pub enum MeshLoadError {
    /// The mesh file, or a companion file it references, does not exist.
    #[error("file {} not found", .0.display())]
    FileNotFound(PathBuf),

    /// The format keyword (explicit or taken from the extension) is not registered.
    #[error("extension \".{0}\" is not known")]
    UnsupportedFormat(String),

    /// An expected node or element region is absent, empty or structurally invalid.
    #[error("malformed {format} file: {message}")]
    MalformedSection {
        format: &'static str,
        message: String,
    },

    /// A token could not be converted to the number the grammar expects there.
    #[error("line {line}: cannot read '{token}' as {expected}")]
    NumericParse {
        line: usize,
        token: String,
        expected: &'static str,
    },

    /// Diodore node directive refers to a frame that was never declared.
    #[error("frame '{0}' is not declared")]
    MissingFrame(String),

    /// Format is registered but has no reader in this crate.
    #[error("reading {0} files is not implemented")]
    NotImplemented(String),

    /// Face refers to a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {nb_vertices} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        nb_vertices: usize,
    },

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
}

impl MeshLoadError {
    /// Shorthand for [`MeshLoadError::MalformedSection`].
    pub fn malformed<S: Into<String>>(format: &'static str, message: S) -> Self {
        MeshLoadError::MalformedSection {
            format,
            message: message.into(),
        }
    }
}
