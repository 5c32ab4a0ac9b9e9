//! Entry point that picks the reader for a file.
//!
//! ```no_run
//! use rs_mesh_loaders::loader::{load_mesh, LoadOptions, load_mesh_with};
//!
//! // Format taken from the extension
//! let hull = load_mesh("data/hull.gdf", None, None).expect("Cannot load hull");
//! println!("{} faces", hull.stored().nb_faces());
//!
//! // Explicit format keyword, name and index checking
//! let options = LoadOptions::new().format("wamit").name("barge").check_indices(true);
//! let barge = load_mesh_with("data/barge.txt", &options).expect("Cannot load barge");
//! ```

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::format::Format;
use crate::mesh::LoadedMesh;
use crate::mesh_error::{MeshLoadError, Result};

/// How a mesh file is read. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Format keyword, overriding the file extension.
    pub format: Option<String>,
    /// Name given to the returned mesh.
    pub name: Option<String>,
    /// Fail with `IndexOutOfRange` if a face refers to a missing vertex.
    /// Off by default: face indices are passed through as found in the file.
    pub check_indices: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn check_indices(mut self, check: bool) -> Self {
        self.check_indices = check;
        self
    }
}

/// Loads a mesh file of any registered format.
///
/// # Parameters
/// - `path`: the mesh file, must exist.
/// - `format`: format keyword. If `None`, the extension of `path` without the leading dot.
/// - `name`: optional name for the created mesh.
///
/// # Errors
/// `FileNotFound` if there is no such file, `UnsupportedFormat` for unknown keywords,
/// otherwise whatever the reader of the format reports.
pub fn load_mesh<P: AsRef<Path>>(
    path: P,
    format: Option<&str>,
    name: Option<&str>,
) -> Result<LoadedMesh> {
    let mut options = LoadOptions::new();
    options.format = format.map(str::to_string);
    options.name = name.map(str::to_string);
    load_mesh_with(path, &options)
}

/// Same as [`load_mesh`] with all options in one value.
pub fn load_mesh_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<LoadedMesh> {
    let path = path.as_ref();
    check_file(path)?;

    let format = match &options.format {
        Some(keyword) => keyword.parse::<Format>()?,
        None => Format::from_path(path)?,
    };
    debug!("Reading {} as {}", path.display(), format);

    let mesh = format.decode(path, options.name.as_deref())?;
    if options.check_indices {
        mesh.stored().check_indices()?;
    }

    info!(
        "Loaded {}: {} vertices, {} faces{}",
        path.display(),
        mesh.stored().nb_vertices(),
        mesh.stored().nb_faces(),
        if mesh.is_symmetric() { " (half of symmetric mesh)" } else { "" }
    );
    Ok(mesh)
}

/// Fails with `FileNotFound` unless the path is an existing regular file.
pub(crate) fn check_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(MeshLoadError::FileNotFound(path.to_path_buf()))
    }
}

/// Reads the whole file as text, mapping a missing file to `FileNotFound`.
pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MeshLoadError::FileNotFound(path.to_path_buf()),
        _ => MeshLoadError::Io(e),
    })
}
