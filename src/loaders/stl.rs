//! STL files, binary or ASCII, read with `stl_io`.
//!
//! STL is a soup of triangles in single precision. Vertices that coincide once rounded are
//! merged so that neighbouring triangles share them.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use nalgebra::Point3;

use crate::loader::check_file;
use crate::mesh::{Face, LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::merge::{DEFAULT_MERGE_DECIMALS, merge_duplicates, remap_faces};

pub fn load_stl<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let path = path.as_ref();
    check_file(path)?;
    let mut reader = BufReader::new(File::open(path)?);
    let stl = stl_io::read_stl(&mut reader).map_err(|e| {
        MeshLoadError::malformed("STL", format!("{}: {}", path.display(), e))
    })?;

    let vertices: Vec<Point3<f64>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let mut faces: Vec<Face> = stl
        .faces
        .iter()
        .map(|t| [t.vertices[0], t.vertices[1], t.vertices[2], t.vertices[0]])
        .collect();

    let (vertices, remap) = merge_duplicates(&vertices, DEFAULT_MERGE_DECIMALS);
    remap_faces(&mut faces, &remap);

    Ok(Mesh::new(vertices, faces, name.map(str::to_string)).into())
}
