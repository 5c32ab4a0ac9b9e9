//! Input files of the `Mesh` tool shipped with Nemoh. This is not the format the Nemoh
//! solver itself reads (see the `nemoh` module for that one).

use std::path::Path;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh};
use crate::mesh_error::Result;
use crate::utils::text::LineCursor;

const FORMAT: &str = "Nemoh mesh tool";

pub fn parse_nem(text: &str) -> Result<Mesh> {
    let mut cursor = LineCursor::new(text, FORMAT);
    let nb_vertices = cursor.next_count("vertex count")?;
    let nb_faces = cursor.next_count("face count")?;

    let vertices = (0..nb_vertices)
        .map(|_| cursor.next_point("vertices"))
        .collect::<Result<Vec<_>>>()?;
    let faces = (0..nb_faces)
        .map(|_| cursor.next_face("faces"))
        .collect::<Result<Vec<_>>>()?;

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_nem<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_nem(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
