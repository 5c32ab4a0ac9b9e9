//! Nemoh native mesh files (`.mar`, `.dat`).
//!
//! ```text
//! 2 1                  <- anything, symmetry flag
//! 1  0.0  0.0  -1.0    <- id x y z
//! ...
//! 0  0.0  0.0   0.0    <- end of vertices
//! 1 2 3 4              <- one-based ids
//! ...
//! 0 0 0 0              <- end of faces
//! ```
//! If the symmetry flag is 1, the file holds only the half of the body with y >= 0 and
//! the loader returns it wrapped with the xOz symmetry plane.

use std::path::Path;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh, Plane, ReflectionSymmetricMesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{LineCursor, face_from_one_based, parse_ids, parse_point, parse_usize};

const FORMAT: &str = "Nemoh";

/// Parses the file. Returns the stored mesh and whether it is the half of an xOz
/// symmetric body.
pub fn parse_mar(text: &str) -> Result<(Mesh, bool)> {
    let mut cursor = LineCursor::new(text, FORMAT);

    let (line, header) = cursor.next_tokens("header")?;
    if header.len() < 2 {
        return Err(MeshLoadError::malformed(
            FORMAT,
            format!("line {}: header must hold two values", line),
        ));
    }
    let symmetric = parse_usize(header[1], line)? == 1;

    let mut vertices = Vec::new();
    loop {
        let (line, tokens) = cursor.next_tokens("vertices")?;
        if tokens[0] == "0" {
            break;
        }
        vertices.push(parse_point(&tokens[1..], line, FORMAT)?);
    }

    let mut faces = Vec::new();
    loop {
        let (line, tokens) = cursor.next_tokens("faces")?;
        if tokens[0] == "0" {
            break;
        }
        let ids = parse_ids(&tokens, line)?;
        faces.push(face_from_one_based(&ids, line, FORMAT)?);
    }

    Ok((Mesh::new(vertices, faces, None), symmetric))
}

pub fn load_mar<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let (mut mesh, symmetric) = parse_mar(&read_text(path.as_ref())?)?;
    let name = name.map(str::to_string);
    if symmetric {
        Ok(LoadedMesh::Symmetric(ReflectionSymmetricMesh::wrap_symmetric(
            mesh,
            Plane::xoz(),
            name,
        )))
    } else {
        mesh.name = name;
        Ok(mesh.into())
    }
}
