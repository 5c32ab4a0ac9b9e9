//! Natural mesh format.
//!
//! ```text
//! xsym    ysym
//! n    m
//! x1    y1    z1
//! ...
//! xn    yn    zn
//! i1    j1    k1    l1
//! ...
//! im    jm    km    lm
//! ```
//! `n` vertices and `m` faces, ids are one based and counterclockwise. A triangle
//! repeats its first id in the last column.

use std::path::Path;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh};
use crate::mesh_error::Result;
use crate::utils::text::{LineCursor, parse_usize};

const FORMAT: &str = "natural";

pub fn parse_nat(text: &str) -> Result<Mesh> {
    let mut cursor = LineCursor::new(text, FORMAT);
    // Symmetry flags, not used
    cursor.skip_line("the symmetry header")?;

    let (line, counts) = cursor.next_tokens("vertex and face counts")?;
    let nb_vertices = parse_usize(counts[0], line)?;
    let nb_faces = match counts.get(1) {
        Some(token) => parse_usize(token, line)?,
        None => cursor.next_count("face count")?,
    };

    let mut vertices = Vec::with_capacity(nb_vertices);
    for _ in 0..nb_vertices {
        vertices.push(cursor.next_point("vertices")?);
    }

    let mut faces = Vec::with_capacity(nb_faces);
    for _ in 0..nb_faces {
        faces.push(cursor.next_face("faces")?);
    }

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_nat<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_nat(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
