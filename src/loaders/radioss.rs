//! RADIOSS mesh files, as exported by ICEM.
//!
//! Nodes are lines `id x y z`, in fixed width columns where negative values may touch the
//! previous field. Shell elements are lines of seven integers,
//! `id part ... n1 n2 n3 n4`, and the four last columns are the one-based connectivity.
//! Only the first node section and the first element section (at least three element
//! lines long) are read. Blank lines inside a section are ignored.

use std::path::Path;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{
    face_from_one_based, is_integer_line, is_packed_node_line, line_runs, packed_node_fields,
    parse_ids, parse_point,
};

const FORMAT: &str = "RADIOSS";

/// Integer columns before the connectivity on an element line.
const ELEMENT_PREFIX: usize = 3;
const MIN_ELEMENT_SECTION: usize = 3;

fn is_element_line(line: &str) -> bool {
    is_integer_line(line, ELEMENT_PREFIX + 4, ELEMENT_PREFIX + 4)
}

pub fn parse_rad(text: &str) -> Result<Mesh> {
    let lines: Vec<&str> = text.lines().collect();

    let nodes = line_runs(&lines, is_packed_node_line)
        .into_iter()
        .next()
        .ok_or_else(|| MeshLoadError::malformed(FORMAT, "no node section found"))?;
    let elements = line_runs(&lines, is_element_line)
        .into_iter()
        .find(|run| run.len() >= MIN_ELEMENT_SECTION)
        .ok_or_else(|| MeshLoadError::malformed(FORMAT, "no element section found"))?;

    let mut vertices = Vec::with_capacity(nodes.len());
    for idx in nodes {
        let (_, coords) = packed_node_fields(lines[idx]).ok_or_else(|| {
            MeshLoadError::malformed(FORMAT, format!("line {}: not a node line", idx + 1))
        })?;
        vertices.push(parse_point(&coords, idx + 1, FORMAT)?);
    }

    let mut faces = Vec::with_capacity(elements.len());
    for idx in elements {
        let tokens: Vec<&str> = lines[idx].split_whitespace().collect();
        let ids = parse_ids(&tokens[ELEMENT_PREFIX..], idx + 1)?;
        faces.push(face_from_one_based(&ids, idx + 1, FORMAT)?);
    }

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_rad<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_rad(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
