//! GMSH legacy ASCII mesh files (`.msh`, format 2.x).
//!
//! ```text
//! $Nodes
//! 4
//! 1 0 0 0
//! ...
//! $EndNodes
//! $Elements
//! 2
//! 1 2 2 0 1 1 2 3       <- id, type 2 (triangle), tags, 3 nodes
//! 2 3 2 0 1 1 2 3 4     <- id, type 3 (quadrangle), tags, 4 nodes
//! $EndElements
//! ```
//! The number of tags varies, so the connectivity is taken from the end of the line.
//! Elements of other types (points, lines, volumes) are skipped. Triangles come first in
//! the face table, followed by quadrangles.

use std::path::Path;

use crate::loader::read_text;
use crate::mesh::{Face, LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{face_from_one_based, parse_ids, parse_point, parse_usize};

const FORMAT: &str = "GMSH";

const TRIANGLE: usize = 2;
const QUADRANGLE: usize = 3;

/// Declared count and body lines of a `$Name ... $EndName` block, with the line number of
/// the first body line.
fn block<'a>(lines: &[&'a str], name: &str) -> Result<(usize, usize, Vec<&'a str>)> {
    let open = format!("${}", name);
    let close = format!("$End{}", name);

    let start = lines
        .iter()
        .position(|l| l.trim() == open)
        .ok_or_else(|| MeshLoadError::malformed(FORMAT, format!("{} section not found", open)))?;
    let count_line = start + 1;
    let count_token = lines
        .get(count_line)
        .and_then(|l| l.split_whitespace().next())
        .ok_or_else(|| MeshLoadError::malformed(FORMAT, format!("{} has no count", open)))?;
    let count = parse_usize(count_token, count_line + 1)?;

    let end = lines[count_line..]
        .iter()
        .position(|l| l.trim() == close)
        .map(|p| p + count_line)
        .ok_or_else(|| MeshLoadError::malformed(FORMAT, format!("{} not found", close)))?;

    Ok((count, count_line + 2, lines[count_line + 1..end].to_vec()))
}

pub fn parse_msh(text: &str) -> Result<Mesh> {
    let lines: Vec<&str> = text.lines().collect();

    let (nb_nodes, first_line, node_lines) = block(&lines, "Nodes")?;
    let mut vertices = Vec::with_capacity(nb_nodes);
    for (i, line) in node_lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        vertices.push(parse_point(&tokens[1..], first_line + i, FORMAT)?);
    }
    if vertices.len() != nb_nodes {
        return Err(MeshLoadError::malformed(
            FORMAT,
            format!("{} nodes declared but {} found", nb_nodes, vertices.len()),
        ));
    }

    let (_, first_line, element_lines) = block(&lines, "Elements")?;
    let mut triangles: Vec<Face> = Vec::new();
    let mut quadrangles: Vec<Face> = Vec::new();
    for (i, line) in element_lines.iter().enumerate() {
        let line_no = first_line + i;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }
        let nb_corners = match parse_usize(tokens[1], line_no)? {
            TRIANGLE => 3,
            QUADRANGLE => 4,
            _ => continue,
        };
        if tokens.len() < 2 + nb_corners {
            return Err(MeshLoadError::malformed(
                FORMAT,
                format!("line {}: element has fewer than {} nodes", line_no, nb_corners),
            ));
        }
        let ids = parse_ids(&tokens[tokens.len() - nb_corners..], line_no)?;
        let face = face_from_one_based(&ids, line_no, FORMAT)?;
        if nb_corners == 3 {
            triangles.push(face);
        } else {
            quadrangles.push(face);
        }
    }

    let mut faces = triangles;
    faces.append(&mut quadrangles);
    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_msh<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_msh(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
