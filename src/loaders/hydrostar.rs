//! HydroSTAR mesh files (`.hst`).
//!
//! A file may hold several `COORDINATES` and `PANEL` blocks, for instance one per body.
//! All node blocks are concatenated in file order, and so are all panel blocks. Panel ids
//! refer to the global node numbering, so they are only shifted to zero based. Blank lines
//! inside a block do not split it.

use std::path::Path;

use tracing::debug;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{
    face_from_one_based, is_integer_line, is_node_line, line_runs, parse_ids, parse_point,
};

const FORMAT: &str = "HydroSTAR";

/// Panel line: three (triangle) or four (quadrangle) one-based node ids.
fn is_panel_line(line: &str) -> bool {
    is_integer_line(line, 3, 4)
}

pub fn parse_hst(text: &str) -> Result<Mesh> {
    let lines: Vec<&str> = text.lines().collect();

    let node_sections = line_runs(&lines, is_node_line);
    if node_sections.is_empty() {
        return Err(MeshLoadError::malformed(FORMAT, "no COORDINATES section found"));
    }
    let panel_sections = line_runs(&lines, is_panel_line);
    if panel_sections.is_empty() {
        return Err(MeshLoadError::malformed(FORMAT, "no PANEL section found"));
    }

    let mut vertices = Vec::new();
    for section in node_sections {
        let before = vertices.len();
        for idx in section {
            let tokens: Vec<&str> = lines[idx].split_whitespace().collect();
            vertices.push(parse_point(&tokens[1..], idx + 1, FORMAT)?);
        }
        debug!("HydroSTAR node section: {} nodes after {}", vertices.len() - before, before);
    }

    let mut faces = Vec::new();
    for section in panel_sections {
        let before = faces.len();
        for idx in section {
            let tokens: Vec<&str> = lines[idx].split_whitespace().collect();
            let ids = parse_ids(&tokens, idx + 1)?;
            faces.push(face_from_one_based(&ids, idx + 1, FORMAT)?);
        }
        debug!("HydroSTAR panel section: {} panels after {}", faces.len() - before, before);
    }

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_hst<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_hst(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
