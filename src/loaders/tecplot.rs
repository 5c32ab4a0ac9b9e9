//! Tecplot finite element zones of quadrilaterals.
//!
//! ```text
//! ZONE T="hull", N=4, E=1, F=FEPOINT, ET=QUADRILATERAL
//! 0.0 0.0 0.0
//! ...
//! 1 2 3 4
//! ```
//! The node block is read as a flat list of reals and reshaped to `N` rows. When nodes
//! carry extra variables after x, y, z, these are dropped. The connectivity block is read
//! as a flat list of `4 * E` one-based ids. Only the first matching zone is read. The
//! `N=, E=, F=, ET=` part of the header may be on the line after `ZONE T="..."`.

use std::path::Path;

use nalgebra::Point3;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::loader::read_text;
use crate::mesh::{LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{face_from_one_based, parse_f64, parse_usize};

const FORMAT: &str = "Tecplot";

static ZONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)ZONE.*N\s*=\s*(\d+)\s*,\s*E\s*=\s*(\d+)\s*,\s*F\s*=\s*FEPOINT\s*,\s*ET\s*=\s*QUADRILATERAL",
    )
    .unwrap()
});

static ZONE_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*ZONE\b").unwrap());

/// Zone header with its vertex and element counts. The counts may follow `ZONE T="..."`
/// on the next non-blank line. Returns the index of the last header line.
fn find_zone(lines: &[&str]) -> Result<(usize, usize, usize)> {
    for (idx, line) in lines.iter().enumerate() {
        if !ZONE_START.is_match(line) {
            continue;
        }
        let mut header = line.to_string();
        let mut last = idx;
        if !ZONE.is_match(&header) {
            if let Some(offset) = lines[idx + 1..].iter().position(|l| !l.trim().is_empty()) {
                last = idx + 1 + offset;
                header.push(' ');
                header.push_str(lines[last]);
            }
        }
        if let Some(caps) = ZONE.captures(&header) {
            let nb_vertices = parse_usize(&caps[1], last + 1)?;
            let nb_elements = parse_usize(&caps[2], last + 1)?;
            return Ok((last, nb_vertices, nb_elements));
        }
    }
    Err(MeshLoadError::malformed(
        FORMAT,
        "no 'ZONE N=.., E=.., F=FEPOINT, ET=QUADRILATERAL' header found",
    ))
}

pub fn parse_tec(text: &str) -> Result<Mesh> {
    let lines: Vec<&str> = text.lines().collect();
    let (header, nb_vertices, nb_elements) = find_zone(&lines)?;

    // Numeric tokens following the header, up to the next non numeric line.
    let mut values: Vec<(usize, &str)> = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(header + 1) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.iter().any(|t| t.parse::<f64>().is_err()) {
            break;
        }
        values.extend(tokens.into_iter().map(|t| (idx + 1, t)));
    }

    let nb_ids = 4 * nb_elements;
    if nb_vertices == 0 || values.len() < 3 * nb_vertices + nb_ids {
        return Err(MeshLoadError::malformed(
            FORMAT,
            format!(
                "zone declares {} nodes and {} elements but holds only {} values",
                nb_vertices,
                nb_elements,
                values.len()
            ),
        ));
    }
    let (node_values, id_values) = values.split_at(values.len() - nb_ids);
    if node_values.len() % nb_vertices != 0 {
        return Err(MeshLoadError::malformed(
            FORMAT,
            format!("{} node values cannot be split in {} nodes", node_values.len(), nb_vertices),
        ));
    }
    let per_node = node_values.len() / nb_vertices;

    let mut vertices = Vec::with_capacity(nb_vertices);
    for row in node_values.chunks(per_node) {
        vertices.push(Point3::new(
            parse_f64(row[0].1, row[0].0)?,
            parse_f64(row[1].1, row[1].0)?,
            parse_f64(row[2].1, row[2].0)?,
        ));
    }

    let mut faces = Vec::with_capacity(nb_elements);
    for row in id_values.chunks(4) {
        let ids = row
            .iter()
            .map(|(line, token)| parse_usize(token, *line))
            .collect::<Result<Vec<_>>>()?;
        faces.push(face_from_one_based(&ids, row[0].0, FORMAT)?);
    }

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_tec<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_tec(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
