//! WAMIT geometric data files (GDF).
//!
//! Every panel owns four fresh vertex rows, so the vertex table has exactly four rows
//! per panel and vertices shared between panels are repeated. Triangles are given as
//! quadrangles with two coinciding corners.

use std::path::Path;

use tracing::debug;

use crate::loader::read_text;
use crate::mesh::{Face, LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::text::{LineCursor, parse_f64, parse_usize};

const FORMAT: &str = "WAMIT GDF";

/// Scalars of the GDF header. They are read for completeness but do not affect the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct GdfHeader {
    pub title: String,
    /// Characteristic length
    pub ulen: f64,
    /// Acceleration of gravity
    pub gravity: f64,
    /// Symmetry flags about the x = 0 and y = 0 planes
    pub isx: usize,
    pub isy: usize,
    pub nb_panels: usize,
}

pub fn parse_gdf_header(cursor: &mut LineCursor<'_>) -> Result<GdfHeader> {
    // Title takes exactly one line, which may be blank
    let (_, title) = cursor.next_line("title line")?;

    let (line, tokens) = cursor.next_tokens("ulen and gravity")?;
    if tokens.len() < 2 {
        return Err(MeshLoadError::malformed(FORMAT, format!("line {}: expected ULEN GRAV", line)));
    }
    let ulen = parse_f64(tokens[0], line)?;
    let gravity = parse_f64(tokens[1], line)?;

    let (line, tokens) = cursor.next_tokens("symmetry flags")?;
    if tokens.len() < 2 {
        return Err(MeshLoadError::malformed(FORMAT, format!("line {}: expected ISX ISY", line)));
    }
    let isx = parse_usize(tokens[0], line)?;
    let isy = parse_usize(tokens[1], line)?;

    let nb_panels = cursor.next_count("panel count")?;

    Ok(GdfHeader {
        title: title.trim().to_string(),
        ulen,
        gravity,
        isx,
        isy,
        nb_panels,
    })
}

pub fn parse_gdf(text: &str) -> Result<Mesh> {
    let mut cursor = LineCursor::new(text, FORMAT);
    let header = parse_gdf_header(&mut cursor)?;
    debug!("GDF header {:?}", header);

    let mut vertices = Vec::with_capacity(4 * header.nb_panels);
    let mut faces: Vec<Face> = Vec::with_capacity(header.nb_panels);
    for _ in 0..header.nb_panels {
        let first = vertices.len();
        for _ in 0..4 {
            vertices.push(cursor.next_point("panel vertices")?);
        }
        faces.push([first, first + 1, first + 2, first + 3]);
    }

    Ok(Mesh::new(vertices, faces, None))
}

pub fn load_gdf<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let mut mesh = parse_gdf(&read_text(path.as_ref())?)?;
    mesh.name = name.map(str::to_string);
    Ok(mesh.into())
}
