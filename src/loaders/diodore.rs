//! Diodore meshes: an `.INP` configuration file that assembles meshes stored in `.DAT`
//! companion files.
//!
//! The configuration declares translation frames and a sequence of directives:
//! ```text
//! *FRAME,NAME=body
//! 0.0, 0.0, -2.0
//! *NODE,INPUT=hull,FRAME=body
//! *ELEMENT,INPUT=hull
//! *NODE,INPUT=float,FRAME=body,INCREMENT=YES
//! *ELEMENT,INPUT=float
//! ```
//! `INPUT=hull` refers to `hull.DAT` next to the configuration file. Each data file holds
//! one node section (`id x y z` lines) and any number of element sections (lines starting
//! with a blank, `id n1 n2 n3 [n4]`). Empty lines inside a section do not split it. Node
//! ids in element lines are on-disk ids and are renumbered to positions in the node section.
//!
//! Directives are replayed in order by [`Assembly`]:
//! - the first `*NODE` sets the vertex table,
//! - a later `*NODE` without increment overwrites the vertices in place, position by position,
//! - a `*NODE` with `INCREMENT` set to anything but `NO` appends its vertices, and the faces of
//!   following `*ELEMENT` directives are shifted by the vertex count before the append,
//! - each `*ELEMENT` appends the next unused element section of its file, going back to the
//!   first one after the last.

use std::collections::HashMap;
use std::path::Path;

use nalgebra::{Point3, Vector3};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::loader::{check_file, read_text};
use crate::mesh::{Face, LoadedMesh, Mesh};
use crate::mesh_error::{MeshLoadError, Result};
use crate::utils::merge::renumber;
use crate::utils::text::{
    is_integer_line, is_node_line, line_runs, parse_f64, parse_ids, parse_point, parse_usize,
};

const FORMAT: &str = "Diodore";

static FRAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*FRAME,NAME=(.+)$").unwrap());
static DIRECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*(NODE|ELEMENT),(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Node,
    Element,
}

/// One `*NODE` or `*ELEMENT` line of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Data file name without the `.DAT` extension.
    pub input: String,
    pub frame: Option<String>,
    pub increment: bool,
}

/// Frames and directives of an `.INP` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InpLayout {
    pub frames: HashMap<String, Vector3<f64>>,
    pub directives: Vec<Directive>,
}

impl InpLayout {
    /// Distinct data files, in order of first reference.
    pub fn inputs(&self) -> Vec<&str> {
        let mut inputs: Vec<&str> = Vec::new();
        for directive in &self.directives {
            if !inputs.contains(&directive.input.as_str()) {
                inputs.push(&directive.input);
            }
        }
        inputs
    }
}

/// Node section and element sections of one `.DAT` file. Element connectivity is already
/// renumbered to zero-based positions in `nodes`, triangles padded.
#[derive(Debug, Clone, PartialEq)]
pub struct DatFile {
    pub nodes: Vec<Point3<f64>>,
    pub element_sections: Vec<Vec<Face>>,
}

pub fn parse_inp(text: &str) -> Result<InpLayout> {
    let lines: Vec<&str> = text.lines().collect();
    let mut layout = InpLayout::default();

    for (idx, line) in lines.iter().enumerate() {
        if let Some(caps) = FRAME.captures(line) {
            let frame_name = caps[1].trim().to_string();
            let vector_line = lines.get(idx + 1).ok_or_else(|| {
                MeshLoadError::malformed(FORMAT, format!("frame {} has no vector", frame_name))
            })?;
            let values = vector_line
                .split([',', ' ', '\t'])
                .filter(|t| !t.is_empty())
                .map(|t| parse_f64(t, idx + 2))
                .collect::<Result<Vec<f64>>>()?;
            if values.len() != 3 {
                return Err(MeshLoadError::malformed(
                    FORMAT,
                    format!("line {}: frame {} needs three components", idx + 2, frame_name),
                ));
            }
            layout
                .frames
                .insert(frame_name, Vector3::new(values[0], values[1], values[2]));
        } else if let Some(caps) = DIRECTIVE.captures(line) {
            layout.directives.push(parse_directive(&caps[1], &caps[2], idx + 1)?);
        }
    }
    Ok(layout)
}

fn parse_directive(kind: &str, options: &str, line: usize) -> Result<Directive> {
    let kind = if kind == "NODE" { DirectiveKind::Node } else { DirectiveKind::Element };
    let mut input = None;
    let mut frame = None;
    let mut increment = false;

    for option in options.split(',').filter(|o| !o.trim().is_empty()) {
        let (key, value) = option.split_once('=').ok_or_else(|| {
            MeshLoadError::malformed(FORMAT, format!("line {}: option '{}' is not KEY=VALUE", line, option))
        })?;
        let value = value.trim();
        match key.trim() {
            "INPUT" => input = Some(value.to_string()),
            "FRAME" => frame = Some(value.to_string()),
            "INCREMENT" => increment = kind == DirectiveKind::Node && value != "NO",
            other => debug!("Ignoring option {}={} on line {}", other, value, line),
        }
    }

    let input = input.ok_or_else(|| {
        MeshLoadError::malformed(FORMAT, format!("line {}: directive without INPUT", line))
    })?;
    Ok(Directive {
        kind,
        input,
        frame,
        increment,
    })
}

/// Element line: leading blank then element id and 3 or 4 node ids.
fn is_element_line(line: &str) -> bool {
    line.starts_with([' ', '\t']) && is_integer_line(line, 4, 5)
}

pub fn parse_dat(text: &str) -> Result<DatFile> {
    let lines: Vec<&str> = text.lines().collect();

    let node_sections = line_runs(&lines, is_node_line);
    let node_section = match node_sections.as_slice() {
        [single] => single.clone(),
        [] => return Err(MeshLoadError::malformed(FORMAT, "data file has no NODE section")),
        _ => {
            return Err(MeshLoadError::malformed(
                FORMAT,
                format!("{} NODE sections in one data file are not supported", node_sections.len()),
            ));
        }
    };

    let mut ids = Vec::with_capacity(node_section.len());
    let mut nodes = Vec::with_capacity(node_section.len());
    for idx in node_section {
        let tokens: Vec<&str> = lines[idx].split_whitespace().collect();
        ids.push(parse_usize(tokens[0], idx + 1)?);
        nodes.push(parse_point(&tokens[1..], idx + 1, FORMAT)?);
    }
    let positions = renumber(&ids);

    let mut element_sections = Vec::new();
    for section in line_runs(&lines, is_element_line) {
        let mut faces = Vec::with_capacity(section.len());
        for idx in section {
            let tokens: Vec<&str> = lines[idx].split_whitespace().collect();
            let mut face: Vec<usize> = Vec::with_capacity(4);
            for node_id in parse_ids(&tokens[1..], idx + 1)? {
                let position = positions.get(&node_id).ok_or_else(|| {
                    MeshLoadError::malformed(
                        FORMAT,
                        format!("line {}: element refers to unknown node {}", idx + 1, node_id),
                    )
                })?;
                face.push(position - 1);
            }
            if face.len() == 3 {
                face.push(face[0]);
            }
            faces.push([face[0], face[1], face[2], face[3]]);
        }
        element_sections.push(faces);
    }

    Ok(DatFile {
        nodes,
        element_sections,
    })
}

/// Running state of the directive replay.
#[derive(Debug, Default)]
pub struct Assembly {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Face>,
    /// Set while the last node directive appended: index of its first vertex.
    offset: Option<usize>,
    /// Next element section to use, per data file.
    cursors: HashMap<String, usize>,
}

impl Assembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn apply_node(&mut self, dat: &DatFile, translation: &Vector3<f64>, increment: bool) {
        let nodes = dat.nodes.iter().map(|p| p + translation);

        if self.vertices.is_empty() {
            self.vertices.extend(nodes);
            self.offset = None;
        } else if increment {
            self.offset = Some(self.vertices.len());
            self.vertices.extend(nodes);
        } else {
            for (i, p) in nodes.enumerate() {
                match self.vertices.get_mut(i) {
                    Some(v) => *v = p,
                    None => self.vertices.push(p),
                }
            }
            self.offset = None;
        }
    }

    pub fn apply_element(&mut self, input: &str, dat: &DatFile) -> Result<()> {
        let nb_sections = dat.element_sections.len();
        if nb_sections == 0 {
            return Err(MeshLoadError::malformed(
                FORMAT,
                format!("{}.DAT has no ELEMENT section", input),
            ));
        }
        let cursor = self.cursors.entry(input.to_string()).or_insert(0);
        let section = &dat.element_sections[*cursor];
        *cursor = (*cursor + 1) % nb_sections;

        let shift = self.offset.unwrap_or(0);
        self.faces
            .extend(section.iter().map(|f| [f[0] + shift, f[1] + shift, f[2] + shift, f[3] + shift]));
        Ok(())
    }

    /// Replays all directives of the layout against the parsed data files.
    pub fn replay(layout: &InpLayout, files: &HashMap<String, DatFile>) -> Result<Assembly> {
        let mut assembly = Assembly::new();
        for directive in &layout.directives {
            let dat = files.get(&directive.input).ok_or_else(|| {
                MeshLoadError::malformed(FORMAT, format!("data file {} was not read", directive.input))
            })?;
            match directive.kind {
                DirectiveKind::Node => {
                    let translation = match &directive.frame {
                        Some(frame) => *layout
                            .frames
                            .get(frame)
                            .ok_or_else(|| MeshLoadError::MissingFrame(frame.clone()))?,
                        None => {
                            warn!("NODE directive for {} has no FRAME, nodes are not moved", directive.input);
                            Vector3::zeros()
                        }
                    };
                    assembly.apply_node(dat, &translation, directive.increment);
                }
                DirectiveKind::Element => assembly.apply_element(&directive.input, dat)?,
            }
            debug!(
                "{:?} {}: {} vertices, {} faces",
                directive.kind,
                directive.input,
                assembly.vertices.len(),
                assembly.faces.len()
            );
        }
        Ok(assembly)
    }

    pub fn into_mesh(self, name: Option<String>) -> Mesh {
        Mesh::new(self.vertices, self.faces, name)
    }
}

pub fn load_inp<P: AsRef<Path>>(path: P, name: Option<&str>) -> Result<LoadedMesh> {
    let path = path.as_ref();
    let layout = parse_inp(&read_text(path)?)?;
    let directory = path.parent().unwrap_or_else(|| Path::new(""));

    let mut files = HashMap::new();
    for input in layout.inputs() {
        let dat_path = directory.join(format!("{}.DAT", input));
        check_file(&dat_path)?;
        files.insert(input.to_string(), parse_dat(&read_text(&dat_path)?)?);
    }

    let assembly = Assembly::replay(&layout, &files)?;
    Ok(assembly.into_mesh(name.map(str::to_string)).into())
}

/// Stand-alone Diodore data files have no reader yet.
pub fn load_dat<P: AsRef<Path>>(path: P, _name: Option<&str>) -> Result<LoadedMesh> {
    check_file(path.as_ref())?;
    Err(MeshLoadError::NotImplemented("diodore-dat".to_string()))
}
