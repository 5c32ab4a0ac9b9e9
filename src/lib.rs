//! Readers for the surface mesh formats of hydrodynamics codes.
//!
//! Each format has its own ad-hoc text grammar: fixed read-ahead driven by counts in the
//! header, sections recognized by the shape of their lines, sentinel rows, or multi-file
//! assemblies. Whatever the source, the result is the same canonical [`mesh::Mesh`]:
//! double precision vertices and faces four indices wide, zero based, with triangles
//! repeating their first index in the last slot.
//!
//! # Features
//!
//! | Format | Keywords | Numbering | Notes |
//! |--------|----------|-----------|-------|
//! | Nemoh native | `mar`, `dat`, `nemoh` | 1-based | may return a half mesh with xOz symmetry |
//! | WAMIT GDF | `gdf`, `wamit` | implicit | four private vertices per panel |
//! | Diodore | `inp`, `diodore-inp` | 1-based | configuration plus `.DAT` companion files |
//! | HydroSTAR | `hst`, `hydrostar` | 1-based | several sections concatenated |
//! | Natural | `nat`, `natural` | 1-based | |
//! | GMSH legacy | `msh`, `gmsh` | 1-based | format 2.x ASCII |
//! | RADIOSS | `rad`, `radioss` | 1-based | |
//! | Tecplot | `tec`, `tecplot` | 1-based | FEPOINT quadrilateral zones |
//! | Nemoh mesh tool | `nem`, `nemoh_mesh` | 1-based | |
//! | STL | `stl` | 0-based | needs the `stl` feature, duplicate vertices merged |
//!
//! `vtu`, `vtp`, `vtk`, `paraview-legacy`, `med`, `salome`, `wrl`, `vrml` and
//! `diodore-dat` are known keywords but have no reader here.
//!
//! # Example
//! ```no_run
//! use rs_mesh_loaders::loader::load_mesh;
//! use rs_mesh_loaders::mesh::LoadedMesh;
//!
//! match load_mesh("barge.mar", None, Some("barge")) {
//!     Ok(LoadedMesh::Symmetric(sym)) => println!("Half mesh with {} faces", sym.half.nb_faces()),
//!     Ok(LoadedMesh::Mesh(mesh)) => println!("Mesh with {} faces", mesh.nb_faces()),
//!     Err(e) => println!("Error loading mesh: {}", e),
//! }
//! ```
//!
//! Readers never check that face indices point at existing vertices. Use
//! [`loader::LoadOptions::check_indices`] or [`mesh::Mesh::check_indices`] for that.

pub mod mesh;
pub mod mesh_error;

pub mod format;
pub mod loader;

pub mod utils {
    pub mod merge;
    pub mod text;
}

#[path = "loaders/nat.rs"]
pub mod nat;

#[path = "loaders/gdf.rs"]
pub mod gdf;

#[path = "loaders/nemoh.rs"]
pub mod nemoh;

#[path = "loaders/nemoh_mesh.rs"]
pub mod nemoh_mesh;

#[path = "loaders/radioss.rs"]
pub mod radioss;

#[path = "loaders/hydrostar.rs"]
pub mod hydrostar;

#[path = "loaders/gmsh.rs"]
pub mod gmsh;

#[path = "loaders/tecplot.rs"]
pub mod tecplot;

#[path = "loaders/diodore.rs"]
pub mod diodore;

#[cfg(feature = "stl")]
#[path = "loaders/stl.rs"]
pub mod stl;

#[cfg(test)]
mod tests;
