//! Registry of known mesh formats.
//!
//! Several keywords may name the same format, typically the file extension and the
//! name of the tool producing it (`gdf` and `wamit`). Keywords are case sensitive.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::mesh::LoadedMesh;
use crate::mesh_error::{MeshLoadError, Result};
use crate::{diodore, gdf, gmsh, hydrostar, nat, nemoh, nemoh_mesh, radioss, tecplot};

/// Mesh file formats this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Nemoh native input (`.mar`, `.dat`)
    Nemoh,
    /// WAMIT geometric data file (`.gdf`)
    Wamit,
    /// Diodore configuration with companion `.DAT` files
    DiodoreInp,
    /// Diodore stand-alone data file
    DiodoreDat,
    HydroStar,
    Natural,
    /// GMSH legacy ASCII (`.msh`, version 2)
    Gmsh,
    Radioss,
    Stl,
    Vtu,
    Vtp,
    VtkLegacy,
    Tecplot,
    Med,
    Vrml,
    /// Input of the mesh tool shipped with Nemoh
    NemohMesh,
}

/// Keyword to format table. The first keyword listed for a format is its canonical name.
const KEYWORDS: [(&str, Format); 29] = [
    ("mar", Format::Nemoh),
    ("dat", Format::Nemoh),
    ("nemoh", Format::Nemoh),
    ("gdf", Format::Wamit),
    ("wamit", Format::Wamit),
    ("inp", Format::DiodoreInp),
    ("diodore-inp", Format::DiodoreInp),
    ("diodore-dat", Format::DiodoreDat),
    ("hst", Format::HydroStar),
    ("hydrostar", Format::HydroStar),
    ("nat", Format::Natural),
    ("natural", Format::Natural),
    ("msh", Format::Gmsh),
    ("gmsh", Format::Gmsh),
    ("rad", Format::Radioss),
    ("radioss", Format::Radioss),
    ("stl", Format::Stl),
    ("vtu", Format::Vtu),
    ("vtp", Format::Vtp),
    ("vtk", Format::VtkLegacy),
    ("paraview-legacy", Format::VtkLegacy),
    ("tec", Format::Tecplot),
    ("tecplot", Format::Tecplot),
    ("med", Format::Med),
    ("salome", Format::Med),
    ("wrl", Format::Vrml),
    ("vrml", Format::Vrml),
    ("nem", Format::NemohMesh),
    ("nemoh_mesh", Format::NemohMesh),
];

impl Format {
    /// Exact, case sensitive lookup of a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Format> {
        KEYWORDS
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, format)| *format)
    }

    /// Format named by the extension of the path, leading dot stripped, case kept.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let keyword = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        keyword.parse()
    }

    /// All registered keywords, aliases included.
    pub fn keywords() -> impl Iterator<Item = &'static str> {
        KEYWORDS.iter().map(|(k, _)| *k)
    }

    pub fn canonical_keyword(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|(_, format)| *format == self)
            .map(|(k, _)| *k)
            .unwrap_or("?")
    }

    /// Runs the reader of this format.
    pub fn decode(self, path: &Path, name: Option<&str>) -> Result<LoadedMesh> {
        match self {
            Format::Nemoh => nemoh::load_mar(path, name),
            Format::Wamit => gdf::load_gdf(path, name),
            Format::DiodoreInp => diodore::load_inp(path, name),
            Format::DiodoreDat => diodore::load_dat(path, name),
            Format::HydroStar => hydrostar::load_hst(path, name),
            Format::Natural => nat::load_nat(path, name),
            Format::Gmsh => gmsh::load_msh(path, name),
            Format::Radioss => radioss::load_rad(path, name),
            Format::Tecplot => tecplot::load_tec(path, name),
            Format::NemohMesh => nemoh_mesh::load_nem(path, name),
            Format::Stl => Self::decode_stl(path, name),
            Format::Vtu | Format::Vtp | Format::VtkLegacy | Format::Med | Format::Vrml => Err(
                MeshLoadError::NotImplemented(format!(
                    "{} (needs an external reader)",
                    self.canonical_keyword()
                )),
            ),
        }
    }

    #[cfg(feature = "stl")]
    fn decode_stl(path: &Path, name: Option<&str>) -> Result<LoadedMesh> {
        crate::stl::load_stl(path, name)
    }

    #[cfg(not(feature = "stl"))]
    fn decode_stl(_path: &Path, _name: Option<&str>) -> Result<LoadedMesh> {
        Err(MeshLoadError::NotImplemented(
            "stl (built without the \"stl\" feature)".to_string(),
        ))
    }
}

impl FromStr for Format {
    type Err = MeshLoadError;

    fn from_str(keyword: &str) -> Result<Self> {
        Format::from_keyword(keyword)
            .ok_or_else(|| MeshLoadError::UnsupportedFormat(keyword.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.canonical_keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(Format::from_keyword("gdf"), Some(Format::Wamit));
        assert_eq!(Format::from_keyword("wamit"), Some(Format::Wamit));
        assert_eq!(Format::from_keyword("mar"), Some(Format::Nemoh));
        assert_eq!(Format::from_keyword("dat"), Some(Format::Nemoh));
        assert_eq!(Format::from_keyword("nemoh"), Some(Format::Nemoh));
        assert_eq!(Format::from_keyword("nemoh_mesh"), Some(Format::NemohMesh));
        assert_eq!(Format::from_keyword("paraview-legacy"), Some(Format::VtkLegacy));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(Format::from_keyword("GDF"), None);
        assert_eq!(Format::from_keyword(".gdf"), None);
        assert_eq!(Format::from_keyword("gd"), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path("dir/mesh.gdf").unwrap(), Format::Wamit);
        assert_eq!(Format::from_path("a.b/mesh.msh").unwrap(), Format::Gmsh);
        match Format::from_path("x.foo") {
            Err(MeshLoadError::UnsupportedFormat(k)) => assert_eq!(k, "foo"),
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(matches!(
            Format::from_path("noextension"),
            Err(MeshLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_every_keyword_resolves() {
        for keyword in Format::keywords() {
            let format: Format = keyword.parse().unwrap();
            assert_eq!(Format::from_keyword(&format.to_string()), Some(format));
        }
        assert_eq!(Format::keywords().count(), 29);
    }
}
