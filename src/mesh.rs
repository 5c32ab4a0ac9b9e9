//! Canonical in-memory mesh every reader produces.
//!
//! Vertices are double precision points, faces are always four vertex indices wide.
//! A triangle repeats its first index in the fourth slot, so a face `[a, b, c, a]`
//! is a triangle and `[a, b, c, d]` with distinct indices is a quadrangle.
//! All indices are zero based whatever the numbering of the source file was.

use nalgebra::{Point3, Vector3};

use crate::mesh_error::{MeshLoadError, Result};

/// Four vertex indices, triangles padded with their first index.
pub type Face = [usize; 4];

/// Vertex and face tables with an optional name.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
    pub name: Option<String>,
}

impl Mesh {
    /// Takes ownership of the fully populated tables. Faces are not validated here,
    /// use [`Mesh::check_indices`] if required.
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Face>, name: Option<String>) -> Self {
        Mesh {
            vertices,
            faces,
            name,
        }
    }

    pub fn nb_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn nb_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if this face is a triangle stored with the degenerate fourth corner.
    pub fn is_triangle(face: &Face) -> bool {
        face[3] == face[0]
    }

    pub fn nb_triangles(&self) -> usize {
        self.faces.iter().filter(|f| Mesh::is_triangle(f)).count()
    }

    pub fn nb_quadrangles(&self) -> usize {
        self.nb_faces() - self.nb_triangles()
    }

    /// Verifies that every face index points at an existing vertex. Readers do not
    /// call this themselves and pass indices through as found on disk.
    pub fn check_indices(&self) -> Result<()> {
        let nb_vertices = self.nb_vertices();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i >= nb_vertices) {
                return Err(MeshLoadError::IndexOutOfRange {
                    face: face_idx,
                    index,
                    nb_vertices,
                });
            }
        }
        Ok(())
    }
}

/// Plane given as `normal . p = c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub c: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, c: f64) -> Self {
        Plane { normal, c }
    }

    /// The `y = 0` plane, the usual symmetry plane of ship hulls.
    pub fn xoz() -> Self {
        Plane::new(Vector3::y(), 0.0)
    }

    /// Mirror image of the point through this plane.
    pub fn reflect(&self, p: &Point3<f64>) -> Point3<f64> {
        let n = self.normal.normalize();
        let distance = n.dot(&p.coords) - self.c / self.normal.norm();
        p - 2.0 * distance * n
    }
}

/// Half of a mesh symmetric with respect to a plane. The other half is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionSymmetricMesh {
    pub half: Mesh,
    pub plane: Plane,
    pub name: Option<String>,
}

impl ReflectionSymmetricMesh {
    /// Wraps the stored half. If a name is given the half is renamed to `half_of_<name>`.
    pub fn wrap_symmetric(mut half: Mesh, plane: Plane, name: Option<String>) -> Self {
        if let Some(name) = &name {
            half.name = Some(format!("half_of_{}", name));
        }
        ReflectionSymmetricMesh { half, plane, name }
    }

    /// Builds the full mesh: the half followed by its mirror image. Winding of the
    /// mirrored faces is reversed so that normals keep pointing outwards.
    pub fn to_full_mesh(&self) -> Mesh {
        let offset = self.half.nb_vertices();
        let mut vertices = self.half.vertices.clone();
        vertices.extend(self.half.vertices.iter().map(|p| self.plane.reflect(p)));

        let mut faces = self.half.faces.clone();
        faces.extend(self.half.faces.iter().map(|f| {
            if Mesh::is_triangle(f) {
                [f[0] + offset, f[2] + offset, f[1] + offset, f[0] + offset]
            } else {
                [f[0] + offset, f[3] + offset, f[2] + offset, f[1] + offset]
            }
        }));
        Mesh::new(vertices, faces, self.name.clone())
    }
}

/// What a reader returns: either a plain mesh or a half mesh with its symmetry.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedMesh {
    Mesh(Mesh),
    Symmetric(ReflectionSymmetricMesh),
}

impl LoadedMesh {
    pub fn name(&self) -> Option<&str> {
        match self {
            LoadedMesh::Mesh(mesh) => mesh.name.as_deref(),
            LoadedMesh::Symmetric(sym) => sym.name.as_deref(),
        }
    }

    /// The stored mesh: the mesh itself, or the half for symmetric meshes.
    pub fn stored(&self) -> &Mesh {
        match self {
            LoadedMesh::Mesh(mesh) => mesh,
            LoadedMesh::Symmetric(sym) => &sym.half,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        matches!(self, LoadedMesh::Symmetric(_))
    }

    /// Converts into a plain mesh, unfolding the symmetry if there is one.
    pub fn into_mesh(self) -> Mesh {
        match self {
            LoadedMesh::Mesh(mesh) => mesh,
            LoadedMesh::Symmetric(sym) => sym.to_full_mesh(),
        }
    }
}

impl From<Mesh> for LoadedMesh {
    fn from(mesh: Mesh) -> Self {
        LoadedMesh::Mesh(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(1.0, 2.0, 0.0),
                Point3::new(0.0, 2.0, 0.0),
            ],
            vec![[0, 1, 2, 3], [0, 1, 2, 0]],
            None,
        )
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.nb_faces(), 2);
        assert_eq!(mesh.nb_triangles(), 1);
        assert_eq!(mesh.nb_quadrangles(), 1);
    }

    #[test]
    fn test_check_indices() {
        let mut mesh = quad();
        assert!(mesh.check_indices().is_ok());
        mesh.faces.push([0, 1, 7, 0]);
        match mesh.check_indices() {
            Err(MeshLoadError::IndexOutOfRange { face, index, nb_vertices }) => {
                assert_eq!((face, index, nb_vertices), (2, 7, 4));
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_reflect_xoz() {
        let p = Plane::xoz().reflect(&Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_wrap_symmetric_names_half() {
        let sym = ReflectionSymmetricMesh::wrap_symmetric(quad(), Plane::xoz(), Some("hull".into()));
        assert_eq!(sym.half.name.as_deref(), Some("half_of_hull"));
        assert_eq!(sym.name.as_deref(), Some("hull"));

        let full = LoadedMesh::Symmetric(sym).into_mesh();
        assert_eq!(full.nb_vertices(), 8);
        assert_eq!(full.nb_faces(), 4);
        assert_eq!(full.faces[2], [4, 7, 6, 5]);
        assert_eq!(full.faces[3], [4, 6, 5, 4]);
        assert_eq!(full.vertices[5], Point3::new(1.0, -1.0, 0.0));
    }
}
