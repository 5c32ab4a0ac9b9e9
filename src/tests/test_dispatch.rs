#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::loader::{LoadOptions, load_mesh, load_mesh_with};
    use crate::mesh_error::MeshLoadError;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Cannot create temporary file");
        file.write_all(content.as_bytes()).expect("Cannot write temporary file");
        file.flush().expect("Cannot write temporary file");
        file
    }

    #[test]
    fn test_missing_file() {
        match load_mesh("/nonexistent/hull.gdf", None, None) {
            Err(MeshLoadError::FileNotFound(path)) => {
                assert_eq!(path.to_str(), Some("/nonexistent/hull.gdf"))
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_reported_before_format() {
        assert!(matches!(
            load_mesh("/nonexistent/hull.foo", None, None),
            Err(MeshLoadError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_extension() {
        let file = temp_file(".foo", "whatever\n");
        match load_mesh(file.path(), None, None) {
            Err(MeshLoadError::UnsupportedFormat(keyword)) => assert_eq!(keyword, "foo"),
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keyword() {
        let err = load_mesh("src/tests/data/box.nat", Some("obj"), None).unwrap_err();
        assert_eq!(err.to_string(), "extension \".obj\" is not known");
    }

    #[test]
    fn test_keyword_overrides_extension() {
        let file = temp_file(".txt", "0 0\n3 1\n0.0 0.0 0.0\n1.0 0.0 0.0\n0.0 1.0 0.0\n1 2 3 1\n");
        let mesh = load_mesh(file.path(), Some("natural"), Some("panel"))
            .expect("Failed to load mesh")
            .into_mesh();
        assert_eq!(mesh.nb_vertices(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2, 0]]);
        assert_eq!(mesh.name.as_deref(), Some("panel"));
    }

    #[test]
    fn test_registered_without_reader() {
        for keyword in ["vtu", "vtp", "vtk", "paraview-legacy", "med", "salome", "wrl", "vrml"] {
            assert!(
                matches!(
                    load_mesh("src/tests/data/box.nat", Some(keyword), None),
                    Err(MeshLoadError::NotImplemented(_))
                ),
                "{} should not be readable",
                keyword
            );
        }
    }

    #[test]
    fn test_index_check_is_opt_in() {
        // Face refers to a fourth vertex that the file does not define
        let file = temp_file(".nat", "0 0\n3 1\n0.0 0.0 0.0\n1.0 0.0 0.0\n0.0 1.0 0.0\n1 2 3 4\n");

        let permissive = load_mesh(file.path(), None, None).expect("Indices are not checked by default");
        assert_eq!(permissive.stored().faces, vec![[0, 1, 2, 3]]);

        let options = LoadOptions::new().check_indices(true);
        match load_mesh_with(file.path(), &options) {
            Err(MeshLoadError::IndexOutOfRange {
                face,
                index,
                nb_vertices,
            }) => {
                assert_eq!((face, index, nb_vertices), (0, 3, 3));
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_options_builder() {
        let options = LoadOptions::new().format("gdf").name("barge");
        let loaded = load_mesh_with("src/tests/data/barge.gdf", &options).expect("Failed to load mesh");
        assert_eq!(loaded.name(), Some("barge"));
        assert_eq!(
            loaded,
            load_mesh("src/tests/data/barge.gdf", Some("wamit"), Some("barge")).expect("Failed to load mesh")
        );
    }

    #[test]
    fn test_numeric_error_has_line() {
        let file = temp_file(".nat", "0 0\n2 0\n0.0 0.0 0.0\n1.0 abc 0.0\n");
        match load_mesh(file.path(), None, None) {
            Err(MeshLoadError::NumericParse { line, token, .. }) => {
                assert_eq!(line, 4);
                assert_eq!(token, "abc");
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
