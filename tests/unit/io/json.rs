//! Tests for JSON reading and writing

#[cfg(test)]
mod tests {
    use kinmorph::KinError;
    use kinmorph::analysis::detector::{FaceMesh, MeshPoint};
    use kinmorph::io::json::{read_json, write_json};
    use std::collections::BTreeMap;

    // Tests written values read back unchanged through nested directories
    // Verified by writing compact JSON without creating directories
    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records/child.json");
        let value = BTreeMap::from([("seed".to_string(), 42), ("faces".to_string(), 1)]);

        write_json(&value, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        let back: BTreeMap<String, i32> = read_json(&path).unwrap();
        assert_eq!(back, value);
    }

    // Tests landmark meshes load as lists of coordinate triples
    // Verified by expecting objects with named fields
    #[test]
    fn test_read_mesh_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.json");
        std::fs::write(&path, "[[[0.1, 0.2, 0.0], [0.3, 0.4, -0.05]]]").unwrap();
        let faces: Vec<FaceMesh> = read_json(&path).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0][1], MeshPoint::new(0.3, 0.4, -0.05));
    }

    // Tests read failures distinguish missing files from bad contents
    // Verified by mapping both to the same variant
    #[test]
    fn test_read_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = read_json::<Vec<FaceMesh>>(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(KinError::FileSystem { .. })));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"faces\": 3}").unwrap();
        let malformed = read_json::<Vec<FaceMesh>>(&path);
        assert!(matches!(malformed, Err(KinError::ConfigParse { .. })));
    }

    // Tests a value JSON cannot encode is reported as an export failure with no file written
    // Verified by reporting encoding failures as parse errors
    #[test]
    fn test_write_unencodable_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/child.json");
        let value = BTreeMap::from([((1_u8, 2_u8), 3_u8)]);

        let result = write_json(&value, &path);
        assert!(matches!(
            result,
            Err(KinError::RecordExport { path: ref p, .. }) if p.ends_with("out/child.json")
        ));
        assert!(!path.exists());
    }
}
