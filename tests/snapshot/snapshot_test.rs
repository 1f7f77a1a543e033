#[cfg(test)]
mod tests {
    use schemadoc::filter::filter_tables;
    use schemadoc::snapshot::{fingerprint, fingerprint_file, read_snapshot, write_snapshot, SnapshotError};
    use std::path::PathBuf;

    fn testdata(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/testdata")
            .join(name)
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("schemadoc-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_write_then_read() {
        let mut schema = read_snapshot(testdata("filter_tables.json")).unwrap();
        filter_tables(&mut schema, &["users"], &[], &[], 1).unwrap();

        let path = scratch("filtered.json");
        write_snapshot(&path, &schema).unwrap();
        let back = read_snapshot(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(back, schema);
        assert_eq!(back.tables().len(), 3);
    }

    #[test]
    fn test_fingerprint_file_matches_schema() {
        let path = testdata("filter_tables.json");
        let schema = read_snapshot(&path).unwrap();
        assert_eq!(fingerprint_file(&path).unwrap(), fingerprint(&schema).unwrap());
    }

    #[test]
    fn test_fingerprint_changes_with_filter() {
        let mut schema = read_snapshot(testdata("filter_tables.json")).unwrap();
        let before = fingerprint(&schema).unwrap();
        filter_tables(&mut schema, &[], &["schema_migrations"], &[], 0).unwrap();
        assert_ne!(before, fingerprint(&schema).unwrap());
    }

    #[test]
    fn test_missing_snapshot() {
        let err = read_snapshot(testdata("missing.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_unrepairable_snapshot() {
        let path = scratch("broken.json");
        std::fs::write(
            &path,
            r#"{"name":"s","tables":[],"relations":[{"table":"a","columns":["id"],"parent_table":"b","parent_columns":["id"],"def":""}]}"#,
        )
        .unwrap();
        let err = read_snapshot(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, SnapshotError::Codec { .. }));
    }
}
