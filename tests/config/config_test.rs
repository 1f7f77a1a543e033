#[cfg(test)]
mod tests {
    use schemadoc::config::{check_version, mask_dsn, Config, ConfigError, VersionError};
    use std::path::PathBuf;

    fn testdata(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/testdata")
            .join(name)
    }

    #[test]
    fn test_load_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.dsn, "");
        assert_eq!(config.doc_path, "dbdoc");
        assert_eq!(config.distance, 0);
        assert!(!config.detect_virtual_relations.enabled);
    }

    #[test]
    fn test_load_config_file() {
        std::env::set_var("SCHEMADOC_TEST_PG_PASS", "pgpass");
        std::env::set_var("SCHEMADOC_TEST_DOC_PATH", "sample/pg");
        let config = Config::from_file(testdata("schemadoc_test.toml")).unwrap();

        assert_eq!(
            config.dsn,
            "pg://root:pgpass@localhost:55432/testdb?sslmode=disable"
        );
        assert_eq!(config.doc_path, "sample/pg");
        assert_eq!(config.dict.lookup("Indexes"), "INDEX");
        assert_eq!(config.dict.lookup("Triggers"), "Triggers");
        assert_eq!(config.exclude, vec!["migrations"]);
        assert_eq!(config.annotations.relations.len(), 1);
        assert_eq!(config.annotations.comments.len(), 3);
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_file(testdata("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_duplicate_config_file() {
        let err = Config::load_from(&testdata("config")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate config file [.schemadoc.toml, schemadoc.toml]"
        );
    }

    #[test]
    fn test_discover_single_config_file() {
        let config = Config::load_from(&testdata("single")).unwrap();
        assert_eq!(config.doc_path, "docs/schema");
        assert_eq!(config.distance, 1);
        assert_eq!(
            config.detect_virtual_relations.naming_strategy().unwrap().name(),
            "prefixed_primary_key"
        );
    }

    #[test]
    fn test_no_config_file_gives_defaults() {
        let config = Config::load_from(&testdata("missing")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_masked_dsn() {
        let cases = [
            (
                "pg://root:pgpass@localhost:5432/testdb?sslmode=disable",
                "pg://root:*****@localhost:5432/testdb?sslmode=disable",
            ),
            (
                "pg://root@localhost:5432/testdb?sslmode=disable",
                "pg://root@localhost:5432/testdb?sslmode=disable",
            ),
            (
                "pg://localhost:5432/testdb?sslmode=disable",
                "pg://localhost:5432/testdb?sslmode=disable",
            ),
            (
                "bq://project-id/dataset-id?creds=/path/to/google_application_credentials.json",
                "bq://project-id/dataset-id?creds=/path/to/google_application_credentials.json",
            ),
        ];
        for (url, want) in cases {
            let config = Config {
                dsn: url.to_string(),
                ..Config::default()
            };
            assert_eq!(config.masked_dsn().unwrap(), want);
            assert_eq!(mask_dsn(url).unwrap(), want);
        }
    }

    #[test]
    fn test_check_version() {
        let ok = [">= 1.42", ">= 1.42, < 2", "> 1.42", "1.42.3"];
        for required in ok {
            assert!(check_version(required, "1.42.3").is_ok(), "{}", required);
        }

        let err = check_version("1.42.4", "1.42.3").unwrap_err();
        assert_eq!(
            err,
            VersionError::VersionMismatch {
                required: "1.42.4".to_string(),
                running: "1.42.3".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "the required schemadoc version for the configuration is '1.42.4'. however, the running schemadoc version is '1.42.3'"
        );
    }
}
