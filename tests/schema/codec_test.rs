#[cfg(test)]
mod tests {
    use schemadoc::schema::{decode, encode, encode_pretty, Cardinality, CodecError};
    use std::fs;
    use std::path::PathBuf;

    fn fixture_json() -> String {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/filter_tables.json");
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_fixture_repairs() {
        let schema = decode(&fixture_json()).unwrap().repair().unwrap();

        assert_eq!(schema.name, "testdb");
        assert_eq!(schema.tables().len(), 5);
        assert_eq!(schema.relations().len(), 3);

        let users = schema.find_table("users").unwrap();
        let id = users.find_column("id").unwrap();
        assert_eq!(id.child_relations().len(), 2);
        assert!(id.default.is_some());
        assert!(users.find_column("username").unwrap().default.is_none());

        let relation = &schema.relations()[0];
        assert_eq!(relation.cardinality, Cardinality::ZeroOrOne);
        assert_eq!(relation.parent_cardinality, Cardinality::ExactlyOne);
        assert!(!relation.is_virtual);
    }

    #[test]
    fn test_repaired_relations_point_into_tables() {
        let schema = decode(&fixture_json()).unwrap().repair().unwrap();
        for relation in schema.relations() {
            let table = schema.relation_table(relation);
            let found = schema.find_table(&table.name).unwrap();
            assert!(std::ptr::eq(table, found));

            let parent = schema.relation_parent_table(relation);
            let found = schema.find_table(&parent.name).unwrap();
            assert!(std::ptr::eq(parent, found));
        }
    }

    #[test]
    fn test_round_trip_is_stable() {
        let schema = decode(&fixture_json()).unwrap().repair().unwrap();
        let once = encode(&schema).unwrap();
        let again = encode(&decode(&once).unwrap().repair().unwrap()).unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn test_referenced_tables_are_recomputed() {
        let json = r#"{
            "name": "s",
            "tables": [
                {"name": "a", "type": "", "columns": [{"name": "id", "type": "int", "nullable": false}],
                 "referenced_tables": ["b", "ghost"]},
                {"name": "b", "type": "", "columns": [{"name": "id", "type": "int", "nullable": false}]}
            ],
            "relations": []
        }"#;
        let schema = decode(json).unwrap().repair().unwrap();
        assert!(schema.find_table("a").unwrap().referenced_tables().is_empty());

        let out = encode(&schema).unwrap();
        assert!(!out.contains("referenced_tables"));
    }

    #[test]
    fn test_relation_without_columns_repairs() {
        let json = r#"{
            "name": "s",
            "tables": [
                {"name": "a", "type": "", "columns": [{"name": "id", "type": "int", "nullable": false}]},
                {"name": "b", "type": "", "columns": [{"name": "id", "type": "int", "nullable": false}]}
            ],
            "relations": [
                {"table": "a", "columns": [], "parent_table": "b", "parent_columns": [], "def": "trigger based"}
            ]
        }"#;
        let schema = decode(json).unwrap().repair().unwrap();

        assert_eq!(schema.relations().len(), 1);
        assert!(schema.relations()[0].columns.is_empty());
        assert_eq!(schema.find_table("a").unwrap().referenced_tables(), &[1]);
        assert!(schema.find_table("b").unwrap().find_column("id").unwrap().child_relations().is_empty());
    }

    #[test]
    fn test_pretty_output_decodes() {
        let schema = decode(&fixture_json()).unwrap().repair().unwrap();
        let pretty = encode_pretty(&schema).unwrap();
        assert!(pretty.contains('\n'));
        let back = decode(&pretty).unwrap().repair().unwrap();
        assert_eq!(back, schema);
    }

    #[test]
    fn test_invalid_cardinality_names_token() {
        let json = r#"{"name":"s","tables":[],"relations":[
            {"table":"a","columns":["id"],"cardinality":"lots","parent_table":"b","parent_columns":["id"],"def":""}
        ]}"#;
        match decode(json) {
            Err(CodecError::InvalidCardinality(token)) => assert_eq!(token, "lots"),
            other => panic!("expected InvalidCardinality, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode("{\"tables\": 3}"), Err(CodecError::Json(_))));
    }
}
