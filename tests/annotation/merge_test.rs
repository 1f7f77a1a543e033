#[cfg(test)]
mod tests {
    use schemadoc::annotation::{merge_annotations, AnnotationError, Annotations};
    use schemadoc::config::Config;
    use schemadoc::schema::{Cardinality, Column, Constraint, Index, Table, Trigger};
    use schemadoc::Schema;
    use std::path::PathBuf;

    fn testdata(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/testdata")
            .join(name)
    }

    fn annotations() -> Annotations {
        std::env::set_var("SCHEMADOC_TEST_PG_PASS", "pgpass");
        std::env::set_var("SCHEMADOC_TEST_DOC_PATH", "sample/pg");
        Config::from_file(testdata("schemadoc_test.toml"))
            .unwrap()
            .annotations
    }

    fn schema() -> Schema {
        Schema::with_tables(
            "testschema",
            vec![
                Table::new("users")
                    .with_comment("users comment")
                    .with_column(Column::new("id", "serial"))
                    .with_column(Column::new("username", "text"))
                    .with_index(Index::new("user_index"))
                    .with_constraint(Constraint::new("PRIMARY")),
                Table::new("posts")
                    .with_comment("posts comment")
                    .with_column(Column::new("id", "serial"))
                    .with_column(Column::new("user_id", "int"))
                    .with_column(Column::new("title", "text"))
                    .with_trigger(Trigger::new("update_posts_title")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_merge_additional_data() {
        let mut s = schema();
        merge_annotations(&mut s, &annotations()).unwrap();

        assert_eq!(s.relations().len(), 1);
        assert_eq!(s.name, "mydatabase");

        let users = s.find_table("users").unwrap();
        let posts = s.find_table("posts").unwrap();

        let title = posts.find_column("title").unwrap();
        assert_eq!(title.comment, "post title");
        assert_eq!(title.labels.len(), 2);
        assert_eq!(posts.comment, "Blog posts");

        assert_eq!(users.find_index("user_index").unwrap().comment, "user index");
        assert_eq!(users.find_constraint("PRIMARY").unwrap().comment, "PRIMARY(id)");
        assert_eq!(
            posts.find_trigger("update_posts_title").unwrap().comment,
            "update posts title"
        );
        assert!(users.labels.contains("private"));
    }

    #[test]
    fn test_declared_relation_wiring() {
        let mut s = schema();
        merge_annotations(&mut s, &annotations()).unwrap();

        let relation = &s.relations()[0];
        assert_eq!(relation.def, "posts->users");
        assert_eq!(relation.cardinality, Cardinality::ZeroOrMore);
        assert_eq!(relation.parent_cardinality, Cardinality::ExactlyOne);
        assert!(!relation.is_virtual);

        let posts = s.find_table("posts").unwrap();
        assert_eq!(posts.find_column("user_id").unwrap().parent_relations(), &[0]);
        let users = s.find_table("users").unwrap();
        assert_eq!(users.find_column("id").unwrap().child_relations(), &[0]);
    }

    #[test]
    fn test_merge_is_label_idempotent() {
        let mut s = schema();
        let a = annotations();
        merge_annotations(&mut s, &a).unwrap();
        let labels = s.find_table("posts").unwrap().find_column("title").unwrap().labels.clone();

        let relabel = Annotations {
            comments: a.comments.clone(),
            ..Annotations::default()
        };
        merge_annotations(&mut s, &relabel).unwrap();
        let title = s.find_table("posts").unwrap().find_column("title").unwrap();
        assert_eq!(title.labels, labels);
    }

    #[test]
    fn test_relation_to_missing_table_is_fatal() {
        let mut s = schema();
        let mut a = annotations();
        a.relations[0].parent_table = "accounts".to_string();

        let err = merge_annotations(&mut s, &a).unwrap_err();
        assert!(matches!(err, AnnotationError::UnresolvedTable(ref t) if t == "accounts"));
        assert!(s.relations().is_empty());
    }
}
