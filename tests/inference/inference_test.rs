#[cfg(test)]
mod tests {
    use schemadoc::inference::{
        infer_relations, select_naming_strategy, NamingError, DETECTED_RELATION_DEF,
    };
    use schemadoc::schema::{Column, Relation, Table};
    use schemadoc::Schema;

    fn schema(post_key: &str) -> Schema {
        Schema::with_tables(
            "testschema",
            vec![
                Table::new("users")
                    .with_comment("users comment")
                    .with_column(Column::new("id", "serial"))
                    .with_column(Column::new("username", "text")),
                Table::new("posts")
                    .with_comment("posts comment")
                    .with_column(Column::new("id", "serial"))
                    .with_column(Column::new(post_key, "int"))
                    .with_column(Column::new("title", "text")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_detect_relation_succeeds() {
        let mut s = schema("user_id");
        let strategy = select_naming_strategy("default").unwrap();
        assert_eq!(infer_relations(&mut s, strategy), 1);

        let mut expected = schema("user_id");
        let parent_name = strategy.parent_table_name("user_id").unwrap();
        let parent = expected.table_position(&parent_name).unwrap();
        let parent_column = expected.tables()[parent]
            .column_position(&strategy.parent_column_name(&parent_name))
            .unwrap();
        expected
            .add_relation(
                Relation::new(1, vec![1], parent, vec![parent_column])
                    .with_def(DETECTED_RELATION_DEF)
                    .with_virtual(true),
            )
            .unwrap();

        assert_eq!(s, expected);
    }

    #[test]
    fn test_detect_relation_fails_on_unconventional_name() {
        let mut s = schema("uid");
        let strategy = select_naming_strategy("default").unwrap();
        assert_eq!(infer_relations(&mut s, strategy), 0);
        assert!(s.relations().is_empty());
    }

    #[test]
    fn test_singular_table_names() {
        let mut s = Schema::with_tables(
            "s",
            vec![
                Table::new("user").with_column(Column::new("id", "int")),
                Table::new("post")
                    .with_column(Column::new("id", "int"))
                    .with_column(Column::new("user_id", "int")),
            ],
        )
        .unwrap();

        assert_eq!(infer_relations(&mut s, select_naming_strategy("default").unwrap()), 0);
        assert_eq!(
            infer_relations(&mut s, select_naming_strategy("singular_table_name").unwrap()),
            1
        );
        assert_eq!(s.relations()[0].parent_table, 0);
    }

    #[test]
    fn test_many_children_one_parent() {
        let mut s = Schema::with_tables(
            "s",
            vec![
                Table::new("users").with_column(Column::new("id", "int")),
                Table::new("posts")
                    .with_column(Column::new("id", "int"))
                    .with_column(Column::new("user_id", "int")),
                Table::new("comments")
                    .with_column(Column::new("id", "int"))
                    .with_column(Column::new("post_id", "int"))
                    .with_column(Column::new("user_id", "int")),
            ],
        )
        .unwrap();

        assert_eq!(infer_relations(&mut s, select_naming_strategy("default").unwrap()), 3);

        let users = s.find_table("users").unwrap();
        assert_eq!(users.find_column("id").unwrap().child_relations().len(), 2);
        let mut referenced: Vec<&str> = s.referenced_tables(users).map(|t| t.name.as_str()).collect();
        referenced.sort_unstable();
        assert_eq!(referenced, vec!["comments", "posts"]);
        assert!(s.relations().iter().all(|r| r.is_virtual));
    }

    #[test]
    fn test_unknown_strategy_is_an_error() {
        let err = select_naming_strategy("hungarian").unwrap_err();
        assert!(matches!(err, NamingError::UnknownStrategy(name) if name == "hungarian"));
    }
}
