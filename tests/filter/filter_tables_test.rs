#[cfg(test)]
mod tests {
    use schemadoc::filter::{filter_tables, TableFilter};
    use schemadoc::snapshot::read_snapshot;
    use schemadoc::Schema;
    use std::path::PathBuf;

    fn fixture() -> Schema {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/filter_tables.json");
        read_snapshot(path).unwrap()
    }

    struct Case {
        include: &'static [&'static str],
        exclude: &'static [&'static str],
        labels: &'static [&'static str],
        distance: usize,
        tables: usize,
        relations: usize,
    }

    const fn case(
        include: &'static [&'static str],
        exclude: &'static [&'static str],
        labels: &'static [&'static str],
        distance: usize,
        tables: usize,
        relations: usize,
    ) -> Case {
        Case {
            include,
            exclude,
            labels,
            distance,
            tables,
            relations,
        }
    }

    const CASES: &[Case] = &[
        case(&[], &[], &[], 0, 5, 3),
        case(&[], &["schema_migrations"], &[], 0, 4, 3),
        case(&[], &["users"], &[], 0, 4, 1),
        case(&["users"], &[], &[], 0, 1, 0),
        case(&["user*"], &[], &[], 0, 2, 1),
        case(&["*options"], &[], &[], 0, 1, 0),
        case(&["*"], &["user_options"], &[], 0, 4, 2),
        case(&["not_exist"], &[], &[], 0, 0, 0),
        case(&["not_exist", "*"], &[], &[], 0, 5, 3),
        case(&["users"], &["*"], &[], 0, 1, 0),
        case(&["use*"], &["use*"], &[], 0, 2, 1),
        case(&["use*"], &["user*"], &[], 0, 0, 0),
        case(&["user*"], &["user_*"], &[], 0, 1, 0),
        case(&["*", "user*"], &["user_*"], &[], 0, 4, 2),
        // distance
        case(&["users"], &[], &[], 1, 3, 2),
        case(&["user_options"], &[], &[], 1, 2, 1),
        case(&["user_options"], &[], &[], 2, 3, 2),
        case(&["user_options"], &[], &[], 3, 4, 3),
        case(&[], &[], &[], 9, 5, 3),
        case(&["posts"], &[], &[], 9, 4, 3),
        case(&[""], &["*"], &[], 9, 0, 0),
        // labels
        case(&[], &[], &["private"], 0, 2, 1),
        case(&[], &[], &["option"], 0, 2, 0),
        case(&[], &[], &["public", "private"], 0, 4, 3),
        case(&[], &["users"], &["private"], 0, 1, 0),
        case(&[], &["user*"], &["option"], 0, 1, 0),
        case(&["users"], &[], &["private"], 0, 2, 1),
    ];

    #[test]
    fn test_filter_tables_acceptance() {
        for (i, c) in CASES.iter().enumerate() {
            let mut schema = fixture();
            filter_tables(&mut schema, c.include, c.exclude, c.labels, c.distance).unwrap();

            assert_eq!(
                schema.tables().len(),
                c.tables,
                "case {}: include={:?} exclude={:?} labels={:?} distance={}",
                i,
                c.include,
                c.exclude,
                c.labels,
                c.distance
            );
            assert_eq!(
                schema.relations().len(),
                c.relations,
                "case {}: include={:?} exclude={:?} labels={:?} distance={}",
                i,
                c.include,
                c.exclude,
                c.labels,
                c.distance
            );
        }
    }

    #[test]
    fn test_back_references_follow_pruning() {
        let mut schema = fixture();
        filter_tables(&mut schema, &["posts", "comments"], &[], &[], 0).unwrap();

        let posts = schema.find_table("posts").unwrap();
        let user_id = posts.find_column("user_id").unwrap();
        assert!(user_id.parent_relations().is_empty());

        let id = posts.find_column("id").unwrap();
        assert_eq!(id.child_relations().len(), 1);
        let relation = &schema.relations()[id.child_relations()[0]];
        assert_eq!(schema.relation_table(relation).name, "comments");

        let referenced: Vec<&str> = schema
            .referenced_tables(posts)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(referenced, vec!["comments"]);
    }

    #[test]
    fn test_survivors_keep_schema_order() {
        let mut schema = fixture();
        filter_tables(&mut schema, &["comments", "users"], &[], &[], 0).unwrap();
        let names: Vec<&str> = schema.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["users", "comments"]);
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let schema = fixture();
        let plan = TableFilter::new()
            .include(["users"])
            .distance(1)
            .plan(&schema)
            .unwrap();

        assert_eq!(plan.tables.len(), 3);
        assert_eq!(schema.tables().len(), 5);
        assert_eq!(schema.relations().len(), 3);
    }

    #[test]
    fn test_excluded_table_breaks_expansion_path() {
        // users is the only link between user_options and posts.
        let mut schema = fixture();
        filter_tables(&mut schema, &["user_options"], &["users"], &[], 9).unwrap();
        let names: Vec<&str> = schema.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["user_options"]);
    }
}
