//! Input boundary tests
//!
//! Malformed JSON, unknown discriminants, null handling and the
//! bare-number passthrough.

use pg_deparse::{deparse_json, Error};

mod unknown_kinds {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn top_level_unknown_kind() {
        let result = deparse_json(r#"[{"InsertStmt": {"relation": null}}]"#);
        match result {
            Err(Error::UnknownNodeKind { kind, .. }) => assert_eq!(kind, "InsertStmt"),
            other => panic!("expected UnknownNodeKind, got {other:?}"),
        }
    }

    #[test]
    fn nested_unknown_kind() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {"val": {"Bogus": {"x": 1}}}}]
        }}]"#;
        match deparse_json(tree) {
            Err(Error::UnknownNodeKind { kind, payload }) => {
                assert_eq!(kind, "Bogus");
                assert!(payload.contains("\"x\""));
            }
            other => panic!("expected UnknownNodeKind, got {other:?}"),
        }
    }
}

mod malformed_input {
    use super::*;

    #[test]
    fn invalid_json() {
        assert!(matches!(
            deparse_json("not json"),
            Err(Error::InvalidJson(_))
        ));
    }

    #[test]
    fn tree_must_be_an_array() {
        assert!(matches!(
            deparse_json(r#"{"SelectStmt": {}}"#),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn node_must_have_one_discriminant() {
        assert!(matches!(
            deparse_json(r#"[{"SelectStmt": {}, "Extra": {}}]"#),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn node_must_be_an_object() {
        assert!(matches!(
            deparse_json(r#"["select"]"#),
            Err(Error::MalformedNode { .. })
        ));
    }

    #[test]
    fn missing_required_field() {
        assert!(matches!(
            deparse_json(r#"[{"VariableShowStmt": {}}]"#),
            Err(Error::MalformedNode { .. })
        ));
    }
}

mod defaults {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_fields_are_treated_as_absent() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {
                "name": null,
                "val": {"A_Const": {"val": {"Integer": {"ival": 1}}}}
            }}],
            "fromClause": null,
            "whereClause": null
        }}]"#;
        assert_eq!(deparse_json(tree).unwrap(), "SELECT 1");
    }

    #[test]
    fn absent_integer_code_defaults_to_zero() {
        // no sortby_dir means no direction keyword
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {"val": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}}}],
            "fromClause": [{"RangeVar": {"relname": "t"}}],
            "sortClause": [{"SortBy": {"node": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}}}]
        }}]"#;
        assert_eq!(
            deparse_json(tree).unwrap(),
            "SELECT \"a\" FROM \"t\" ORDER BY \"a\""
        );
    }

    #[test]
    fn bare_number_passes_through() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {"val": {"A_Const": {"val": 3}}}}]
        }}]"#;
        assert_eq!(deparse_json(tree).unwrap(), "SELECT 3");
    }
}

mod output_shape {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn statements_are_separated_by_a_blank_line() {
        let tree = r#"[
            {"VariableShowStmt": {"name": "search_path"}},
            {"VariableShowStmt": {"name": "all"}}
        ]"#;
        assert_eq!(
            deparse_json(tree).unwrap(),
            "SHOW search_path\n\nSHOW all"
        );
    }

    #[test]
    fn deparsing_is_deterministic() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [
                {"ResTarget": {"val": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}}},
                {"ResTarget": {"val": {"ColumnRef": {"fields": [{"String": {"str": "b"}}]}}}}
            ],
            "fromClause": [{"RangeVar": {"relname": "t"}}]
        }}]"#;
        assert_eq!(deparse_json(tree).unwrap(), deparse_json(tree).unwrap());
    }

    #[test]
    fn empty_tree_renders_nothing() {
        assert_eq!(deparse_json("[]").unwrap(), "");
    }
}
