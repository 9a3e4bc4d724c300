//! FROM-clause item tests
//!
//! Table references, joins, subqueries, set-returning functions and
//! TABLESAMPLE.

use pg_deparse::deparse_json;

fn sql(tree: &str) -> String {
    deparse_json(tree).unwrap()
}

fn select_star_from(item: &str) -> String {
    format!(
        r#"[{{"SelectStmt": {{
            "targetList": [{{"ResTarget": {{"val": {{"ColumnRef": {{"fields": [{{"A_Star": {{}}}}]}}}}}}}}],
            "fromClause": [{item}]
        }}}}]"#
    )
}

mod tables {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_table() {
        let tree = select_star_from(r#"{"RangeVar": {"relname": "t"}}"#);
        assert_eq!(sql(&tree), "SELECT * FROM \"t\"");
    }

    #[test]
    fn schema_qualified() {
        let tree = select_star_from(r#"{"RangeVar": {"schemaname": "s", "relname": "t"}}"#);
        assert_eq!(sql(&tree), "SELECT * FROM \"s\".\"t\"");
    }

    #[test]
    fn only_suppresses_inheritance() {
        let tree = select_star_from(r#"{"RangeVar": {"inhOpt": 0, "relname": "t"}}"#);
        assert_eq!(sql(&tree), "SELECT * FROM ONLY \"t\"");
    }

    #[test]
    fn table_alias() {
        let tree = select_star_from(
            r#"{"RangeVar": {"relname": "t", "alias": {"Alias": {"aliasname": "x"}}}}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM \"t\" AS \"x\"");
    }

    #[test]
    fn alias_with_column_names() {
        let tree = select_star_from(
            r#"{"RangeVar": {"relname": "t", "alias": {"Alias": {
                "aliasname": "x",
                "colnames": [{"String": {"str": "a"}}, {"String": {"str": "b"}}]
            }}}}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM \"t\" AS x(a, b)");
    }
}

mod joins {
    use super::*;
    use pretty_assertions::assert_eq;

    fn join(body: &str) -> String {
        select_star_from(&format!(
            r#"{{"JoinExpr": {{
                "larg": {{"RangeVar": {{"relname": "t1"}}}},
                "rarg": {{"RangeVar": {{"relname": "t2"}}}},
                {body}
            }}}}"#
        ))
    }

    #[test]
    fn inner_join_on() {
        let tree = join(
            r#""jointype": 0,
               "quals": {"A_Expr": {
                   "kind": 0,
                   "name": [{"String": {"str": "="}}],
                   "lexpr": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}},
                   "rexpr": {"ColumnRef": {"fields": [{"String": {"str": "b"}}]}}
               }}"#,
        );
        assert_eq!(
            sql(&tree),
            "SELECT * FROM \"t1\" INNER JOIN \"t2\" ON ((\"a\") = (\"b\"))"
        );
    }

    #[test]
    fn cross_join() {
        let tree = join(r#""jointype": 0"#);
        assert_eq!(sql(&tree), "SELECT * FROM \"t1\" CROSS JOIN \"t2\"");
    }

    #[test]
    fn natural_join() {
        let tree = join(r#""jointype": 0, "isNatural": true"#);
        assert_eq!(sql(&tree), "SELECT * FROM \"t1\" NATURAL JOIN \"t2\"");
    }

    #[test]
    fn left_outer_join_using() {
        let tree = join(r#""jointype": 1, "usingClause": [{"String": {"str": "a"}}]"#);
        assert_eq!(
            sql(&tree),
            "SELECT * FROM \"t1\" LEFT OUTER JOIN \"t2\" USING (\"a\")"
        );
    }

    #[test]
    fn full_outer_join_using() {
        let tree = join(r#""jointype": 2, "usingClause": [{"String": {"str": "a"}}]"#);
        assert_eq!(
            sql(&tree),
            "SELECT * FROM \"t1\" FULL OUTER JOIN \"t2\" USING (\"a\")"
        );
    }

    #[test]
    fn nested_join_is_parenthesized() {
        let tree = select_star_from(
            r#"{"JoinExpr": {
                "jointype": 0,
                "larg": {"RangeVar": {"relname": "t1"}},
                "rarg": {"JoinExpr": {
                    "jointype": 0,
                    "larg": {"RangeVar": {"relname": "t2"}},
                    "rarg": {"RangeVar": {"relname": "t3"}},
                    "usingClause": [{"String": {"str": "b"}}]
                }},
                "usingClause": [{"String": {"str": "a"}}]
            }}"#,
        );
        assert_eq!(
            sql(&tree),
            "SELECT * FROM (\"t1\" JOIN (\"t2\" JOIN \"t3\" USING (\"b\")) USING (\"a\"))"
        );
    }

    #[test]
    fn unknown_join_type_is_rejected() {
        let tree = join(r#""jointype": 9"#);
        assert!(deparse_json(&tree).is_err());
    }
}

mod subqueries {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_table() {
        let tree = select_star_from(
            r#"{"RangeSubselect": {
                "subquery": {"SelectStmt": {"targetList": [{"ResTarget": {"val": {"A_Const": {"val": {"Integer": {"ival": 1}}}}}}]}},
                "alias": {"Alias": {"aliasname": "x"}}
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM (SELECT 1) AS \"x\"");
    }

    #[test]
    fn lateral_subquery() {
        let tree = select_star_from(
            r#"{"RangeSubselect": {
                "lateral": true,
                "subquery": {"SelectStmt": {"targetList": [{"ResTarget": {"val": {"A_Const": {"val": {"Integer": {"ival": 1}}}}}}]}},
                "alias": {"Alias": {"aliasname": "x"}}
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM LATERAL (SELECT 1) AS \"x\"");
    }
}

mod functions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_returning_function() {
        let tree = select_star_from(
            r#"{"RangeFunction": {
                "functions": [[{"FuncCall": {
                    "funcname": [{"String": {"str": "unnest"}}],
                    "args": [{"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}]
                }}, null]],
                "alias": {"Alias": {"aliasname": "u"}}
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM unnest(\"a\") AS \"u\"");
    }

    #[test]
    fn with_ordinality() {
        let tree = select_star_from(
            r#"{"RangeFunction": {
                "functions": [[{"FuncCall": {
                    "funcname": [{"String": {"str": "unnest"}}],
                    "args": [{"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}]
                }}, null]],
                "ordinality": true
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM unnest(\"a\") WITH ORDINALITY");
    }

    #[test]
    fn rows_from() {
        let tree = select_star_from(
            r#"{"RangeFunction": {
                "is_rowsfrom": true,
                "functions": [
                    [{"FuncCall": {"funcname": [{"String": {"str": "f"}}]}}, null],
                    [{"FuncCall": {"funcname": [{"String": {"str": "g"}}]}}, null]
                ]
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM ROWS FROM (f(), g())");
    }

    #[test]
    fn column_definition_list() {
        let tree = select_star_from(
            r#"{"RangeFunction": {
                "functions": [[{"FuncCall": {"funcname": [{"String": {"str": "f"}}]}}, null]],
                "coldeflist": [{"ColumnDef": {
                    "colname": "n",
                    "typeName": {"TypeName": {"names": [
                        {"String": {"str": "pg_catalog"}}, {"String": {"str": "int4"}}
                    ]}}
                }}]
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM f() AS (\"n\" int)");
    }
}

mod table_sampling {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bernoulli_sample() {
        let tree = select_star_from(
            r#"{"RangeTableSample": {
                "relation": {"RangeVar": {"relname": "t"}},
                "method": [{"String": {"str": "bernoulli"}}],
                "args": [{"A_Const": {"val": {"Integer": {"ival": 10}}}}]
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM \"t\" TABLESAMPLE bernoulli (10)");
    }

    #[test]
    fn repeatable_seed() {
        let tree = select_star_from(
            r#"{"RangeTableSample": {
                "relation": {"RangeVar": {"relname": "t"}},
                "method": [{"String": {"str": "system"}}],
                "args": [{"A_Const": {"val": {"Integer": {"ival": 10}}}}],
                "repeatable": {"A_Const": {"val": {"Integer": {"ival": 42}}}}
            }}"#,
        );
        assert_eq!(
            sql(&tree),
            "SELECT * FROM \"t\" TABLESAMPLE system (10) REPEATABLE(42)"
        );
    }

    #[test]
    fn method_without_arguments_has_no_parens() {
        let tree = select_star_from(
            r#"{"RangeTableSample": {
                "relation": {"RangeVar": {"relname": "t"}},
                "method": [{"String": {"str": "system"}}]
            }}"#,
        );
        assert_eq!(sql(&tree), "SELECT * FROM \"t\" TABLESAMPLE system");
    }
}
