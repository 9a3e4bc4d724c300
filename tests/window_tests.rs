//! Window definition and frame clause tests

use pg_deparse::ast::*;
use pg_deparse::{deparse_json, deparse_node, Context, Node};

mod common;
use common::*;

fn over(def: WindowDef) -> String {
    deparse_node(&Node::WindowDef(def), Context::None).unwrap()
}

mod over_clauses {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_window_is_bare_parens() {
        assert_eq!(over(empty_window()), "()");
    }

    #[test]
    fn named_reference_stands_alone() {
        let def = WindowDef {
            name: Some("w".into()),
            ..empty_window()
        };
        assert_eq!(over(def), "w");
    }

    #[test]
    fn partition_by() {
        let def = WindowDef {
            partition_clause: Some(vec![column("a")]),
            ..empty_window()
        };
        assert_eq!(over(def), "(PARTITION BY \"a\")");
    }

    #[test]
    fn partition_and_order() {
        let def = WindowDef {
            partition_clause: Some(vec![column("a")]),
            order_clause: Some(vec![Node::SortBy(SortBy {
                node: Box::new(column("b")),
                sortby_dir: 2,
                sortby_nulls: 0,
                use_op: None,
            })]),
            ..empty_window()
        };
        assert_eq!(over(def), "(PARTITION BY \"a\" ORDER BY \"b\" DESC)");
    }
}

mod frames {
    use super::*;
    use pretty_assertions::assert_eq;

    // bit names: 0x1 nondefault, 0x2 range, 0x4 rows, 0x8 between,
    // 0x10/0x100/0x400 start bounds, 0x200/0x2000 end bounds

    #[test]
    fn rows_unbounded_preceding() {
        let def = WindowDef {
            frame_options: 0x1 | 0x4 | 0x10,
            ..empty_window()
        };
        assert_eq!(over(def), "(ROWS UNBOUNDED PRECEDING)");
    }

    #[test]
    fn range_between_unbounded_and_current_row() {
        let def = WindowDef {
            frame_options: 0x1 | 0x2 | 0x8 | 0x10 | 0x200,
            ..empty_window()
        };
        assert_eq!(
            over(def),
            "(RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)"
        );
    }

    #[test]
    fn rows_between_value_offsets() {
        let def = WindowDef {
            frame_options: 0x1 | 0x4 | 0x8 | 0x400 | 0x2000,
            start_offset: Some(Box::new(int_const(1))),
            end_offset: Some(Box::new(int_const(2))),
            ..empty_window()
        };
        assert_eq!(over(def), "(ROWS BETWEEN 1 PRECEDING AND 2 FOLLOWING)");
    }

    #[test]
    fn default_frame_is_omitted() {
        let def = WindowDef {
            frame_options: 0,
            order_clause: Some(vec![Node::SortBy(SortBy {
                node: Box::new(column("a")),
                sortby_dir: 0,
                sortby_nulls: 0,
                use_op: None,
            })]),
            ..empty_window()
        };
        assert_eq!(over(def), "(ORDER BY \"a\")");
    }
}

mod window_clauses {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn named_window_in_select() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {"val": {"FuncCall": {
                "funcname": [{"String": {"str": "rank"}}],
                "over": {"WindowDef": {"name": "w"}}
            }}}}],
            "fromClause": [{"RangeVar": {"relname": "t"}}],
            "windowClause": [{"WindowDef": {
                "name": "w",
                "orderClause": [{"SortBy": {
                    "node": {"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}
                }}]
            }}]
        }}]"#;
        assert_eq!(
            deparse_json(tree).unwrap(),
            "SELECT rank() OVER w FROM \"t\" WINDOW \"w\" AS (ORDER BY \"a\")"
        );
    }

    #[test]
    fn inline_over_with_partition() {
        let tree = r#"[{"SelectStmt": {
            "targetList": [{"ResTarget": {"val": {"FuncCall": {
                "funcname": [{"String": {"str": "sum"}}],
                "args": [{"ColumnRef": {"fields": [{"String": {"str": "a"}}]}}],
                "over": {"WindowDef": {
                    "partitionClause": [{"ColumnRef": {"fields": [{"String": {"str": "b"}}]}}]
                }}
            }}}}],
            "fromClause": [{"RangeVar": {"relname": "t"}}]
        }}]"#;
        assert_eq!(
            deparse_json(tree).unwrap(),
            "SELECT sum(\"a\") OVER (PARTITION BY \"b\") FROM \"t\""
        );
    }
}
