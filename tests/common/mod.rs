//! Shared tree builders for deparser tests
#![allow(dead_code)]

use pg_deparse::ast::*;
use pg_deparse::Node;

pub fn string(s: &str) -> Node {
    Node::String(StringNode { str: s.into() })
}

pub fn int_const(ival: i64) -> Node {
    Node::AConst(AConst {
        val: Box::new(Node::Integer(Integer { ival })),
    })
}

pub fn string_const(s: &str) -> Node {
    Node::AConst(AConst {
        val: Box::new(string(s)),
    })
}

pub fn column(name: &str) -> Node {
    Node::ColumnRef(ColumnRef {
        fields: vec![string(name)],
    })
}

pub fn target(val: Node) -> Node {
    Node::ResTarget(ResTarget {
        name: None,
        val: Some(Box::new(val)),
    })
}

pub fn binop(op: &str, lexpr: Node, rexpr: Node) -> Node {
    Node::AExpr(AExpr {
        kind: 0,
        name: vec![string(op)],
        lexpr: Some(Box::new(lexpr)),
        rexpr: Some(NodeOrList::Node(Box::new(rexpr))),
    })
}

pub fn eq(lexpr: Node, rexpr: Node) -> Node {
    binop("=", lexpr, rexpr)
}

/// A SELECT with every clause empty; tests fill in what they exercise.
pub fn empty_select() -> SelectStmt {
    SelectStmt {
        with_clause: None,
        op: 0,
        all: false,
        larg: None,
        rarg: None,
        distinct_clause: None,
        target_list: None,
        into_clause: None,
        from_clause: None,
        where_clause: None,
        values_lists: None,
        group_clause: None,
        having_clause: None,
        window_clause: None,
        sort_clause: None,
        limit_count: None,
        limit_offset: None,
        locking_clause: None,
    }
}

/// `SELECT <n>` as a statement node, for set-operation and subquery tests.
pub fn select_literal(ival: i64) -> Node {
    Node::SelectStmt(SelectStmt {
        target_list: Some(vec![target(int_const(ival))]),
        ..empty_select()
    })
}

/// A window definition with no clauses set.
pub fn empty_window() -> WindowDef {
    WindowDef {
        name: None,
        refname: None,
        partition_clause: None,
        order_clause: None,
        frame_options: 0,
        start_offset: None,
        end_offset: None,
    }
}
