//! Decoding of the parser's JSON parse tree into typed nodes
//!
//! The external parser emits each node as a single-key object
//! `{"Kind": {...payload...}}`. This module is the input boundary: it maps
//! that shape onto the `Node` tagged union, treats `null` slots as absent,
//! passes bare numbers through as `Node::Scalar`, and rejects any
//! discriminant without a registered formatter — at any depth — with
//! `Error::UnknownNodeKind`.

use serde_json::{Map, Value};

use crate::ast::*;
use crate::error::{Error, Result};

/// Decode a full parse tree (a JSON array of statement nodes) from text.
pub fn tree_from_json(input: &str) -> Result<Vec<Node>> {
    let value: Value = serde_json::from_str(input)?;
    tree(&value)
}

/// Decode a full parse tree from an already-parsed JSON value.
pub fn tree(value: &Value) -> Result<Vec<Node>> {
    match value {
        Value::Array(items) => items.iter().map(node).collect(),
        _ => Err(Error::MalformedNode {
            kind: "tree",
            message: "expected a JSON array of statement nodes".into(),
        }),
    }
}

/// Decode a single node.
pub fn node(value: &Value) -> Result<Node> {
    if let Value::Number(n) = value {
        return Ok(Node::Scalar(n.clone()));
    }

    let Value::Object(map) = value else {
        return Err(Error::MalformedNode {
            kind: "node",
            message: format!("expected a tagged object, got: {value}"),
        });
    };
    let mut entries = map.iter();
    let (Some((kind, payload)), None) = (entries.next(), entries.next()) else {
        return Err(Error::MalformedNode {
            kind: "node",
            message: format!("expected exactly one discriminant key, got: {value}"),
        });
    };

    match kind.as_str() {
        "A_Expr" => a_expr(fields(payload, "A_Expr")?),
        "Alias" => alias(fields(payload, "Alias")?),
        "A_ArrayExpr" => a_array_expr(fields(payload, "A_ArrayExpr")?),
        "A_Const" => a_const(fields(payload, "A_Const")?),
        "A_Indices" => a_indices(fields(payload, "A_Indices")?),
        "A_Indirection" => a_indirection(fields(payload, "A_Indirection")?),
        "A_Star" => Ok(Node::AStar),
        "BitString" => bit_string(fields(payload, "BitString")?),
        "BoolExpr" => bool_expr(fields(payload, "BoolExpr")?),
        "BooleanTest" => boolean_test(fields(payload, "BooleanTest")?),
        "CaseExpr" => case_expr(fields(payload, "CaseExpr")?),
        "CaseWhen" => case_when(fields(payload, "CaseWhen")?),
        "CoalesceExpr" => coalesce_expr(fields(payload, "CoalesceExpr")?),
        "CollateClause" => collate_clause(fields(payload, "CollateClause")?),
        "ColumnDef" => column_def(fields(payload, "ColumnDef")?),
        "ColumnRef" => column_ref(fields(payload, "ColumnRef")?),
        "CommonTableExpr" => common_table_expr(fields(payload, "CommonTableExpr")?),
        "DefElem" => def_elem(fields(payload, "DefElem")?),
        "Float" => float(fields(payload, "Float")?),
        "FuncCall" => func_call(fields(payload, "FuncCall")?),
        "GroupingFunc" => grouping_func(fields(payload, "GroupingFunc")?),
        "GroupingSet" => grouping_set(fields(payload, "GroupingSet")?),
        "Integer" => integer(fields(payload, "Integer")?),
        "IntoClause" => into_clause(fields(payload, "IntoClause")?),
        "JoinExpr" => join_expr(fields(payload, "JoinExpr")?),
        "LockingClause" => locking_clause(fields(payload, "LockingClause")?),
        "MinMaxExpr" => min_max_expr(fields(payload, "MinMaxExpr")?),
        "NamedArgExpr" => named_arg_expr(fields(payload, "NamedArgExpr")?),
        "Null" => Ok(Node::Null),
        "NullTest" => null_test(fields(payload, "NullTest")?),
        "ParamRef" => param_ref(fields(payload, "ParamRef")?),
        "RangeFunction" => range_function(fields(payload, "RangeFunction")?),
        "RangeSubselect" => range_subselect(fields(payload, "RangeSubselect")?),
        "RangeTableSample" => range_table_sample(fields(payload, "RangeTableSample")?),
        "RangeVar" => range_var(fields(payload, "RangeVar")?),
        "ResTarget" => res_target(fields(payload, "ResTarget")?),
        "RowExpr" => row_expr(fields(payload, "RowExpr")?),
        "SelectStmt" => select_stmt(fields(payload, "SelectStmt")?),
        "SortBy" => sort_by(fields(payload, "SortBy")?),
        "String" => string_node(fields(payload, "String")?),
        "SubLink" => sub_link(fields(payload, "SubLink")?),
        "TypeCast" => type_cast(fields(payload, "TypeCast")?),
        "TypeName" => type_name(fields(payload, "TypeName")?),
        "VariableSetStmt" => variable_set_stmt(fields(payload, "VariableSetStmt")?),
        "VariableShowStmt" => variable_show_stmt(fields(payload, "VariableShowStmt")?),
        "WindowDef" => window_def(fields(payload, "WindowDef")?),
        "WithClause" => with_clause(fields(payload, "WithClause")?),
        _ => Err(Error::UnknownNodeKind {
            kind: kind.clone(),
            payload: payload.to_string(),
        }),
    }
}

/// Field accessors over one node payload, with uniform error reporting
struct Fields<'a> {
    kind: &'static str,
    obj: &'a Map<String, Value>,
}

fn fields<'a>(payload: &'a Value, kind: &'static str) -> Result<Fields<'a>> {
    match payload {
        Value::Object(obj) => Ok(Fields { kind, obj }),
        _ => Err(Error::MalformedNode {
            kind,
            message: format!("payload is not an object: {payload}"),
        }),
    }
}

impl<'a> Fields<'a> {
    fn err(&self, message: String) -> Error {
        Error::MalformedNode {
            kind: self.kind,
            message,
        }
    }

    /// A present, non-null field. The parser omits empty/zero/false fields,
    /// so absence and `null` both mean "not there".
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn node(&self, key: &str) -> Result<Option<Box<Node>>> {
        self.get(key).map(|v| node(v).map(Box::new)).transpose()
    }

    fn req_node(&self, key: &str) -> Result<Box<Node>> {
        self.node(key)?
            .ok_or_else(|| self.err(format!("missing field {key:?}")))
    }

    fn node_seq(&self, value: &Value, key: &str) -> Result<Vec<Node>> {
        let items = value
            .as_array()
            .ok_or_else(|| self.err(format!("field {key:?} is not a list")))?;
        items.iter().map(node).collect()
    }

    fn nodes(&self, key: &str) -> Result<Option<Vec<Node>>> {
        self.get(key).map(|v| self.node_seq(v, key)).transpose()
    }

    fn nodes_or_empty(&self, key: &str) -> Result<Vec<Node>> {
        Ok(self.nodes(key)?.unwrap_or_default())
    }

    /// A node list that may contain null placeholders (DISTINCT's `[null]`).
    fn nullable_nodes(&self, key: &str) -> Result<Option<Vec<Option<Node>>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.err(format!("field {key:?} is not a list")))?;
        let decoded = items
            .iter()
            .map(|v| if v.is_null() { Ok(None) } else { node(v).map(Some) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(decoded))
    }

    /// A list of node lists (VALUES rows).
    fn node_lists(&self, key: &str) -> Result<Option<Vec<Vec<Node>>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let rows = value
            .as_array()
            .ok_or_else(|| self.err(format!("field {key:?} is not a list")))?;
        let decoded = rows
            .iter()
            .map(|row| self.node_seq(row, key))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(decoded))
    }

    /// A slot holding either a single node or a node list (`A_Expr.rexpr`).
    fn node_or_list(&self, key: &str) -> Result<Option<NodeOrList>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        match value {
            Value::Array(_) => Ok(Some(NodeOrList::List(self.node_seq(value, key)?))),
            _ => Ok(Some(NodeOrList::Node(Box::new(node(value)?)))),
        }
    }

    fn string(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
            .map(|v| {
                v.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| self.err(format!("field {key:?} is not a string")))
            })
            .transpose()
    }

    fn req_string(&self, key: &str) -> Result<String> {
        self.string(key)?
            .ok_or_else(|| self.err(format!("missing field {key:?}")))
    }

    /// An integer code field; absent means zero (the parser's default).
    fn int(&self, key: &str) -> Result<i64> {
        Ok(self.opt_int(key)?.unwrap_or(0))
    }

    fn opt_int(&self, key: &str) -> Result<Option<i64>> {
        self.get(key)
            .map(|v| {
                v.as_i64()
                    .ok_or_else(|| self.err(format!("field {key:?} is not an integer")))
            })
            .transpose()
    }

    /// A boolean flag; absent means false.
    fn boolean(&self, key: &str) -> Result<bool> {
        self.get(key)
            .map(|v| {
                v.as_bool()
                    .ok_or_else(|| self.err(format!("field {key:?} is not a boolean")))
            })
            .transpose()
            .map(|b| b.unwrap_or(false))
    }

    /// RangeFunction's `functions`: a list of `[call, coldeflist]` pairs.
    fn function_items(&self, key: &str) -> Result<Vec<(Node, Option<Vec<Node>>)>> {
        let Some(value) = self.get(key) else {
            return Ok(Vec::new());
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.err(format!("field {key:?} is not a list")))?;
        items
            .iter()
            .map(|item| {
                let pair = item
                    .as_array()
                    .ok_or_else(|| self.err(format!("field {key:?} items must be pairs")))?;
                let call = pair
                    .first()
                    .ok_or_else(|| self.err(format!("field {key:?} item is empty")))?;
                let defs = match pair.get(1) {
                    None | Some(Value::Null) => None,
                    Some(v) => Some(self.node_seq(v, key)?),
                };
                Ok((node(call)?, defs))
            })
            .collect()
    }
}

fn a_expr(f: Fields) -> Result<Node> {
    Ok(Node::AExpr(AExpr {
        kind: f.int("kind")? as i32,
        name: f.nodes_or_empty("name")?,
        lexpr: f.node("lexpr")?,
        rexpr: f.node_or_list("rexpr")?,
    }))
}

fn alias(f: Fields) -> Result<Node> {
    Ok(Node::Alias(Alias {
        aliasname: f.req_string("aliasname")?,
        colnames: f.nodes("colnames")?,
    }))
}

fn a_array_expr(f: Fields) -> Result<Node> {
    Ok(Node::AArrayExpr(AArrayExpr {
        elements: f.nodes("elements")?,
    }))
}

fn a_const(f: Fields) -> Result<Node> {
    Ok(Node::AConst(AConst {
        val: f.req_node("val")?,
    }))
}

fn a_indices(f: Fields) -> Result<Node> {
    Ok(Node::AIndices(AIndices {
        lidx: f.node("lidx")?,
        uidx: f.req_node("uidx")?,
    }))
}

fn a_indirection(f: Fields) -> Result<Node> {
    Ok(Node::AIndirection(AIndirection {
        arg: f.req_node("arg")?,
        indirection: f.nodes_or_empty("indirection")?,
    }))
}

fn bit_string(f: Fields) -> Result<Node> {
    Ok(Node::BitString(BitString {
        str: f.req_string("str")?,
    }))
}

fn bool_expr(f: Fields) -> Result<Node> {
    Ok(Node::BoolExpr(BoolExpr {
        boolop: f.int("boolop")? as i32,
        args: f.nodes_or_empty("args")?,
    }))
}

fn boolean_test(f: Fields) -> Result<Node> {
    Ok(Node::BooleanTest(BooleanTest {
        arg: f.req_node("arg")?,
        booltesttype: f.int("booltesttype")? as i32,
    }))
}

fn case_expr(f: Fields) -> Result<Node> {
    Ok(Node::CaseExpr(CaseExpr {
        arg: f.node("arg")?,
        args: f.nodes_or_empty("args")?,
        defresult: f.node("defresult")?,
    }))
}

fn case_when(f: Fields) -> Result<Node> {
    Ok(Node::CaseWhen(CaseWhen {
        expr: f.req_node("expr")?,
        result: f.req_node("result")?,
    }))
}

fn coalesce_expr(f: Fields) -> Result<Node> {
    Ok(Node::CoalesceExpr(CoalesceExpr {
        args: f.nodes_or_empty("args")?,
    }))
}

fn collate_clause(f: Fields) -> Result<Node> {
    Ok(Node::CollateClause(CollateClause {
        arg: f.node("arg")?,
        collname: f.nodes("collname")?,
    }))
}

fn column_def(f: Fields) -> Result<Node> {
    Ok(Node::ColumnDef(ColumnDef {
        colname: f.req_string("colname")?,
        type_name: f.req_node("typeName")?,
        raw_default: f.node("raw_default")?,
        constraints: f.nodes("constraints")?,
    }))
}

fn column_ref(f: Fields) -> Result<Node> {
    Ok(Node::ColumnRef(ColumnRef {
        fields: f.nodes_or_empty("fields")?,
    }))
}

fn common_table_expr(f: Fields) -> Result<Node> {
    Ok(Node::CommonTableExpr(CommonTableExpr {
        ctename: f.req_string("ctename")?,
        aliascolnames: f.nodes("aliascolnames")?,
        ctequery: f.req_node("ctequery")?,
    }))
}

fn def_elem(f: Fields) -> Result<Node> {
    Ok(Node::DefElem(DefElem {
        defname: f.req_string("defname")?,
        arg: f.req_node("arg")?,
    }))
}

fn float(f: Fields) -> Result<Node> {
    Ok(Node::Float(Float {
        str: f.req_string("str")?,
    }))
}

fn func_call(f: Fields) -> Result<Node> {
    Ok(Node::FuncCall(FuncCall {
        funcname: f.nodes_or_empty("funcname")?,
        args: f.nodes("args")?,
        agg_order: f.nodes("agg_order")?,
        agg_filter: f.node("agg_filter")?,
        agg_within_group: f.boolean("agg_within_group")?,
        agg_star: f.boolean("agg_star")?,
        agg_distinct: f.boolean("agg_distinct")?,
        func_variadic: f.boolean("func_variadic")?,
        over: f.node("over")?,
    }))
}

fn grouping_func(f: Fields) -> Result<Node> {
    Ok(Node::GroupingFunc(GroupingFunc {
        args: f.nodes_or_empty("args")?,
    }))
}

fn grouping_set(f: Fields) -> Result<Node> {
    Ok(Node::GroupingSet(GroupingSet {
        kind: f.int("kind")? as i32,
        content: f.nodes("content")?,
    }))
}

fn integer(f: Fields) -> Result<Node> {
    Ok(Node::Integer(Integer {
        ival: f.int("ival")?,
    }))
}

fn into_clause(f: Fields) -> Result<Node> {
    Ok(Node::IntoClause(IntoClause {
        rel: f.req_node("rel")?,
    }))
}

fn join_expr(f: Fields) -> Result<Node> {
    Ok(Node::JoinExpr(JoinExpr {
        jointype: f.int("jointype")? as i32,
        is_natural: f.boolean("isNatural")?,
        larg: f.req_node("larg")?,
        rarg: f.req_node("rarg")?,
        quals: f.node("quals")?,
        using_clause: f.nodes("usingClause")?,
        alias: f.node("alias")?,
    }))
}

fn locking_clause(f: Fields) -> Result<Node> {
    Ok(Node::LockingClause(LockingClause {
        strength: f.int("strength")? as i32,
        locked_rels: f.nodes("lockedRels")?,
    }))
}

fn min_max_expr(f: Fields) -> Result<Node> {
    Ok(Node::MinMaxExpr(MinMaxExpr {
        op: f.int("op")? as i32,
        args: f.nodes_or_empty("args")?,
    }))
}

fn named_arg_expr(f: Fields) -> Result<Node> {
    Ok(Node::NamedArgExpr(NamedArgExpr {
        name: f.req_string("name")?,
        arg: f.req_node("arg")?,
    }))
}

fn null_test(f: Fields) -> Result<Node> {
    Ok(Node::NullTest(NullTest {
        arg: f.req_node("arg")?,
        nulltesttype: f.int("nulltesttype")? as i32,
    }))
}

fn param_ref(f: Fields) -> Result<Node> {
    Ok(Node::ParamRef(ParamRef {
        number: f.opt_int("number")?.unwrap_or(-1) as i32,
    }))
}

fn range_function(f: Fields) -> Result<Node> {
    Ok(Node::RangeFunction(RangeFunction {
        lateral: f.boolean("lateral")?,
        functions: f.function_items("functions")?,
        is_rowsfrom: f.boolean("is_rowsfrom")?,
        ordinality: f.boolean("ordinality")?,
        alias: f.node("alias")?,
        coldeflist: f.nodes("coldeflist")?,
    }))
}

fn range_subselect(f: Fields) -> Result<Node> {
    Ok(Node::RangeSubselect(RangeSubselect {
        lateral: f.boolean("lateral")?,
        subquery: f.req_node("subquery")?,
        alias: f.node("alias")?,
    }))
}

fn range_table_sample(f: Fields) -> Result<Node> {
    Ok(Node::RangeTableSample(RangeTableSample {
        relation: f.req_node("relation")?,
        method: f.nodes_or_empty("method")?,
        args: f.nodes("args")?,
        repeatable: f.node("repeatable")?,
    }))
}

fn range_var(f: Fields) -> Result<Node> {
    Ok(Node::RangeVar(RangeVar {
        inh_opt: f.opt_int("inhOpt")?.map(|v| v as i32),
        relpersistence: f.string("relpersistence")?,
        schemaname: f.string("schemaname")?,
        relname: f.req_string("relname")?,
        alias: f.node("alias")?,
    }))
}

fn res_target(f: Fields) -> Result<Node> {
    Ok(Node::ResTarget(ResTarget {
        name: f.string("name")?,
        val: f.node("val")?,
    }))
}

fn row_expr(f: Fields) -> Result<Node> {
    Ok(Node::RowExpr(RowExpr {
        args: f.nodes("args")?,
        row_format: f.int("row_format")? as i32,
    }))
}

fn select_stmt(f: Fields) -> Result<Node> {
    Ok(Node::SelectStmt(SelectStmt {
        with_clause: f.node("withClause")?,
        op: f.int("op")? as i32,
        all: f.boolean("all")?,
        larg: f.node("larg")?,
        rarg: f.node("rarg")?,
        distinct_clause: f.nullable_nodes("distinctClause")?,
        target_list: f.nodes("targetList")?,
        into_clause: f.node("intoClause")?,
        from_clause: f.nodes("fromClause")?,
        where_clause: f.node("whereClause")?,
        values_lists: f.node_lists("valuesLists")?,
        group_clause: f.nodes("groupClause")?,
        having_clause: f.node("havingClause")?,
        window_clause: f.nodes("windowClause")?,
        sort_clause: f.nodes("sortClause")?,
        limit_count: f.node("limitCount")?,
        limit_offset: f.node("limitOffset")?,
        locking_clause: f.nodes("lockingClause")?,
    }))
}

fn sort_by(f: Fields) -> Result<Node> {
    Ok(Node::SortBy(SortBy {
        node: f.req_node("node")?,
        sortby_dir: f.int("sortby_dir")? as i32,
        sortby_nulls: f.int("sortby_nulls")? as i32,
        use_op: f.nodes("useOp")?,
    }))
}

fn string_node(f: Fields) -> Result<Node> {
    Ok(Node::String(StringNode {
        str: f.req_string("str")?,
    }))
}

fn sub_link(f: Fields) -> Result<Node> {
    Ok(Node::SubLink(SubLink {
        sub_link_type: f.int("subLinkType")? as i32,
        testexpr: f.node("testexpr")?,
        oper_name: f.nodes("operName")?,
        subselect: f.req_node("subselect")?,
    }))
}

fn type_cast(f: Fields) -> Result<Node> {
    Ok(Node::TypeCast(TypeCast {
        arg: f.req_node("arg")?,
        type_name: f.req_node("typeName")?,
    }))
}

fn type_name(f: Fields) -> Result<Node> {
    Ok(Node::TypeName(TypeName {
        names: f.nodes_or_empty("names")?,
        typmods: f.nodes("typmods")?,
        array_bounds: f.nodes("arrayBounds")?,
        setof: f.boolean("setof")?,
    }))
}

fn variable_set_stmt(f: Fields) -> Result<Node> {
    Ok(Node::VariableSetStmt(VariableSetStmt {
        kind: f.int("kind")? as i32,
        name: f.req_string("name")?,
        args: f.nodes("args")?,
        is_local: f.boolean("is_local")?,
    }))
}

fn variable_show_stmt(f: Fields) -> Result<Node> {
    Ok(Node::VariableShowStmt(VariableShowStmt {
        name: f.req_string("name")?,
    }))
}

fn window_def(f: Fields) -> Result<Node> {
    Ok(Node::WindowDef(WindowDef {
        name: f.string("name")?,
        refname: f.string("refname")?,
        partition_clause: f.nodes("partitionClause")?,
        order_clause: f.nodes("orderClause")?,
        frame_options: f.int("frameOptions")? as i32,
        start_offset: f.node("startOffset")?,
        end_offset: f.node("endOffset")?,
    }))
}

fn with_clause(f: Fields) -> Result<Node> {
    Ok(Node::WithClause(WithClause {
        ctes: f.nodes_or_empty("ctes")?,
        recursive: f.boolean("recursive")?,
    }))
}
