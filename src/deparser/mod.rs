//! Tree-to-text conversion engine
//!
//! The `Deparser` session walks a parse tree and reassembles SQL source
//! text. Dispatch happens in exactly one place, `deparse_node`: every
//! formatter resolves its own children by calling back through it, so no
//! formatter ever branches on another node's shape directly.

pub mod expr;
pub mod range;
pub mod stmt;
pub mod typename;
pub mod utils;
pub mod window;

use crate::ast::Node;
use crate::error::Result;
use utils::quote_ident;

/// Syntactic position of the node being rendered
///
/// Passed at call time only, never stored on a node. A target-list entry
/// renders `expr AS alias` under `Select` but `name = expr` under `Update`;
/// negative integers keep their parens except under `Simple`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    None,
    Select,
    Update,
    Simple,
    From,
    Group,
    Sort,
    Window,
}

/// One deparse session over a parse tree
///
/// Holds only the tree reference; all formatting state is on the call
/// stack, so independent sessions can run concurrently.
pub struct Deparser<'a> {
    tree: &'a [Node],
}

impl<'a> Deparser<'a> {
    pub fn new(tree: &'a [Node]) -> Self {
        Self { tree }
    }

    /// Deparse a whole tree in one call.
    pub fn deparse(tree: &[Node]) -> Result<String> {
        Deparser::new(tree).deparse_query()
    }

    /// Render every top-level statement, joined by a blank line.
    pub fn deparse_query(&self) -> Result<String> {
        let statements = self
            .tree
            .iter()
            .map(|node| self.deparse_node(node, Context::None))
            .collect::<Result<Vec<_>>>()?;
        Ok(statements.join("\n\n"))
    }

    /// The node dispatcher: route a node to its kind formatter.
    ///
    /// Context is threaded only to the formatters that consume it; `A_Const`
    /// forwards it to its value so SET argument lists stay paren-free.
    pub fn deparse_node(&self, node: &Node, ctx: Context) -> Result<String> {
        match node {
            Node::AExpr(n) => self.a_expr(n),
            Node::Alias(n) => self.alias(n),
            Node::AArrayExpr(n) => self.a_array_expr(n),
            Node::AConst(n) => self.a_const(n, ctx),
            Node::AIndices(n) => self.a_indices(n),
            Node::AIndirection(n) => self.a_indirection(n),
            Node::AStar => Ok("*".into()),
            Node::BitString(n) => self.bit_string(n),
            Node::BoolExpr(n) => self.bool_expr(n),
            Node::BooleanTest(n) => self.boolean_test(n),
            Node::CaseExpr(n) => self.case_expr(n),
            Node::CaseWhen(n) => self.case_when(n),
            Node::CoalesceExpr(n) => self.coalesce_expr(n),
            Node::CollateClause(n) => self.collate_clause(n),
            Node::ColumnDef(n) => self.column_def(n),
            Node::ColumnRef(n) => self.column_ref(n),
            Node::CommonTableExpr(n) => self.common_table_expr(n),
            Node::DefElem(n) => self.def_elem(n),
            Node::Float(n) => self.float(n),
            Node::FuncCall(n) => self.func_call(n),
            Node::GroupingFunc(n) => self.grouping_func(n),
            Node::GroupingSet(n) => self.grouping_set(n),
            Node::Integer(n) => self.integer(n, ctx),
            Node::IntoClause(n) => self.into_clause(n),
            Node::JoinExpr(n) => self.join_expr(n),
            Node::LockingClause(n) => self.locking_clause(n),
            Node::MinMaxExpr(n) => self.min_max_expr(n),
            Node::NamedArgExpr(n) => self.named_arg_expr(n),
            Node::Null => Ok("NULL".into()),
            Node::NullTest(n) => self.null_test(n),
            Node::ParamRef(n) => self.param_ref(n),
            Node::RangeFunction(n) => self.range_function(n),
            Node::RangeSubselect(n) => self.range_subselect(n),
            Node::RangeTableSample(n) => self.range_table_sample(n),
            Node::RangeVar(n) => self.range_var(n),
            Node::ResTarget(n) => self.res_target(n, ctx),
            Node::RowExpr(n) => self.row_expr(n),
            Node::SelectStmt(n) => self.select_stmt(n),
            Node::SortBy(n) => self.sort_by(n),
            Node::String(n) => Ok(n.str.clone()),
            Node::SubLink(n) => self.sub_link(n),
            Node::TypeCast(n) => self.type_cast(n),
            Node::TypeName(n) => self.type_name(n),
            Node::VariableSetStmt(n) => self.variable_set_stmt(n),
            Node::VariableShowStmt(n) => self.variable_show_stmt(n),
            Node::WindowDef(n) => self.window_def(n, ctx),
            Node::WithClause(n) => self.with_clause(n),
            Node::Scalar(n) => Ok(n.to_string()),
        }
    }

    /// Render an optional child; absence means "omit this clause".
    pub(crate) fn deparse_opt(
        &self,
        node: Option<&Node>,
        ctx: Context,
    ) -> Result<Option<String>> {
        node.map(|n| self.deparse_node(n, ctx)).transpose()
    }

    /// Render each node of a sequence under the same context.
    pub(crate) fn deparse_nodes(&self, nodes: &[Node], ctx: Context) -> Result<Vec<String>> {
        nodes.iter().map(|n| self.deparse_node(n, ctx)).collect()
    }

    /// Comma-join a node sequence.
    pub(crate) fn list(&self, nodes: &[Node]) -> Result<String> {
        self.list_sep(nodes, ", ")
    }

    /// Join a node sequence with an arbitrary separator.
    pub(crate) fn list_sep(&self, nodes: &[Node], separator: &str) -> Result<String> {
        Ok(self.deparse_nodes(nodes, Context::None)?.join(separator))
    }

    /// Render each node, then quote each rendering as an identifier.
    pub(crate) fn quoted_list(&self, nodes: &[Node], separator: &str) -> Result<String> {
        let names = self.deparse_nodes(nodes, Context::None)?;
        Ok(names
            .iter()
            .map(|name| quote_ident(name))
            .collect::<Vec<_>>()
            .join(separator))
    }
}
