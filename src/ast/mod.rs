//! AST node definitions for PostgreSQL parse trees
//!
//! This module defines the typed form of the tagged-union parse tree the
//! external parser produces. Each `Node` variant is one discriminant; the
//! payload struct owns its children, so a tree is strictly hierarchical and
//! immutable once built. `ast::decode` constructs these from the parser's
//! JSON output.

pub mod decode;

use serde::Serialize;

/// A single parse-tree node, tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    AExpr(AExpr),
    Alias(Alias),
    AArrayExpr(AArrayExpr),
    AConst(AConst),
    AIndices(AIndices),
    AIndirection(AIndirection),
    AStar,
    BitString(BitString),
    BoolExpr(BoolExpr),
    BooleanTest(BooleanTest),
    CaseExpr(CaseExpr),
    CaseWhen(CaseWhen),
    CoalesceExpr(CoalesceExpr),
    CollateClause(CollateClause),
    ColumnDef(ColumnDef),
    ColumnRef(ColumnRef),
    CommonTableExpr(CommonTableExpr),
    DefElem(DefElem),
    Float(Float),
    FuncCall(FuncCall),
    GroupingFunc(GroupingFunc),
    GroupingSet(GroupingSet),
    Integer(Integer),
    IntoClause(IntoClause),
    JoinExpr(JoinExpr),
    LockingClause(LockingClause),
    MinMaxExpr(MinMaxExpr),
    NamedArgExpr(NamedArgExpr),
    Null,
    NullTest(NullTest),
    ParamRef(ParamRef),
    RangeFunction(RangeFunction),
    RangeSubselect(RangeSubselect),
    RangeTableSample(RangeTableSample),
    RangeVar(RangeVar),
    ResTarget(ResTarget),
    RowExpr(RowExpr),
    SelectStmt(SelectStmt),
    SortBy(SortBy),
    String(StringNode),
    SubLink(SubLink),
    TypeCast(TypeCast),
    TypeName(TypeName),
    VariableSetStmt(VariableSetStmt),
    VariableShowStmt(VariableShowStmt),
    WindowDef(WindowDef),
    WithClause(WithClause),
    /// A bare number in a node position, emitted verbatim
    Scalar(serde_json::Number),
}

impl Node {
    /// The raw string of a `String` node, if this is one.
    ///
    /// Operator names and identifier lists arrive as `String` nodes; several
    /// formatters branch on their exact text (e.g. `=` vs `<>` for IN).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(&s.str),
            _ => None,
        }
    }
}

/// A node slot that may hold either a single node or an ordered list
///
/// `A_Expr.rexpr` is a single operand for plain operators but a list for
/// IN and BETWEEN.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeOrList {
    Node(Box<Node>),
    List(Vec<Node>),
}

/// Operator or special-form expression (kind codes 0-11)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AExpr {
    pub kind: i32,
    pub name: Vec<Node>,
    pub lexpr: Option<Box<Node>>,
    pub rexpr: Option<NodeOrList>,
}

/// Table or column alias
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alias {
    pub aliasname: String,
    pub colnames: Option<Vec<Node>>,
}

/// `ARRAY[...]` constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AArrayExpr {
    pub elements: Option<Vec<Node>>,
}

/// Constant literal wrapper; `val` is an `Integer`, `Float`, `String`,
/// `BitString` or `Null` node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AConst {
    pub val: Box<Node>,
}

/// Array subscript `[i]` or slice `[lo:hi]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AIndices {
    pub lidx: Option<Box<Node>>,
    pub uidx: Box<Node>,
}

/// Member/subscript access on a parenthesized expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AIndirection {
    pub arg: Box<Node>,
    pub indirection: Vec<Node>,
}

/// Bit-string literal; the first character of `str` is the `b`/`x` prefix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BitString {
    pub str: String,
}

/// AND/OR/NOT connective (boolop codes 0-2)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolExpr {
    pub boolop: i32,
    pub args: Vec<Node>,
}

/// `IS [NOT] TRUE/FALSE/UNKNOWN` (test-type codes 0-5)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanTest {
    pub arg: Box<Node>,
    pub booltesttype: i32,
}

/// CASE expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseExpr {
    pub arg: Option<Box<Node>>,
    pub args: Vec<Node>,
    pub defresult: Option<Box<Node>>,
}

/// One WHEN arm of a CASE expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseWhen {
    pub expr: Box<Node>,
    pub result: Box<Node>,
}

/// `COALESCE(...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalesceExpr {
    pub args: Vec<Node>,
}

/// `<expr> COLLATE <name>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollateClause {
    pub arg: Option<Box<Node>>,
    pub collname: Option<Vec<Node>>,
}

/// Column definition in a column-definition list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    pub colname: String,
    pub type_name: Box<Node>,
    pub raw_default: Option<Box<Node>>,
    pub constraints: Option<Vec<Node>>,
}

/// Possibly-qualified column reference; fields are `String` nodes,
/// `A_Star` or subscripts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRef {
    pub fields: Vec<Node>,
}

/// One CTE in a WITH clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonTableExpr {
    pub ctename: String,
    pub aliascolnames: Option<Vec<Node>>,
    pub ctequery: Box<Node>,
}

/// Definition element inside SET TRANSACTION
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefElem {
    pub defname: String,
    pub arg: Box<Node>,
}

/// Floating-point literal, kept as its lexical text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Float {
    pub str: String,
}

/// Function or aggregate call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuncCall {
    pub funcname: Vec<Node>,
    pub args: Option<Vec<Node>>,
    pub agg_order: Option<Vec<Node>>,
    pub agg_filter: Option<Box<Node>>,
    pub agg_within_group: bool,
    pub agg_star: bool,
    pub agg_distinct: bool,
    pub func_variadic: bool,
    pub over: Option<Box<Node>>,
}

/// `GROUPING(...)` pseudo-function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingFunc {
    pub args: Vec<Node>,
}

/// ROLLUP/CUBE/GROUPING SETS element (kind codes 0-4)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingSet {
    pub kind: i32,
    pub content: Option<Vec<Node>>,
}

/// Integer literal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integer {
    pub ival: i64,
}

/// `INTO <rel>` target of SELECT INTO
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntoClause {
    pub rel: Box<Node>,
}

/// JOIN between two range items (jointype codes 0-3)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinExpr {
    pub jointype: i32,
    pub is_natural: bool,
    pub larg: Box<Node>,
    pub rarg: Box<Node>,
    pub quals: Option<Box<Node>>,
    pub using_clause: Option<Vec<Node>>,
    pub alias: Option<Box<Node>>,
}

/// `FOR UPDATE` / `FOR SHARE` row-locking clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LockingClause {
    pub strength: i32,
    pub locked_rels: Option<Vec<Node>>,
}

/// `GREATEST(...)` / `LEAST(...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinMaxExpr {
    pub op: i32,
    pub args: Vec<Node>,
}

/// Named function argument `name := value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedArgExpr {
    pub name: String,
    pub arg: Box<Node>,
}

/// `IS [NOT] NULL` (test-type codes 0-1)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullTest {
    pub arg: Box<Node>,
    pub nulltesttype: i32,
}

/// Positional parameter `$n`, or `?` when unnumbered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRef {
    pub number: i32,
}

/// Set-returning function in FROM, possibly `ROWS FROM (...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeFunction {
    pub lateral: bool,
    /// Each item pairs a function call with its optional per-function
    /// column-definition list (the ROWS FROM form)
    pub functions: Vec<(Node, Option<Vec<Node>>)>,
    pub is_rowsfrom: bool,
    pub ordinality: bool,
    pub alias: Option<Box<Node>>,
    pub coldeflist: Option<Vec<Node>>,
}

/// Subquery in FROM
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSubselect {
    pub lateral: bool,
    pub subquery: Box<Node>,
    pub alias: Option<Box<Node>>,
}

/// `TABLESAMPLE` applied to a table reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTableSample {
    pub relation: Box<Node>,
    pub method: Vec<Node>,
    pub args: Option<Vec<Node>>,
    pub repeatable: Option<Box<Node>>,
}

/// Plain table reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeVar {
    /// 0 means the relation is referenced with ONLY
    pub inh_opt: Option<i32>,
    /// 'u' unlogged, 't' temporary
    pub relpersistence: Option<String>,
    pub schemaname: Option<String>,
    pub relname: String,
    pub alias: Option<Box<Node>>,
}

/// Target-list entry; rendering depends on the enclosing context
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResTarget {
    pub name: Option<String>,
    pub val: Option<Box<Node>>,
}

/// Row constructor; row_format 2 is the implicit `(...)` syntax
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowExpr {
    pub args: Option<Vec<Node>>,
    pub row_format: i32,
}

/// SELECT statement, including set operations and VALUES lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStmt {
    pub with_clause: Option<Box<Node>>,
    /// Set operation: 0 none, 1 UNION, 2 INTERSECT, 3 EXCEPT
    pub op: i32,
    pub all: bool,
    pub larg: Option<Box<Node>>,
    pub rarg: Option<Box<Node>>,
    /// `[None]` is plain DISTINCT; non-null entries are DISTINCT ON exprs
    pub distinct_clause: Option<Vec<Option<Node>>>,
    pub target_list: Option<Vec<Node>>,
    pub into_clause: Option<Box<Node>>,
    pub from_clause: Option<Vec<Node>>,
    pub where_clause: Option<Box<Node>>,
    pub values_lists: Option<Vec<Vec<Node>>>,
    pub group_clause: Option<Vec<Node>>,
    pub having_clause: Option<Box<Node>>,
    pub window_clause: Option<Vec<Node>>,
    pub sort_clause: Option<Vec<Node>>,
    pub limit_count: Option<Box<Node>>,
    pub limit_offset: Option<Box<Node>>,
    pub locking_clause: Option<Vec<Node>>,
}

/// ORDER BY item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortBy {
    pub node: Box<Node>,
    /// 0 default, 1 ASC, 2 DESC, 3 USING
    pub sortby_dir: i32,
    /// 0 default, 1 NULLS FIRST, 2 NULLS LAST
    pub sortby_nulls: i32,
    pub use_op: Option<Vec<Node>>,
}

/// Bare string value (identifiers, operator names, keywords)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringNode {
    pub str: String,
}

/// Subquery used as an expression (sub-link types 0-6)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubLink {
    pub sub_link_type: i32,
    pub testexpr: Option<Box<Node>>,
    pub oper_name: Option<Vec<Node>>,
    pub subselect: Box<Node>,
}

/// `<expr>::<type>` cast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeCast {
    pub arg: Box<Node>,
    pub type_name: Box<Node>,
}

/// Type name with optional modifiers and array bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeName {
    pub names: Vec<Node>,
    pub typmods: Option<Vec<Node>>,
    pub array_bounds: Option<Vec<Node>>,
    pub setof: bool,
}

/// SET/RESET statement (kind codes: 4 RESET, 3 SET TRANSACTION,
/// 1 SET ... TO DEFAULT, otherwise generic SET)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableSetStmt {
    pub kind: i32,
    pub name: String,
    pub args: Option<Vec<Node>>,
    pub is_local: bool,
}

/// `SHOW <name>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableShowStmt {
    pub name: String,
}

/// Window definition, either named in a WINDOW clause or inline after OVER
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowDef {
    pub name: Option<String>,
    /// Referenced window this definition extends
    pub refname: Option<String>,
    pub partition_clause: Option<Vec<Node>>,
    pub order_clause: Option<Vec<Node>>,
    pub frame_options: i32,
    pub start_offset: Option<Box<Node>>,
    pub end_offset: Option<Box<Node>>,
}

/// WITH clause holding one or more CTEs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithClause {
    pub ctes: Vec<Node>,
    pub recursive: bool,
}
