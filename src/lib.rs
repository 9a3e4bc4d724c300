//! pg-deparse - reconstruct SQL source text from PostgreSQL parse trees
//!
//! The inverse of parsing: given the tagged-union parse tree an external
//! PostgreSQL parser produces, render equivalent SQL text. Identifiers come
//! back double-quoted, string literals single-quoted with embedded quotes
//! doubled, and expression nesting is parenthesized explicitly so operator
//! precedence never has to be re-derived.
//!
//! ```no_run
//! let sql = pg_deparse::deparse_json(r#"[{"VariableShowStmt": {"name": "all"}}]"#)?;
//! assert_eq!(sql, "SHOW all");
//! # Ok::<(), pg_deparse::Error>(())
//! ```

pub mod ast;
pub mod deparser;
pub mod error;

pub use ast::Node;
pub use deparser::{Context, Deparser};
pub use error::{Error, Result};

/// Deparse a decoded parse tree into SQL text.
///
/// Statements are separated by a blank line. The input is not consumed;
/// deparsing the same tree twice yields identical text.
pub fn deparse(tree: &[Node]) -> Result<String> {
    Deparser::deparse(tree)
}

/// Decode a JSON-serialized parse tree and deparse it in one step.
pub fn deparse_json(input: &str) -> Result<String> {
    let tree = ast::decode::tree_from_json(input)?;
    deparse(&tree)
}

/// Deparse a single node under an explicit syntactic context.
pub fn deparse_node(node: &Node, ctx: Context) -> Result<String> {
    Deparser::new(std::slice::from_ref(node)).deparse_node(node, ctx)
}
