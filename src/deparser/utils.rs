//! Lexical helpers for the deparser

/// Wrap a name in double quotes.
///
/// Embedded double quotes are deliberately not escaped; see DESIGN.md.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{name}\"")
}

/// Single-quote a string literal, doubling every embedded single quote.
pub(crate) fn escape_literal(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}

/// Parenthesize a fragment.
pub(crate) fn parens(fragment: &str) -> String {
    format!("({fragment})")
}

/// Join fragments with a separator, dropping empty ones.
pub(crate) fn join_compact<I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
