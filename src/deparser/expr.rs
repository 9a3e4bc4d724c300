//! Expression formatters
//!
//! Operator expressions, boolean logic, CASE, function calls, casts,
//! sub-selects used as expressions, row/array constructors and literals.
//! Every sub-case code is a closed enumeration; anything outside it fails
//! with `UnhandledVariant` rather than guessing.

use crate::ast::*;
use crate::deparser::utils::{escape_literal, parens, quote_ident};
use crate::deparser::{Context, Deparser};
use crate::error::{unhandled, Result};

const AEXPR_OP: i32 = 0;
const AEXPR_OP_ANY: i32 = 1;
const AEXPR_OP_ALL: i32 = 2;
const AEXPR_DISTINCT: i32 = 3;
const AEXPR_NULLIF: i32 = 4;
const AEXPR_OF: i32 = 5;
const AEXPR_IN: i32 = 6;
const AEXPR_LIKE: i32 = 7;
const AEXPR_ILIKE: i32 = 8;
const AEXPR_SIMILAR: i32 = 9;
const AEXPR_BETWEEN: i32 = 10;
const AEXPR_NOT_BETWEEN: i32 = 11;

const BOOL_AND: i32 = 0;
const BOOL_OR: i32 = 1;
const BOOL_NOT: i32 = 2;

/// Fixed phrases indexed by the boolean test-type code
const BOOLEAN_TESTS: [&str; 6] = [
    "IS TRUE",
    "IS NOT TRUE",
    "IS FALSE",
    "IS NOT FALSE",
    "IS UNKNOWN",
    "IS NOT UNKNOWN",
];

const SUBLINK_EXISTS: i32 = 0;
const SUBLINK_ALL: i32 = 1;
const SUBLINK_ANY: i32 = 2;
const SUBLINK_ROWCOMPARE: i32 = 3;
const SUBLINK_EXPR: i32 = 4;
const SUBLINK_ARRAY: i32 = 6;

/// True for a bare NULL or a NULL constant wrapper.
fn is_null_literal(node: &Node) -> bool {
    match node {
        Node::Null => true,
        Node::AConst(c) => matches!(*c.val, Node::Null),
        _ => false,
    }
}

impl Deparser<'_> {
    pub(crate) fn a_expr(&self, n: &AExpr) -> Result<String> {
        match n.kind {
            AEXPR_OP => {
                let mut output = Vec::new();
                if let Some(lexpr) = n.lexpr.as_deref() {
                    output.push(parens(&self.deparse_node(lexpr, Context::None)?));
                }
                if n.name.len() > 1 {
                    let schema = self.deparse_node(&n.name[0], Context::None)?;
                    let operator = self.deparse_node(&n.name[1], Context::None)?;
                    output.push(format!("OPERATOR({schema}.{operator})"));
                } else {
                    let name = n.name.first().ok_or_else(|| unhandled("A_Expr", n))?;
                    output.push(self.deparse_node(name, Context::None)?);
                }
                if let Some(rexpr) = self.rexpr_node(n) {
                    output.push(parens(&self.deparse_node(rexpr, Context::None)?));
                }
                // two fragments mean a prefix operator; no interior space
                if output.len() == 2 {
                    Ok(parens(&output.join("")))
                } else {
                    Ok(parens(&output.join(" ")))
                }
            }

            AEXPR_OP_ANY => {
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("{lexpr} {} ANY ({rexpr})", self.operator_name(n)?))
            }

            AEXPR_OP_ALL => {
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("{lexpr} {} ALL ({rexpr})", self.operator_name(n)?))
            }

            AEXPR_DISTINCT => {
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("{lexpr} IS DISTINCT FROM {rexpr}"))
            }

            AEXPR_NULLIF => {
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("NULLIF({lexpr}, {rexpr})"))
            }

            AEXPR_OF => {
                let op = if self.operator_name(n)? == "=" {
                    "IS OF"
                } else {
                    "IS NOT OF"
                };
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                Ok(format!("{lexpr} {op} ({})", self.list(self.rexpr_list(n)?)?))
            }

            AEXPR_IN => {
                // the sign comes from whether the comparison operator is `=`
                let op = if self.operator_name(n)? == "=" {
                    "IN"
                } else {
                    "NOT IN"
                };
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                Ok(format!("{lexpr} {op} ({})", self.list(self.rexpr_list(n)?)?))
            }

            AEXPR_LIKE => {
                let op = if self.operator_name(n)? == "!~~" {
                    "NOT LIKE"
                } else {
                    "LIKE"
                };
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("{lexpr} {op} ({rexpr})"))
            }

            AEXPR_ILIKE => {
                let op = if self.operator_name(n)? == "!~~*" {
                    "NOT ILIKE"
                } else {
                    "ILIKE"
                };
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let rexpr = self.aexpr_operand(self.rexpr_node(n), n)?;
                Ok(format!("{lexpr} {op} ({rexpr})"))
            }

            AEXPR_SIMILAR => {
                // the parser rewrites SIMILAR TO into a similar_escape() call
                // whose second argument is the escape string, or NULL if none
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let Some(Node::FuncCall(call)) = self.rexpr_node(n) else {
                    return Err(unhandled("A_Expr", n));
                };
                let args = call.args.as_deref().unwrap_or_default();
                let (Some(pattern), Some(escape)) = (args.first(), args.get(1)) else {
                    return Err(unhandled("A_Expr", n));
                };
                let pattern = self.deparse_node(pattern, Context::None)?;
                if is_null_literal(escape) {
                    Ok(format!("{lexpr} SIMILAR TO {pattern}"))
                } else {
                    let escape = self.deparse_node(escape, Context::None)?;
                    Ok(format!("{lexpr} SIMILAR TO {pattern} ESCAPE {escape}"))
                }
            }

            AEXPR_BETWEEN | AEXPR_NOT_BETWEEN => {
                let lexpr = self.aexpr_operand(n.lexpr.as_deref(), n)?;
                let bounds = self.rexpr_list(n)?;
                let (Some(low), Some(high)) = (bounds.first(), bounds.get(1)) else {
                    return Err(unhandled("A_Expr", n));
                };
                let keyword = if n.kind == AEXPR_BETWEEN {
                    "BETWEEN"
                } else {
                    "NOT BETWEEN"
                };
                Ok(format!(
                    "{lexpr} {keyword} {} AND {}",
                    self.deparse_node(low, Context::None)?,
                    self.deparse_node(high, Context::None)?
                ))
            }

            _ => Err(unhandled("A_Expr", n)),
        }
    }

    fn aexpr_operand(&self, slot: Option<&Node>, n: &AExpr) -> Result<String> {
        let node = slot.ok_or_else(|| unhandled("A_Expr", n))?;
        self.deparse_node(node, Context::None)
    }

    /// The single-node form of `rexpr`, if that is what this expression has.
    fn rexpr_node<'b>(&self, n: &'b AExpr) -> Option<&'b Node> {
        match &n.rexpr {
            Some(NodeOrList::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// The list form of `rexpr` (IN and BETWEEN operands).
    fn rexpr_list<'b>(&self, n: &'b AExpr) -> Result<&'b [Node]> {
        match &n.rexpr {
            Some(NodeOrList::List(items)) => Ok(items),
            _ => Err(unhandled("A_Expr", n)),
        }
    }

    fn operator_name<'b>(&self, n: &'b AExpr) -> Result<&'b str> {
        n.name
            .first()
            .and_then(Node::as_string)
            .ok_or_else(|| unhandled("A_Expr", n))
    }

    pub(crate) fn a_array_expr(&self, n: &AArrayExpr) -> Result<String> {
        let elements = n.elements.as_deref().unwrap_or_default();
        Ok(format!("ARRAY[{}]", self.list(elements)?))
    }

    pub(crate) fn a_const(&self, n: &AConst, ctx: Context) -> Result<String> {
        // string constants pick up quoting here, not in the String formatter,
        // so identifiers rendered through String nodes stay bare
        if let Node::String(s) = &*n.val {
            return Ok(escape_literal(&s.str));
        }
        self.deparse_node(&n.val, ctx)
    }

    pub(crate) fn a_indices(&self, n: &AIndices) -> Result<String> {
        let upper = self.deparse_node(&n.uidx, Context::None)?;
        match n.lidx.as_deref() {
            Some(lower) => Ok(format!(
                "[{}:{upper}]",
                self.deparse_node(lower, Context::None)?
            )),
            None => Ok(format!("[{upper}]")),
        }
    }

    pub(crate) fn a_indirection(&self, n: &AIndirection) -> Result<String> {
        let mut output = parens(&self.deparse_node(&n.arg, Context::None)?);
        for subnode in &n.indirection {
            match subnode {
                Node::String(s) => {
                    output.push('.');
                    output.push_str(&quote_ident(&s.str));
                }
                Node::AStar => output.push_str(".*"),
                other => output.push_str(&self.deparse_node(other, Context::None)?),
            }
        }
        Ok(output)
    }

    pub(crate) fn bit_string(&self, n: &BitString) -> Result<String> {
        // the first character is the b/x prefix of the literal
        let mut chars = n.str.chars();
        match chars.next() {
            Some(prefix) => Ok(format!("{prefix}'{}'", chars.as_str())),
            None => Err(unhandled("BitString", n)),
        }
    }

    pub(crate) fn bool_expr(&self, n: &BoolExpr) -> Result<String> {
        match n.boolop {
            BOOL_AND => Ok(parens(&self.list_sep(&n.args, " AND ")?)),
            BOOL_OR => Ok(parens(&self.list_sep(&n.args, " OR ")?)),
            BOOL_NOT => {
                let arg = n.args.first().ok_or_else(|| unhandled("BoolExpr", n))?;
                Ok(format!("NOT ({})", self.deparse_node(arg, Context::None)?))
            }
            _ => Err(unhandled("BoolExpr", n)),
        }
    }

    pub(crate) fn boolean_test(&self, n: &BooleanTest) -> Result<String> {
        let test = usize::try_from(n.booltesttype)
            .ok()
            .and_then(|i| BOOLEAN_TESTS.get(i))
            .ok_or_else(|| unhandled("BooleanTest", n))?;
        Ok(format!("{} {test}", self.deparse_node(&n.arg, Context::None)?))
    }

    pub(crate) fn case_expr(&self, n: &CaseExpr) -> Result<String> {
        let mut output = vec!["CASE".to_owned()];
        if let Some(arg) = n.arg.as_deref() {
            output.push(self.deparse_node(arg, Context::None)?);
        }
        for when in &n.args {
            output.push(self.deparse_node(when, Context::None)?);
        }
        if let Some(defresult) = n.defresult.as_deref() {
            output.push("ELSE".into());
            output.push(self.deparse_node(defresult, Context::None)?);
        }
        output.push("END".into());
        Ok(output.join(" "))
    }

    pub(crate) fn case_when(&self, n: &CaseWhen) -> Result<String> {
        Ok(format!(
            "WHEN {} THEN {}",
            self.deparse_node(&n.expr, Context::None)?,
            self.deparse_node(&n.result, Context::None)?
        ))
    }

    pub(crate) fn coalesce_expr(&self, n: &CoalesceExpr) -> Result<String> {
        Ok(format!("COALESCE({})", self.list(&n.args)?))
    }

    pub(crate) fn collate_clause(&self, n: &CollateClause) -> Result<String> {
        let mut output = Vec::new();
        if let Some(arg) = n.arg.as_deref() {
            output.push(self.deparse_node(arg, Context::None)?);
        }
        output.push("COLLATE".into());
        if let Some(collname) = &n.collname {
            output.push(self.quoted_list(collname, ".")?);
        }
        Ok(output.join(" "))
    }

    pub(crate) fn column_ref(&self, n: &ColumnRef) -> Result<String> {
        let fields = n
            .fields
            .iter()
            .map(|field| match field {
                Node::String(s) => Ok(quote_ident(&s.str)),
                other => self.deparse_node(other, Context::None),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(fields.join("."))
    }

    pub(crate) fn float(&self, n: &Float) -> Result<String> {
        // negative numbers are parenthesized so that expressions like
        // (-2147483648)::int4 * (-1)::int4 reparse cleanly
        if n.str.starts_with('-') {
            Ok(parens(&n.str))
        } else {
            Ok(n.str.clone())
        }
    }

    pub(crate) fn func_call(&self, n: &FuncCall) -> Result<String> {
        let mut params = match &n.args {
            Some(args) => self.deparse_nodes(args, Context::None)?,
            None => Vec::new(),
        };

        // COUNT(*)
        if n.agg_star {
            params.push("*".into());
        }

        // VARIADIC prefixes the last argument:
        // CONCAT('|', VARIADIC ARRAY['1','2','3'])
        if n.func_variadic {
            if let Some(last) = params.last_mut() {
                *last = format!("VARIADIC {last}");
            }
        }

        let order = match &n.agg_order {
            Some(order) => Some(format!("ORDER BY {}", self.list(order)?)),
            None => None,
        };

        let mut call = format!("{}(", self.list_sep(&n.funcname, ".")?);
        if n.agg_distinct {
            call.push_str("DISTINCT ");
        }
        call.push_str(&params.join(", "));
        if let Some(order) = &order {
            if !n.agg_within_group {
                call.push(' ');
                call.push_str(order);
            }
        }
        call.push(')');

        let mut output = vec![call];

        if let Some(order) = &order {
            if n.agg_within_group {
                output.push(format!("WITHIN GROUP ({order})"));
            }
        }

        if let Some(filter) = n.agg_filter.as_deref() {
            output.push(format!(
                "FILTER (WHERE {})",
                self.deparse_node(filter, Context::None)?
            ));
        }

        if let Some(over) = n.over.as_deref() {
            output.push(format!("OVER {}", self.deparse_node(over, Context::None)?));
        }

        Ok(output.join(" "))
    }

    pub(crate) fn integer(&self, n: &Integer, ctx: Context) -> Result<String> {
        // parens keep the sign attached on reparse, except in argument
        // positions (SET lists) where parens are invalid
        if n.ival < 0 && ctx != Context::Simple {
            Ok(parens(&n.ival.to_string()))
        } else {
            Ok(n.ival.to_string())
        }
    }

    pub(crate) fn min_max_expr(&self, n: &MinMaxExpr) -> Result<String> {
        let name = if n.op == 0 { "GREATEST" } else { "LEAST" };
        Ok(format!("{name}({})", self.list(&n.args)?))
    }

    pub(crate) fn named_arg_expr(&self, n: &NamedArgExpr) -> Result<String> {
        Ok(format!(
            "{} := {}",
            n.name,
            self.deparse_node(&n.arg, Context::None)?
        ))
    }

    pub(crate) fn null_test(&self, n: &NullTest) -> Result<String> {
        let arg = self.deparse_node(&n.arg, Context::None)?;
        match n.nulltesttype {
            0 => Ok(format!("{arg} IS NULL")),
            1 => Ok(format!("{arg} IS NOT NULL")),
            _ => Err(unhandled("NullTest", n)),
        }
    }

    pub(crate) fn param_ref(&self, n: &ParamRef) -> Result<String> {
        if n.number >= 0 {
            Ok(format!("${}", n.number))
        } else {
            Ok("?".into())
        }
    }

    pub(crate) fn row_expr(&self, n: &RowExpr) -> Result<String> {
        let args = n.args.as_deref().unwrap_or_default();
        // row_format 2 is the implicit (a, b) syntax
        if n.row_format == 2 {
            Ok(parens(&self.list(args)?))
        } else {
            Ok(format!("ROW({})", self.list(args)?))
        }
    }

    pub(crate) fn sub_link(&self, n: &SubLink) -> Result<String> {
        let subselect = self.deparse_node(&n.subselect, Context::None)?;
        match n.sub_link_type {
            SUBLINK_EXISTS => Ok(format!("EXISTS ({subselect})")),
            SUBLINK_ALL => Ok(format!(
                "{} {} ALL ({subselect})",
                self.sublink_test(n)?,
                self.sublink_oper(n)?
            )),
            SUBLINK_ANY if n.oper_name.is_none() => {
                Ok(format!("{} IN ({subselect})", self.sublink_test(n)?))
            }
            SUBLINK_ANY => Ok(format!(
                "{} {} ANY ({subselect})",
                self.sublink_test(n)?,
                self.sublink_oper(n)?
            )),
            SUBLINK_ROWCOMPARE => Ok(format!(
                "{} {} ({subselect})",
                self.sublink_test(n)?,
                self.sublink_oper(n)?
            )),
            SUBLINK_EXPR => Ok(format!("({subselect})")),
            SUBLINK_ARRAY => Ok(format!("ARRAY ({subselect})")),
            _ => Err(unhandled("SubLink", n)),
        }
    }

    fn sublink_test(&self, n: &SubLink) -> Result<String> {
        let test = n
            .testexpr
            .as_deref()
            .ok_or_else(|| unhandled("SubLink", n))?;
        self.deparse_node(test, Context::None)
    }

    fn sublink_oper(&self, n: &SubLink) -> Result<String> {
        let oper = n
            .oper_name
            .as_deref()
            .and_then(<[Node]>::first)
            .ok_or_else(|| unhandled("SubLink", n))?;
        self.deparse_node(oper, Context::None)
    }

    pub(crate) fn type_cast(&self, n: &TypeCast) -> Result<String> {
        Ok(format!(
            "{}::{}",
            self.deparse_node(&n.arg, Context::None)?,
            self.deparse_node(&n.type_name, Context::None)?
        ))
    }
}
