//! Statement assembly
//!
//! SELECT and its variants (set operations, VALUES, WITH), plus the
//! fixed-shape SET/RESET/SHOW statements. Clauses are emitted in fixed
//! order, each only when its tree field is present; projection and
//! GROUP BY/ORDER BY lists are newline-joined within their clause.

use crate::ast::*;
use crate::deparser::utils::{join_compact, parens, quote_ident};
use crate::deparser::{Context, Deparser};
use crate::error::{unhandled, Result};

/// Set-operation keywords indexed by the op code; 0 is a plain SELECT
const SET_OPERATIONS: [&str; 4] = ["NONE", "UNION", "INTERSECT", "EXCEPT"];

/// Locking strengths indexed by the strength code
const LOCK_STRENGTHS: [&str; 5] = [
    "NONE",
    "FOR KEY SHARE",
    "FOR SHARE",
    "FOR NO KEY UPDATE",
    "FOR UPDATE",
];

const VAR_SET_DEFAULT: i32 = 1;
const VAR_SET_MULTI: i32 = 3;
const VAR_RESET: i32 = 4;

impl Deparser<'_> {
    pub(crate) fn select_stmt(&self, n: &SelectStmt) -> Result<String> {
        let mut output = Vec::new();

        if let Some(with) = n.with_clause.as_deref() {
            output.push(self.deparse_node(with, Context::None)?);
        }

        if n.op == 0 {
            // VALUES-only statements don't get a SELECT keyword
            if n.values_lists.is_none() {
                output.push("SELECT".into());
            }
        } else {
            let keyword = usize::try_from(n.op)
                .ok()
                .and_then(|i| SET_OPERATIONS.get(i))
                .ok_or_else(|| unhandled("SelectStmt", n))?;
            let larg = n.larg.as_deref().ok_or_else(|| unhandled("SelectStmt", n))?;
            let rarg = n.rarg.as_deref().ok_or_else(|| unhandled("SelectStmt", n))?;

            output.push(parens(&self.deparse_node(larg, Context::None)?));
            output.push((*keyword).into());
            if n.all {
                output.push("ALL".into());
            }
            output.push(parens(&self.deparse_node(rarg, Context::None)?));
        }

        if let Some(distinct) = &n.distinct_clause {
            // a leading null entry is plain DISTINCT; real entries are the
            // DISTINCT ON expressions
            if distinct.first().is_some_and(Option::is_some) {
                output.push("DISTINCT ON".into());
                let exprs = distinct
                    .iter()
                    .flatten()
                    .map(|e| self.deparse_node(e, Context::Select))
                    .collect::<Result<Vec<_>>>()?;
                output.push(parens(&exprs.join(",\n")));
            } else {
                output.push("DISTINCT".into());
            }
        }

        if let Some(targets) = &n.target_list {
            output.push(self.deparse_nodes(targets, Context::Select)?.join(",\n"));
        }

        if let Some(into) = n.into_clause.as_deref() {
            output.push("INTO".into());
            output.push(self.deparse_node(into, Context::None)?);
        }

        if let Some(from) = &n.from_clause {
            output.push("FROM".into());
            output.push(self.deparse_nodes(from, Context::From)?.join(",\n"));
        }

        if let Some(where_clause) = n.where_clause.as_deref() {
            output.push("WHERE".into());
            output.push(self.deparse_node(where_clause, Context::None)?);
        }

        if let Some(values) = &n.values_lists {
            output.push("VALUES".into());
            let rows = values
                .iter()
                .map(|row| Ok(parens(&self.list(row)?)))
                .collect::<Result<Vec<_>>>()?;
            output.push(rows.join(", "));
        }

        if let Some(group) = &n.group_clause {
            output.push("GROUP BY".into());
            output.push(self.deparse_nodes(group, Context::Group)?.join(",\n"));
        }

        if let Some(having) = n.having_clause.as_deref() {
            output.push("HAVING".into());
            output.push(self.deparse_node(having, Context::None)?);
        }

        if let Some(windows) = &n.window_clause {
            output.push("WINDOW".into());
            let definitions = windows
                .iter()
                .map(|w| {
                    let Node::WindowDef(def) = w else {
                        return Err(unhandled("SelectStmt", n));
                    };
                    let body = parens(&self.deparse_node(w, Context::Window)?);
                    match &def.name {
                        Some(name) => Ok(format!("{} AS {body}", quote_ident(name))),
                        None => Ok(body),
                    }
                })
                .collect::<Result<Vec<_>>>()?;
            output.push(definitions.join(", "));
        }

        if let Some(sort) = &n.sort_clause {
            output.push("ORDER BY".into());
            output.push(self.deparse_nodes(sort, Context::Sort)?.join(",\n"));
        }

        if let Some(count) = n.limit_count.as_deref() {
            output.push("LIMIT".into());
            output.push(self.deparse_node(count, Context::None)?);
        }

        if let Some(offset) = n.limit_offset.as_deref() {
            output.push("OFFSET".into());
            output.push(self.deparse_node(offset, Context::None)?);
        }

        if let Some(locks) = &n.locking_clause {
            for lock in locks {
                output.push(self.deparse_node(lock, Context::None)?);
            }
        }

        Ok(output.join(" "))
    }

    pub(crate) fn res_target(&self, n: &ResTarget, ctx: Context) -> Result<String> {
        match ctx {
            Context::Select => {
                let val = self.deparse_opt(n.val.as_deref(), Context::None)?;
                let name = n.name.as_deref().map(quote_ident);
                Ok(join_compact(
                    [val.unwrap_or_default(), name.unwrap_or_default()],
                    " AS ",
                ))
            }
            Context::Update => {
                let val = self.deparse_opt(n.val.as_deref(), Context::None)?;
                Ok(join_compact(
                    [n.name.clone().unwrap_or_default(), val.unwrap_or_default()],
                    " = ",
                ))
            }
            _ if n.val.is_none() => {
                let name = n.name.as_deref().ok_or_else(|| unhandled("ResTarget", n))?;
                Ok(quote_ident(name))
            }
            _ => Err(unhandled("ResTarget", n)),
        }
    }

    pub(crate) fn sort_by(&self, n: &SortBy) -> Result<String> {
        let mut output = vec![self.deparse_node(&n.node, Context::None)?];

        match n.sortby_dir {
            1 => output.push("ASC".into()),
            2 => output.push("DESC".into()),
            3 => {
                let operator = self.list_sep(n.use_op.as_deref().unwrap_or_default(), " ")?;
                output.push(format!("USING {operator}"));
            }
            _ => {}
        }

        match n.sortby_nulls {
            1 => output.push("NULLS FIRST".into()),
            2 => output.push("NULLS LAST".into()),
            _ => {}
        }

        Ok(output.join(" "))
    }

    pub(crate) fn locking_clause(&self, n: &LockingClause) -> Result<String> {
        let strength = usize::try_from(n.strength)
            .ok()
            .and_then(|i| LOCK_STRENGTHS.get(i))
            .ok_or_else(|| unhandled("LockingClause", n))?;
        let mut output = vec![(*strength).to_owned()];
        if let Some(rels) = &n.locked_rels {
            output.push("OF".into());
            output.push(self.list(rels)?);
        }
        Ok(output.join(" "))
    }

    pub(crate) fn grouping_func(&self, n: &GroupingFunc) -> Result<String> {
        Ok(format!("GROUPING({})", self.list(&n.args)?))
    }

    pub(crate) fn grouping_set(&self, n: &GroupingSet) -> Result<String> {
        let content = n.content.as_deref().unwrap_or_default();
        match n.kind {
            0 => Ok("()".into()),
            2 => Ok(format!("ROLLUP ({})", self.list(content)?)),
            3 => Ok(format!("CUBE ({})", self.list(content)?)),
            4 => Ok(format!("GROUPING SETS ({})", self.list(content)?)),
            _ => Err(unhandled("GroupingSet", n)),
        }
    }

    pub(crate) fn with_clause(&self, n: &WithClause) -> Result<String> {
        let mut output = vec!["WITH".to_owned()];
        if n.recursive {
            output.push("RECURSIVE".into());
        }
        output.push(self.list(&n.ctes)?);
        Ok(output.join(" "))
    }

    pub(crate) fn common_table_expr(&self, n: &CommonTableExpr) -> Result<String> {
        let mut output = vec![quote_ident(&n.ctename)];
        if let Some(columns) = &n.aliascolnames {
            output.push(parens(&self.quoted_list(columns, ", ")?));
        }
        output.push(format!(
            "AS ({})",
            self.deparse_node(&n.ctequery, Context::None)?
        ));
        Ok(output.join(" "))
    }

    pub(crate) fn into_clause(&self, n: &IntoClause) -> Result<String> {
        self.deparse_node(&n.rel, Context::None)
    }

    pub(crate) fn variable_set_stmt(&self, n: &VariableSetStmt) -> Result<String> {
        let args = n.args.as_deref().unwrap_or_default();

        match n.kind {
            VAR_RESET => Ok(format!("RESET {}", n.name)),

            VAR_SET_MULTI => {
                let name = match n.name.as_str() {
                    "TRANSACTION" => "TRANSACTION",
                    "SESSION CHARACTERISTICS" => "SESSION CHARACTERISTICS AS TRANSACTION",
                    _ => return Err(unhandled("VariableSetStmt", n)),
                };
                let args = self.deparse_nodes(args, Context::Simple)?.join(", ");
                Ok(format!("SET {name} {args}"))
            }

            VAR_SET_DEFAULT => Ok(format!("SET {} TO DEFAULT", n.name)),

            _ => {
                let local = if n.is_local { "LOCAL " } else { "" };
                let args = self.deparse_nodes(args, Context::Simple)?.join(", ");
                Ok(format!("SET {local}{} = {args}", n.name))
            }
        }
    }

    pub(crate) fn def_elem(&self, n: &DefElem) -> Result<String> {
        // SET TRANSACTION options arrive as definition elements wrapping
        // constants
        match n.defname.as_str() {
            "transaction_isolation" => {
                let Node::AConst(constant) = &*n.arg else {
                    return Err(unhandled("DefElem", n));
                };
                let Node::String(level) = &*constant.val else {
                    return Err(unhandled("DefElem", n));
                };
                Ok(format!("ISOLATION LEVEL {}", level.str.to_uppercase()))
            }
            "transaction_read_only" => match self.def_elem_int(n)? {
                0 => Ok("READ WRITE".into()),
                _ => Ok("READ ONLY".into()),
            },
            "transaction_deferrable" => match self.def_elem_int(n)? {
                0 => Ok("NOT DEFERRABLE".into()),
                _ => Ok("DEFERRABLE".into()),
            },
            _ => Err(unhandled("DefElem", n)),
        }
    }

    fn def_elem_int(&self, n: &DefElem) -> Result<i64> {
        let Node::AConst(constant) = &*n.arg else {
            return Err(unhandled("DefElem", n));
        };
        let Node::Integer(value) = &*constant.val else {
            return Err(unhandled("DefElem", n));
        };
        Ok(value.ival)
    }

    pub(crate) fn variable_show_stmt(&self, n: &VariableShowStmt) -> Result<String> {
        Ok(format!("SHOW {}", n.name))
    }
}
