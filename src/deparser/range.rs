//! FROM-clause items
//!
//! Table references, joins, subqueries, set-returning functions and
//! TABLESAMPLE, plus the alias and column-definition forms they share.

use crate::ast::*;
use crate::deparser::utils::{join_compact, parens, quote_ident};
use crate::deparser::{Context, Deparser};
use crate::error::{unhandled, Result};

impl Deparser<'_> {
    pub(crate) fn range_var(&self, n: &RangeVar) -> Result<String> {
        let mut output = Vec::new();

        if n.inh_opt == Some(0) {
            output.push("ONLY".to_owned());
        }

        match n.relpersistence.as_deref() {
            Some("u") => output.push("UNLOGGED".into()),
            Some("t") => output.push("TEMPORARY".into()),
            _ => {}
        }

        let name = match &n.schemaname {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&n.relname)),
            None => quote_ident(&n.relname),
        };
        output.push(name);

        if let Some(alias) = n.alias.as_deref() {
            output.push(self.deparse_node(alias, Context::None)?);
        }

        Ok(output.join(" "))
    }

    pub(crate) fn join_expr(&self, n: &JoinExpr) -> Result<String> {
        let mut output = vec![self.deparse_node(&n.larg, Context::None)?];

        if n.is_natural {
            output.push("NATURAL".into());
        }

        let join = match n.jointype {
            0 if n.quals.is_some() => "INNER JOIN",
            0 if !n.is_natural && n.using_clause.is_none() => "CROSS JOIN",
            0 => "JOIN",
            1 => "LEFT OUTER JOIN",
            2 => "FULL OUTER JOIN",
            3 => "RIGHT OUTER JOIN",
            _ => return Err(unhandled("JoinExpr", n)),
        };
        output.push(join.into());

        // a bare nested join on the right needs its own parens to keep
        // associativity
        let rarg = self.deparse_node(&n.rarg, Context::None)?;
        let wrap_rarg = matches!(&*n.rarg, Node::JoinExpr(inner) if inner.alias.is_none());
        output.push(if wrap_rarg { parens(&rarg) } else { rarg });

        if let Some(quals) = n.quals.as_deref() {
            output.push(format!("ON {}", self.deparse_node(quals, Context::None)?));
        }

        if let Some(using) = &n.using_clause {
            output.push(format!("USING ({})", self.quoted_list(using, ", ")?));
        }

        let mut result = output.join(" ");
        if matches!(&*n.rarg, Node::JoinExpr(_)) || n.alias.is_some() {
            result = parens(&result);
        }

        match n.alias.as_deref() {
            Some(alias) => Ok(format!(
                "{result} {}",
                self.deparse_node(alias, Context::None)?
            )),
            None => Ok(result),
        }
    }

    pub(crate) fn range_subselect(&self, n: &RangeSubselect) -> Result<String> {
        let mut output = Vec::new();
        if n.lateral {
            output.push("LATERAL".to_owned());
        }
        output.push(parens(&self.deparse_node(&n.subquery, Context::None)?));
        if let Some(alias) = n.alias.as_deref() {
            output.push(self.deparse_node(alias, Context::None)?);
        }
        Ok(output.join(" "))
    }

    pub(crate) fn range_function(&self, n: &RangeFunction) -> Result<String> {
        let mut output = Vec::new();

        if n.lateral {
            output.push("LATERAL".to_owned());
        }

        let calls = n
            .functions
            .iter()
            .map(|(call, coldefs)| {
                let rendered = self.deparse_node(call, Context::None)?;
                match coldefs.as_deref() {
                    Some(defs) if !defs.is_empty() => {
                        Ok(format!("{rendered} AS ({})", self.list(defs)?))
                    }
                    _ => Ok(rendered),
                }
            })
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        output.push(if n.is_rowsfrom {
            format!("ROWS FROM ({calls})")
        } else {
            calls
        });

        if n.ordinality {
            output.push("WITH ORDINALITY".into());
        }

        if let Some(alias) = n.alias.as_deref() {
            output.push(self.deparse_node(alias, Context::None)?);
        }

        if let Some(coldefs) = &n.coldeflist {
            let defs = parens(&self.list(coldefs)?);
            if n.alias.is_some() {
                output.push(defs);
            } else {
                output.push(format!("AS {defs}"));
            }
        }

        Ok(output.join(" "))
    }

    pub(crate) fn range_table_sample(&self, n: &RangeTableSample) -> Result<String> {
        let method = n
            .method
            .first()
            .map(|m| self.deparse_node(m, Context::None))
            .transpose()?
            .ok_or_else(|| unhandled("RangeTableSample", n))?;

        let mut output = vec![
            self.deparse_node(&n.relation, Context::None)?,
            "TABLESAMPLE".into(),
            method,
        ];

        if let Some(args) = &n.args {
            output.push(parens(&self.list(args)?));
        }

        if let Some(repeatable) = n.repeatable.as_deref() {
            output.push(format!(
                "REPEATABLE({})",
                self.deparse_node(repeatable, Context::None)?
            ));
        }

        Ok(output.join(" "))
    }

    pub(crate) fn alias(&self, n: &Alias) -> Result<String> {
        match &n.colnames {
            // the column-name form keeps the alias and column names bare
            Some(columns) => Ok(format!("AS {}({})", n.aliasname, self.list(columns)?)),
            None => Ok(format!("AS {}", quote_ident(&n.aliasname))),
        }
    }

    pub(crate) fn column_def(&self, n: &ColumnDef) -> Result<String> {
        let mut output = vec![
            quote_ident(&n.colname),
            self.deparse_node(&n.type_name, Context::None)?,
        ];

        if let Some(default) = n.raw_default.as_deref() {
            output.push(format!(
                "USING {}",
                self.deparse_node(default, Context::None)?
            ));
        }

        if let Some(constraints) = &n.constraints {
            output.push(self.deparse_nodes(constraints, Context::None)?.join(" "));
        }

        Ok(join_compact(output, " "))
    }
}
