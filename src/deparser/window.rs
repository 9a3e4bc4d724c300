//! Window definitions and frame clauses

use crate::ast::WindowDef;
use crate::deparser::utils::parens;
use crate::deparser::{Context, Deparser};
use crate::error::Result;

// Frame-option bits, one per syntactic element of the frame clause
const FRAMEOPTION_NONDEFAULT: i32 = 0x1;
const FRAMEOPTION_RANGE: i32 = 0x2;
const FRAMEOPTION_ROWS: i32 = 0x4;
const FRAMEOPTION_BETWEEN: i32 = 0x8;
const FRAMEOPTION_START_UNBOUNDED_PRECEDING: i32 = 0x10;
const FRAMEOPTION_END_UNBOUNDED_PRECEDING: i32 = 0x20;
const FRAMEOPTION_START_UNBOUNDED_FOLLOWING: i32 = 0x40;
const FRAMEOPTION_END_UNBOUNDED_FOLLOWING: i32 = 0x80;
const FRAMEOPTION_START_CURRENT_ROW: i32 = 0x100;
const FRAMEOPTION_END_CURRENT_ROW: i32 = 0x200;
const FRAMEOPTION_START_VALUE_PRECEDING: i32 = 0x400;
const FRAMEOPTION_END_VALUE_PRECEDING: i32 = 0x800;
const FRAMEOPTION_START_VALUE_FOLLOWING: i32 = 0x1000;
const FRAMEOPTION_END_VALUE_FOLLOWING: i32 = 0x2000;

impl Deparser<'_> {
    /// Render a window definition.
    ///
    /// Inside a WINDOW clause (`Context::Window`) only the body is wanted;
    /// after OVER the body is parenthesized and a bare name stands alone.
    pub(crate) fn window_def(&self, n: &WindowDef, ctx: Context) -> Result<String> {
        let mut parts = Vec::new();

        if let Some(partition) = &n.partition_clause {
            parts.push(format!(
                "PARTITION BY {}",
                self.deparse_nodes(partition, Context::None)?.join(", ")
            ));
        }

        if let Some(order) = &n.order_clause {
            parts.push(format!(
                "ORDER BY {}",
                self.deparse_nodes(order, Context::Sort)?.join(", ")
            ));
        }

        let frame = self.frame_clause(n)?;
        if !frame.is_empty() {
            parts.push(frame);
        }

        let body = parts.join(" ");

        if ctx == Context::Window {
            return Ok(body);
        }

        match (&n.name, body.is_empty()) {
            (Some(name), true) => Ok(name.clone()),
            (Some(name), false) => Ok(format!("{name} {}", parens(&body))),
            (None, _) => Ok(parens(&body)),
        }
    }

    /// Render the frame clause from its option bits, or "" for the default
    /// frame.
    fn frame_clause(&self, n: &WindowDef) -> Result<String> {
        let options = n.frame_options;
        if options & FRAMEOPTION_NONDEFAULT == 0 {
            return Ok(String::new());
        }

        let mut output = Vec::new();

        if let Some(refname) = &n.refname {
            output.push(refname.clone());
        }

        if options & FRAMEOPTION_RANGE != 0 {
            output.push("RANGE".into());
        }
        if options & FRAMEOPTION_ROWS != 0 {
            output.push("ROWS".into());
        }

        let between = options & FRAMEOPTION_BETWEEN != 0;
        if between {
            output.push("BETWEEN".into());
        }

        if options & FRAMEOPTION_START_UNBOUNDED_PRECEDING != 0 {
            output.push("UNBOUNDED PRECEDING".into());
        }
        if options & FRAMEOPTION_START_UNBOUNDED_FOLLOWING != 0 {
            output.push("UNBOUNDED FOLLOWING".into());
        }
        if options & FRAMEOPTION_START_CURRENT_ROW != 0 {
            output.push("CURRENT ROW".into());
        }
        if let Some(offset) = n.start_offset.as_deref() {
            let rendered = self.deparse_node(offset, Context::None)?;
            if options & FRAMEOPTION_START_VALUE_PRECEDING != 0 {
                output.push(format!("{rendered} PRECEDING"));
            }
            if options & FRAMEOPTION_START_VALUE_FOLLOWING != 0 {
                output.push(format!("{rendered} FOLLOWING"));
            }
        }

        if between {
            output.push("AND".into());

            if options & FRAMEOPTION_END_UNBOUNDED_PRECEDING != 0 {
                output.push("UNBOUNDED PRECEDING".into());
            }
            if options & FRAMEOPTION_END_UNBOUNDED_FOLLOWING != 0 {
                output.push("UNBOUNDED FOLLOWING".into());
            }
            if options & FRAMEOPTION_END_CURRENT_ROW != 0 {
                output.push("CURRENT ROW".into());
            }
            if let Some(offset) = n.end_offset.as_deref() {
                let rendered = self.deparse_node(offset, Context::None)?;
                if options & FRAMEOPTION_END_VALUE_PRECEDING != 0 {
                    output.push(format!("{rendered} PRECEDING"));
                }
                if options & FRAMEOPTION_END_VALUE_FOLLOWING != 0 {
                    output.push(format!("{rendered} FOLLOWING"));
                }
            }
        }

        Ok(output.join(" "))
    }
}
