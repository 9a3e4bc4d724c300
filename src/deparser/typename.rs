//! Type names, catalog-type conversion and interval field masks

use crate::ast::{Node, TypeName};
use crate::deparser::{Context, Deparser};
use crate::error::{unhandled, Error, Result};

/// Map an interval typmod bitmask to its field names.
///
/// The bit positions come from the datetime token table; 32767 marks the
/// unrestricted interval.
fn interval_fields(mask: i64) -> Option<&'static [&'static str]> {
    let fields: &[&str] = match mask {
        4 => &["year"],
        2 => &["month"],
        8 => &["day"],
        1024 => &["hour"],
        2048 => &["minute"],
        4096 => &["second"],
        6 => &["year", "month"],
        1032 => &["day", "hour"],
        3080 => &["day", "minute"],
        7176 => &["day", "second"],
        3072 => &["hour", "minute"],
        7168 => &["hour", "second"],
        6144 => &["minute", "second"],
        32767 => &[],
        _ => return None,
    };
    Some(fields)
}

/// Rewrite a pg_catalog internal type name to its SQL spelling.
fn convert_type_name(name: &str, size: Option<&str>) -> Result<String> {
    let converted = match name {
        // unsized bpchar keeps its catalog name so that `char 'c'` casts
        // survive a round trip
        "bpchar" if size.is_some() => "char",
        "bpchar" => "pg_catalog.bpchar",
        "varchar" => "varchar",
        "numeric" => "numeric",
        "bool" => "boolean",
        "int2" => "smallint",
        "int4" => "int",
        "int8" => "bigint",
        "real" | "float4" => "real",
        "float8" => "pg_catalog.float8",
        "text" => "pg_catalog.text",
        "date" => "pg_catalog.date",
        "time" => "time",
        "timetz" => "pg_catalog.timetz",
        "timestamp" => "timestamp",
        "timestamptz" => "pg_catalog.timestamptz",
        "interval" => "interval",
        "bit" => "bit",
        _ => {
            return Err(Error::MalformedNode {
                kind: "TypeName",
                message: format!("unhandled data type: {name}"),
            })
        }
    };
    Ok(converted.to_owned())
}

fn with_size(name: String, size: Option<&str>) -> String {
    match size {
        Some(size) => format!("{name}({size})"),
        None => name,
    }
}

impl Deparser<'_> {
    pub(crate) fn type_name(&self, n: &TypeName) -> Result<String> {
        if n.names.last().and_then(Node::as_string) == Some("interval") {
            return self.interval_type(n);
        }

        let mut output = Vec::new();
        if n.setof {
            output.push("SETOF".to_owned());
        }

        let size = n
            .typmods
            .as_deref()
            .map(|mods| self.list(mods))
            .transpose()?;

        let mut rendered = self.type_body(n, size.as_deref())?;
        if n.array_bounds.is_some() {
            rendered.push_str("[]");
        }
        output.push(rendered);

        Ok(output.join(" "))
    }

    fn type_body(&self, n: &TypeName, size: Option<&str>) -> Result<String> {
        let mut names = self.deparse_nodes(&n.names, Context::None)?;

        // the internal single-byte char type prints in quotes
        if names.first().map(String::as_str) == Some("char") {
            names[0] = "\"char\"".into();
        }

        if names.first().map(String::as_str) != Some("pg_catalog") {
            return Ok(with_size(names.join("."), size));
        }

        let name = names.get(1).ok_or_else(|| unhandled("TypeName", n))?;
        Ok(with_size(convert_type_name(name, size)?, size))
    }

    /// Interval types carry their field range in a typmod bitmask rather
    /// than a size.
    fn interval_type(&self, n: &TypeName) -> Result<String> {
        let mut output = vec!["interval".to_owned()];

        if n.array_bounds.is_some() {
            output.push("[]".into());
        }

        if let Some(typmods) = n.typmods.as_deref() {
            let rendered = self.deparse_nodes(typmods, Context::None)?;
            let mask = interval_typmod(typmods.first());

            // interval(n) with the full field range is a bare precision
            let fields = if mask == Some(32767) && typmods.len() == 2 {
                let precision = interval_typmod(typmods.get(1))
                    .ok_or_else(|| unhandled("TypeName", n))?;
                vec![format!("({precision})")]
            } else {
                let mask = mask.ok_or_else(|| unhandled("TypeName", n))?;
                let fields = interval_fields(mask).ok_or_else(|| unhandled("TypeName", n))?;
                fields
                    .iter()
                    .map(|&field| {
                        if field == "second" && rendered.len() == 2 {
                            format!("second({})", rendered[1])
                        } else {
                            field.to_owned()
                        }
                    })
                    .collect()
            };

            output.push(fields.join(" to "));
        }

        Ok(output.join(" "))
    }
}

/// The integer payload of an `A_Const` typmod, if that is what it is.
fn interval_typmod(node: Option<&Node>) -> Option<i64> {
    match node {
        Some(Node::AConst(c)) => match &*c.val {
            Node::Integer(i) => Some(i.ival),
            _ => None,
        },
        _ => None,
    }
}
