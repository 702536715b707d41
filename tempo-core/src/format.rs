use crate::{ArgumentTrace, Result, Value};
use std::fmt::Write;
use time::{Date, Time};

/// Options controlling how bound arguments are rendered into diagnostics.
///
/// An explicit per-connection struct, not a process-wide toggle.
#[derive(Debug, Default, Clone, Copy)]
pub struct DumpOptions {
    /// Prefix every traced argument with its value kind, e.g. `(int32)5`.
    pub show_type_hints: bool,
}

/// Renders one bound value into the display string stored in the argument
/// trace.
///
/// Formatting failures never reach the caller of a bind: the tracer logs them
/// and falls back to the value's plain display form, binding correctness does
/// not depend on display formatting.
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: &Value) -> Result<String>;
}

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($out:ident, $value:expr) => {{
        let mut buffer = ryu::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

/// Formatter producing SQL-literal shaped output: quoted and escaped strings,
/// hex blobs, ISO dates. The default for every connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlLiteralFormatter;

impl SqlLiteralFormatter {
    fn write_value(&self, out: &mut String, value: &Value) {
        if value.is_null() {
            out.push_str("NULL");
            return;
        }
        match value {
            Value::Boolean(Some(v)) => out.push_str(["false", "true"][*v as usize]),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(out, *v),
            Value::Float64(Some(v)) => write_float!(out, *v),
            Value::Decimal(Some(v)) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v)) | Value::Clob(Some(v)) => self.write_string(out, v),
            Value::Blob(Some(v)) => {
                out.push_str("'\\x");
                out.push_str(&hex::encode_upper(v.as_ref()));
                out.push('\'');
            }
            Value::Date(Some(v)) => {
                out.push('\'');
                self.write_date(out, v);
                out.push('\'');
            }
            Value::Time(Some(v)) => {
                out.push('\'');
                self.write_time(out, v);
                out.push('\'');
            }
            Value::Timestamp(Some(v)) => {
                out.push('\'');
                self.write_date(out, &v.date());
                out.push(' ');
                self.write_time(out, &v.time());
                out.push('\'');
            }
            Value::TimestampWithTimezone(Some(v)) => {
                out.push('\'');
                self.write_date(out, &v.date());
                out.push(' ');
                self.write_time(out, &v.time());
                let _ = write!(
                    out,
                    "{:+03}:{:02}",
                    v.offset().whole_hours(),
                    v.offset().whole_minutes().unsigned_abs() % 60,
                );
                out.push('\'');
            }
            Value::Uuid(Some(v)) => drop(write!(out, "'{}'", v)),
            Value::List(Some(v), ..) => {
                out.push('[');
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, item);
                }
                out.push(']');
            }
            _ => out.push_str("NULL"),
        }
    }

    fn write_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == '\'' {
                out.push_str(&value[position..i]);
                out.push_str("''");
                position = i + 1;
            } else if c == '\n' {
                out.push_str(&value[position..i]);
                out.push_str("\\n");
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
        out.push('\'');
    }

    fn write_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day(),
        );
    }

    fn write_time(&self, out: &mut String, value: &Time) {
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            value.hour(),
            value.minute(),
            value.second(),
        );
        if value.nanosecond() > 0 {
            let _ = write!(out, ".{:03}", value.millisecond());
        }
    }
}

impl ValueFormatter for SqlLiteralFormatter {
    fn format(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, value);
        Ok(out)
    }
}

/// Reconstruct the logical SQL with each `?` placeholder replaced, in order,
/// by its traced argument.
///
/// A placeholder with no trace entry renders as a literal `?`, which covers
/// unbound parameters, cleared parameters and gaps left by out-of-order
/// binding alike. The output is for logs only and is never re-parsed or
/// re-executed.
pub fn dumped_sql(sql: &str, trace: &ArgumentTrace) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut argument = 0;
    let mut position = 0;
    while let Some(found) = sql[position..].find('?') {
        let found = position + found;
        out.push_str(&sql[position..found]);
        match trace.get(argument) {
            Some(text) => out.push_str(&text),
            None => out.push('?'),
        }
        argument += 1;
        position = found + 1;
    }
    out.push_str(&sql[position..]);
    out
}
