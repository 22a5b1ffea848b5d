pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar for table/csv cells.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Flatten nested objects into dotted keys, leaving arrays of objects aside.
///
/// Returns `(scalar fields, tables)` where each table is `(key, rows)`.
pub fn split_result<'a>(
    map: &'a Map<String, Value>,
) -> (Vec<(String, &'a Value)>, Vec<(String, &'a [Value])>) {
    let mut fields = Vec::new();
    let mut tables = Vec::new();
    flatten_into("", map, &mut fields, &mut tables);
    (fields, tables)
}

fn flatten_into<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    fields: &mut Vec<(String, &'a Value)>,
    tables: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => flatten_into(&full, inner, fields, tables),
            Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
                tables.push((full, items.as_slice()))
            }
            _ => fields.push((full, val)),
        }
    }
}
