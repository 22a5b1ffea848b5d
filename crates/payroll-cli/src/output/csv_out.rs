use serde_json::Value;
use std::io;

use super::{format_scalar, split_result};

/// Write output as CSV to stdout.
///
/// A result with line tables (component rows, payslip lines) is written as
/// `section,<columns>` records; anything else as two-column `field,value`.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            let (fields, tables) = split_result(map);
            if tables.is_empty() {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in &fields {
                    let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
                }
            } else {
                write_sections(&mut wtr, &tables);
            }
        }
        Value::Array(arr) => write_sections(&mut wtr, &[(String::from("rows"), arr.as_slice())]),
        _ => {
            let _ = wtr.write_record([&format_scalar(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_sections(wtr: &mut csv::Writer<io::StdoutLock<'_>>, tables: &[(String, &[Value])]) {
    // Union of columns across sections, in first-seen order
    let mut headers: Vec<String> = Vec::new();
    for (_, rows) in tables {
        for row in rows.iter() {
            if let Value::Object(map) = row {
                for key in map.keys() {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
            }
        }
    }

    let mut header_record = vec!["section".to_string()];
    header_record.extend(headers.iter().cloned());
    let _ = wtr.write_record(&header_record);

    for (section, rows) in tables {
        for row in rows.iter() {
            if let Value::Object(map) = row {
                let mut record = vec![section.clone()];
                record.extend(
                    headers
                        .iter()
                        .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default()),
                );
                let _ = wtr.write_record(&record);
            }
        }
    }
}
