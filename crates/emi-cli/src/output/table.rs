use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell, is_record_array, result_of};

/// Format output as tables using the tabled crate.
///
/// Scalars (including nested ones, as dotted paths) go into one
/// Field/Value table; each array of records gets a table of its own.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    let mut rows: Vec<(String, String)> = Vec::new();
    let mut sections: Vec<(String, &[Value])> = Vec::new();
    match result {
        Value::Array(arr) => sections.push((String::new(), arr.as_slice())),
        other => collect("", other, &mut rows, &mut sections),
    }

    if !rows.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &rows {
            builder.push_record([key.as_str(), val.as_str()]);
        }
        println!("{}", Table::from(builder));
    }

    for (name, records) in sections {
        if !name.is_empty() {
            println!("\n{name}:");
        }
        print_records(records);
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

fn collect<'a>(
    prefix: &str,
    value: &'a Value,
    rows: &mut Vec<(String, String)>,
    sections: &mut Vec<(String, &'a [Value])>,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect(&path, val, rows, sections);
            }
        }
        Value::Array(arr) if is_record_array(value) => {
            sections.push((prefix.to_string(), arr.as_slice()));
        }
        scalar => rows.push((prefix.to_string(), cell(scalar))),
    }
}

fn print_records(records: &[Value]) {
    let Some(Value::Object(first)) = records.first() else {
        for item in records {
            println!("{}", cell(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in records {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}
