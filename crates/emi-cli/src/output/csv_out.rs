use serde_json::Value;
use std::io::{self, Write};

use super::{cell, is_record_array, result_of};

/// Write output as CSV to stdout.
///
/// The first array of records found in the result (a series or chart
/// points) becomes the CSV body; otherwise a two-column field,value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = result_of(value);
    let written = match first_records(result) {
        Some(records) => write_records(&mut wtr, records),
        None => write_fields(&mut wtr, result),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        log::error!("CSV output failed: {e}");
    }
}

fn first_records(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(arr) if is_record_array(value) => Some(arr.as_slice()),
        Value::Object(map) => map.values().find_map(first_records),
        _ => None,
    }
}

fn write_records<W: Write>(wtr: &mut csv::Writer<W>, records: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = records.first() else {
        return Ok(());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;

    for item in records {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(cell).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

fn write_fields<W: Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    match value {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &cell(val)])?;
            }
        }
        other => wtr.write_record([cell(other)])?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        match first_records(value) {
            Some(records) => write_records(&mut wtr, records).unwrap(),
            None => write_fields(&mut wtr, value).unwrap(),
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_series_points_become_rows() {
        let value = json!({
            "points": [
                {"emi": "1090936.19", "tenure_years": 2},
                {"emi": "758398.01", "tenure_years": 3}
            ]
        });
        assert_eq!(
            render(&value),
            "emi,tenure_years\n1090936.19,2\n758398.01,3\n"
        );
    }

    #[test]
    fn test_flat_result_is_field_value() {
        let value = json!({"emi": "20827.76", "tenure_months": 240});
        assert_eq!(render(&value), "field,value\nemi,20827.76\ntenure_months,240\n");
    }
}
