use serde_json::Value;

use super::{cell, result_of};

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 4] = ["emi", "formatted", "principal", "summary"];

/// Print just the key answer from the output.
///
/// Series print one `tenure emi` line per point; otherwise the first
/// present priority field, else the first field of the result.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(result_of(value)) {
        println!("{line}");
    }
}

fn minimal_lines(result: &Value) -> Vec<String> {
    let Value::Object(map) = result else {
        return vec![cell(result)];
    };

    if let Some(Value::Array(points)) = map.get("points") {
        return points
            .iter()
            .map(|p| format!("{} {}", cell(&p["tenure_years"]), cell(&p["emi"])))
            .collect();
    }

    for key in PRIORITY_KEYS {
        match map.get(key) {
            Some(Value::Array(lines)) => return lines.iter().map(cell).collect(),
            Some(val) if !val.is_null() => return vec![cell(val)],
            _ => {}
        }
    }

    map.iter()
        .next()
        .map(|(key, val)| vec![format!("{key}: {}", cell(val))])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emi_wins() {
        let r = json!({"emi": "20827.76", "monthly_rate": "0.007"});
        assert_eq!(minimal_lines(&r), vec!["20827.76"]);
    }

    #[test]
    fn test_points_one_line_each() {
        let r = json!({"points": [{"tenure_years": 2, "emi": "10"}, {"tenure_years": 3, "emi": "7"}]});
        assert_eq!(minimal_lines(&r), vec!["2 10", "3 7"]);
    }

    #[test]
    fn test_summary_lines() {
        let r = json!({"inputs": {}, "summary": ["a", "b"]});
        assert_eq!(minimal_lines(&r), vec!["a", "b"]);
    }
}
