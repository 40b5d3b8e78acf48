use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::chart::{composition_rows, render_bar_chart};
use super::scalar_text;

/// Format output as tables using the tabled crate.
///
/// Scalars (and nested objects, flattened to dotted keys) go into one
/// Field/Value table. Lists of records get their own table below it, and a
/// `composition` list is followed by a bar chart.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => print_object(res_map),
        other => print_table(other),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

type Section<'a> = (String, &'a [Value]);

fn print_object(map: &Map<String, Value>) {
    let mut rows = Vec::new();
    let mut sections = Vec::new();
    for (key, val) in map {
        collect(key.clone(), val, &mut rows, &mut sections);
    }

    if !rows.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in rows {
            builder.push_record([key, val]);
        }
        println!("{}", Table::from(builder));
    }

    for (title, items) in sections {
        println!("\n{}:", title);
        print_array_table(items);
        if title == "composition" || title.ends_with(".composition") {
            println!();
            print!("{}", render_bar_chart(&composition_rows(items)));
        }
    }
}

/// Split a value into Field/Value rows and record-list sections.
fn collect<'a>(
    key: String,
    value: &'a Value,
    rows: &mut Vec<(String, String)>,
    sections: &mut Vec<Section<'a>>,
) {
    match value {
        Value::Object(map) => {
            for (child, val) in map {
                collect(format!("{}.{}", key, child), val, rows, sections);
            }
        }
        Value::Array(items) if is_record_list(items) => sections.push((key, items.as_slice())),
        other => rows.push((key, format_value(other))),
    }
}

fn is_record_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(arr) if is_record_list(arr) => arr
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .values()
            .filter(|v| !v.is_null())
            .map(format_value)
            .collect::<Vec<_>>()
            .join(" | "),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_flatten_and_lists_split_out() {
        let value = json!({
            "portfolio_type": "moderate",
            "outcome": {
                "status": "recommended",
                "composition": [
                    {"asset_class": "Large cap equity", "weight": 35},
                    {"asset_class": "Cash investments", "weight": 5}
                ]
            }
        });
        let mut rows = Vec::new();
        let mut sections = Vec::new();
        for (key, val) in value.as_object().unwrap() {
            collect(key.clone(), val, &mut rows, &mut sections);
        }
        assert_eq!(
            rows,
            vec![
                ("outcome.status".to_string(), "recommended".to_string()),
                ("portfolio_type".to_string(), "moderate".to_string()),
            ]
        );
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "outcome.composition");
        assert_eq!(sections[0].1.len(), 2);
    }

    #[test]
    fn test_format_value_for_option_lists() {
        let options = json!([
            {"number": 1, "label": "None", "points": 1},
            {"number": 2, "label": "Limited", "points": 3}
        ]);
        assert_eq!(format_value(&options), "None | 1 | 1\nLimited | 2 | 3");
        assert_eq!(format_value(&Value::Null), "-");
        assert_eq!(format_value(&json!([3, 4])), "3, 4");
    }
}
