use serde_json::Value;

use super::scalar_text;

/// Keys tried in order; the first non-null one is printed.
const PRIORITY_KEYS: [&str; 5] = [
    "portfolio_type",
    "risk_tolerance_score",
    "time_horizon_score",
    "complete",
    "available",
];

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_text(value));
}

fn minimal_text(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return scalar_text(val);
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val));
        }
    }

    scalar_text(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_portfolio_type_wins() {
        let value = json!({"result": {
            "time_horizon_score": 11,
            "risk_tolerance_score": 28,
            "portfolio_type": "moderate"
        }});
        assert_eq!(minimal_text(&value), "moderate");
    }

    #[test]
    fn test_null_portfolio_falls_through_to_score() {
        let value = json!({"result": {
            "time_horizon_score": 2,
            "risk_tolerance_score": null,
            "portfolio_type": null
        }});
        assert_eq!(minimal_text(&value), "2");
    }

    #[test]
    fn test_unknown_shape_prints_first_field() {
        let value = json!({"questions": []});
        assert_eq!(minimal_text(&value), "questions: []");
    }
}
