use serde_json::Value;

use super::format_value;

/// Print just the level payment, or the first result field if absent.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(payment) = map.get("level_payment").filter(|v| !v.is_null()) {
            return format_value(payment);
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_value(val));
        }
    }

    format_value(result_obj)
}
