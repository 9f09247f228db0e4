use serde_json::Value;

use super::flatten_fields;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields (at any nesting depth) in
/// order of priority, then fall back to the first field.
pub fn print_minimal(value: &Value) {
    // Try to extract the "result" envelope
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "break_even_months",
        "months_saved",
        "monthly_payment",
        "monthly_principal_and_interest",
        "total_interest",
    ];

    if result_obj.is_object() {
        let mut fields = Vec::new();
        flatten_fields("", result_obj, &mut fields);

        for key in &priority_keys {
            let hit = fields.iter().find(|(path, val)| {
                !val.is_null() && path.rsplit('.').next() == Some(*key)
            });
            if let Some((_, val)) = hit {
                println!("{}", format_minimal(val));
                return;
            }
        }

        // Fall back to first field
        if let Some((key, val)) = fields.first() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    // Not an object, just print directly
    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
