//! Change summaries for audit logging
//!
//! Records are flat, so a summary lists the top-level fields whose values
//! differ between the before and after snapshots.

use serde_json::Value;

/// Maximum characters of a string value shown in a summary
const MAX_SHOWN_CHARS: usize = 50;

/// List the changed top-level fields as `field: old -> new`
pub fn changed_fields(before: &Value, after: &Value) -> Vec<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return if before == after {
            Vec::new()
        } else {
            vec![format!("{} -> {}", format_value(before), format_value(after))]
        };
    };

    let mut changes: Vec<String> = before_obj
        .iter()
        .filter_map(|(key, old)| match after_obj.get(key) {
            Some(new) if new != old => Some(format!(
                "{}: {} -> {}",
                key,
                format_value(old),
                format_value(new)
            )),
            Some(_) => None,
            None => Some(format!("{}: {} -> (removed)", key, format_value(old))),
        })
        .collect();

    changes.extend(
        after_obj
            .iter()
            .filter(|(key, _)| !before_obj.contains_key(*key))
            .map(|(key, new)| format!("{}: (added) -> {}", key, format_value(new))),
    );

    changes
}

/// One-line summary of the changes, or `None` if nothing changed
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = changed_fields(before, after);
    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Format a JSON value for human-readable display
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > MAX_SHOWN_CHARS => {
            let head: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}
