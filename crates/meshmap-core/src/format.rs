// ── Display helpers ──

use chrono::Utc;
use serde_json::Value;

/// Strings the backend uses to mean "no value".
const PLACEHOLDERS: &[&str] = &["undefined", "null", "Unknown", "unknown", "N/A", "n/a"];

fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            s.is_empty() || PLACEHOLDERS.contains(&s.as_str()) || s.to_lowercase().contains("n/a")
        }
        _ => false,
    }
}

/// Replace missing or placeholder values with `default_text`.
///
/// Numbers always pass through, zero and negatives included.
pub fn format_value(value: Option<&Value>, default_text: &str) -> Value {
    match value {
        Some(v) if !is_placeholder(v) => v.clone(),
        _ => Value::String(default_text.to_owned()),
    }
}

/// [`format_value`], rendered as plain text for terminal output.
pub fn display_value(value: Option<&Value>, default_text: &str) -> String {
    match format_value(value, default_text) {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Elapsed time since `timestamp_ms` in its coarsest unit, e.g. `"5m ago"`.
pub fn time_ago(timestamp_ms: i64) -> String {
    time_ago_at(timestamp_ms, Utc::now().timestamp_millis())
}

/// [`time_ago`] against an explicit "now" (epoch milliseconds).
pub fn time_ago_at(timestamp_ms: i64, now_ms: i64) -> String {
    let seconds = now_ms.saturating_sub(timestamp_ms).max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        format!("{seconds}s ago")
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DASH: &str = "—";

    #[test]
    fn numbers_pass_through() {
        assert_eq!(format_value(Some(&json!(0)), DASH), json!(0));
        assert_eq!(format_value(Some(&json!(-12.5)), DASH), json!(-12.5));
    }

    #[test]
    fn placeholders_use_default() {
        assert_eq!(format_value(None, DASH), json!(DASH));
        assert_eq!(format_value(Some(&Value::Null), DASH), json!(DASH));
        for placeholder in ["", "undefined", "null", "Unknown", "unknown", "N/A", "n/a"] {
            assert_eq!(
                format_value(Some(&json!(placeholder)), DASH),
                json!(DASH),
                "{placeholder:?} should be replaced"
            );
        }
    }

    #[test]
    fn strings_containing_na_use_default() {
        assert_eq!(format_value(Some(&json!("Battery: N/A")), DASH), json!(DASH));
        assert_eq!(format_value(Some(&json!("n/A (offline)")), DASH), json!(DASH));
    }

    #[test]
    fn other_values_unchanged() {
        assert_eq!(format_value(Some(&json!("TBEAM")), DASH), json!("TBEAM"));
        assert_eq!(format_value(Some(&json!(false)), DASH), json!(false));
        assert_eq!(format_value(Some(&json!("NULL")), DASH), json!("NULL"));
    }

    #[test]
    fn display_value_renders_plain_text() {
        assert_eq!(display_value(Some(&json!("TBEAM")), "-"), "TBEAM");
        assert_eq!(display_value(Some(&json!(3.7)), "-"), "3.7");
        assert_eq!(display_value(Some(&json!("unknown")), "-"), "-");
    }

    #[test]
    fn time_ago_units() {
        let now = 1_700_000_000_000;
        assert_eq!(time_ago_at(now - 59_999, now), "59s ago");
        assert_eq!(time_ago_at(now - 60_000, now), "1m ago");
        assert_eq!(time_ago_at(now - 65 * 60_000, now), "1h ago");
        assert_eq!(time_ago_at(now - 23 * 3_600_000 - 59 * 60_000, now), "23h ago");
        assert_eq!(time_ago_at(now - 49 * 3_600_000, now), "2d ago");
    }

    #[test]
    fn time_ago_future_clamps_to_zero() {
        assert_eq!(time_ago_at(2_000, 1_000), "0s ago");
    }
}
