//! Human-readable messages from backend error bodies.

use serde_json::Value;

/// Shown when nothing useful can be extracted.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Extract a message from an error response body.
///
/// Precedence: a JSON string body, then the `error` field (with `details`
/// appended when present), then `detail`, then the whole JSON body in compact
/// form. Non-JSON bodies are returned as-is.
///
/// ```
/// use stockroom_core::api::error_message;
///
/// assert_eq!(error_message(r#"{"error": "Not enough stock available."}"#), "Not enough stock available.");
/// assert_eq!(error_message(r#"{"detail": "Not found."}"#), "Not found.");
/// ```
#[must_use]
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return UNKNOWN_ERROR.to_string();
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };

    match &value {
        Value::String(message) => message.clone(),
        Value::Object(fields) => {
            if let Some(error) = fields.get("error") {
                let mut message = text_of(error);
                if let Some(details) = fields.get("details").filter(|d| !d.is_null()) {
                    message = format!("{message} ({})", text_of(details));
                }
                message
            } else if let Some(detail) = fields.get("detail") {
                text_of(detail)
            } else {
                value.to_string()
            }
        }
        _ => value.to_string(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_wins() {
        assert_eq!(
            error_message(r#"{"error": "Quantity must be positive.", "detail": "ignored"}"#),
            "Quantity must be positive."
        );
    }

    #[test]
    fn test_error_with_details() {
        assert_eq!(
            error_message(r#"{"error": "Internal server error.", "details": "db down"}"#),
            "Internal server error. (db down)"
        );
    }

    #[test]
    fn test_detail_field() {
        assert_eq!(
            error_message(r#"{"detail": "Method \"GET\" not allowed."}"#),
            "Method \"GET\" not allowed."
        );
    }

    #[test]
    fn test_validation_errors_fall_back_to_json() {
        assert_eq!(
            error_message(r#"{"ProductCode": ["products with this ProductCode already exists."]}"#),
            r#"{"ProductCode":["products with this ProductCode already exists."]}"#
        );
    }

    #[test]
    fn test_plain_text_and_empty() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), UNKNOWN_ERROR);
        assert_eq!(error_message(r#""just a string""#), "just a string");
    }
}
