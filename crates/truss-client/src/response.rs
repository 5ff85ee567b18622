//! Response decoding: JSON-decode a success body into the response
//! record, or translate a failure body into a [`ClientError`] carrying
//! the HTTP status.

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

pub async fn decode_response<Res: DeserializeOwned>(response: reqwest::Response) -> Result<Res, ClientError> {
    let status = response.status().as_u16();
    if status < 400 {
        return response.json::<Res>().await.map_err(ClientError::from);
    }
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response.text().await.unwrap_or_default();
    let (status, message) = extract_error(&content_type, &body, status);
    Err(ClientError::Remote { status, message })
}

/// Pure decoding rule, kept separate from the async network call so it
/// can be exercised directly: plain text becomes the message verbatim; a
/// JSON string literal becomes its decoded value; a JSON object
/// resembling the structured error body yields its own `message`/
/// `status`; anything else falls back to a generic message at the
/// transport status.
fn extract_error(content_type: &str, body: &str, transport_status: u16) -> (u16, String) {
    if content_type.contains("json") {
        if let Ok(value) = serde_json::from_str::<Value>(body) {
            match value {
                Value::String(message) => return (transport_status, message),
                Value::Object(map) => {
                    if let Some(message) = map.get("message").and_then(Value::as_str) {
                        let status = map
                            .get("status")
                            .and_then(Value::as_u64)
                            .map(|n| n as u16)
                            .unwrap_or(transport_status);
                        return (status, message.to_string());
                    }
                }
                _ => {}
            }
        }
        (transport_status, format!("request failed with status {transport_status}"))
    } else if !body.trim().is_empty() {
        (transport_status, body.trim().to_string())
    } else {
        (transport_status, format!("request failed with status {transport_status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_body_becomes_the_message() {
        assert_eq!(
            extract_error("text/plain", "widget not found", 404),
            (404, "widget not found".to_string())
        );
    }

    #[test]
    fn json_string_literal_decodes_to_its_message() {
        assert_eq!(
            extract_error("application/json", "\"widget not found\"", 404),
            (404, "widget not found".to_string())
        );
    }

    #[test]
    fn structured_error_object_yields_its_own_status_and_message() {
        assert_eq!(
            extract_error("application/json", r#"{"message":"conflict","status":409}"#, 500),
            (409, "conflict".to_string())
        );
    }

    #[test]
    fn structured_error_object_without_status_falls_back_to_transport_status() {
        assert_eq!(
            extract_error("application/json", r#"{"message":"oops"}"#, 500),
            (500, "oops".to_string())
        );
    }

    #[test]
    fn unrecognized_json_body_falls_back_to_a_generic_message() {
        assert_eq!(
            extract_error("application/json", "42", 500),
            (500, "request failed with status 500".to_string())
        );
    }

    #[test]
    fn empty_body_falls_back_to_a_generic_message() {
        assert_eq!(extract_error("text/plain", "", 503), (503, "request failed with status 503".to_string()));
    }
}
