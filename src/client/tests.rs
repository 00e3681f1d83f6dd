//! Tests for the prompt-mode client.

use super::http::format_http_error;
use super::*;

#[test]
fn test_format_http_error_with_details() {
    let body = r#"{"error":"invalid_json","details":"expected value at line 1"}"#;
    assert_eq!(
        format_http_error(400, body),
        "invalid_json: expected value at line 1"
    );
}

#[test]
fn test_format_http_error_without_details() {
    assert_eq!(format_http_error(404, r#"{"error":"not_found"}"#), "not_found");
    assert_eq!(format_http_error(502, "  "), "HTTP 502");
    assert_eq!(format_http_error(500, "upstream exploded"), "upstream exploded");
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = HttpPromptModeClient::new("http://127.0.0.1:9621/");
    assert_eq!(client.base_url(), "http://127.0.0.1:9621");
}

#[test]
fn test_blank_token_is_not_sent() {
    let client = HttpPromptModeClient::new("http://localhost").with_token(Some("  "));
    assert!(format!("{:?}", client).contains("auth: false"));
    let client = client.with_token(Some("abc"));
    assert!(format!("{:?}", client).contains("auth: true"));
}

#[test]
fn test_unreachable_service_is_a_transport_error() {
    // Port 9 (discard) is closed on test machines; connection is refused quickly.
    let client = HttpPromptModeClient::new("http://127.0.0.1:9");
    match client.get_prompt_mode() {
        Err(ServiceError::Transport(_)) => {}
        other => panic!("Expected transport error, got {:?}", other),
    }
}

#[test]
fn test_service_error_messages() {
    let err = ServiceError::Status {
        code: 401,
        message: "unauthorized".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Prompt-mode service returned HTTP 401: unauthorized"
    );
}
