use super::*;

// ===== upload =====

#[test]
fn upload_parse_source_file() {
    let json = serde_json::json!({ "sourceFile": "report.pdf" }).to_string();
    let reply = parse_upload_response(&json).unwrap();
    assert_eq!(reply.source_file.as_deref(), Some("report.pdf"));
}

#[test]
fn upload_parse_message_only_has_no_source_file() {
    let json = serde_json::json!({ "message": "Stored file 'report.pdf'." }).to_string();
    let reply = parse_upload_response(&json).unwrap();
    assert!(reply.source_file.is_none());
}

#[test]
fn upload_parse_blank_source_file_is_none() {
    let json = serde_json::json!({ "sourceFile": "  " }).to_string();
    assert!(parse_upload_response(&json).unwrap().source_file.is_none());
}

#[test]
fn upload_parse_non_string_source_file_is_malformed() {
    let json = serde_json::json!({ "sourceFile": 7 }).to_string();
    assert!(matches!(parse_upload_response(&json), Err(RagError::Malformed(_))));
}

#[test]
fn upload_parse_not_json_is_malformed() {
    assert!(matches!(parse_upload_response("<html>ok</html>"), Err(RagError::Malformed(_))));
}

#[test]
fn upload_parse_array_is_malformed() {
    assert!(matches!(parse_upload_response("[]"), Err(RagError::Malformed(_))));
}

// ===== query =====

#[test]
fn query_parse_answer() {
    let json = serde_json::json!({ "answer": "42" }).to_string();
    assert_eq!(parse_query_response(&json).unwrap().answer, "42");
}

#[test]
fn query_parse_missing_answer() {
    let json = serde_json::json!({ "result": "42" }).to_string();
    let err = parse_query_response(&json).unwrap_err();
    assert!(err.to_string().contains("missing `answer`"));
}

#[test]
fn query_parse_non_string_answer() {
    let json = serde_json::json!({ "answer": 42 }).to_string();
    assert!(matches!(parse_query_response(&json), Err(RagError::Malformed(_))));
}

#[test]
fn query_body_serializes_query_field() {
    let body = serde_json::to_value(QueryBody { query: "What is the total?" }).unwrap();
    assert_eq!(body, serde_json::json!({ "query": "What is the total?" }));
}

// ===== errors =====

#[test]
fn error_message_extracts_error_field() {
    let json = serde_json::json!({ "error": "No file uploaded" }).to_string();
    assert_eq!(parse_error_message(&json).as_deref(), Some("No file uploaded"));
}

#[test]
fn error_message_none_for_plain_text() {
    assert!(parse_error_message("Internal Server Error").is_none());
}

#[test]
fn reason_prefers_server_message() {
    let err = RagError::Status { status: 400, message: Some("PDF contains no extractable text".into()) };
    assert_eq!(err.reason(), "PDF contains no extractable text");
}

#[test]
fn reason_falls_back_to_status() {
    let err = RagError::Status { status: 500, message: None };
    assert_eq!(err.reason(), "server responded with status 500");
}

#[test]
fn reason_hides_transport_details() {
    let err = RagError::Transport("error sending request for url (http://127.0.0.1:1/): tcp connect".into());
    assert!(!err.reason().contains("tcp"));
    assert!(!err.reason().contains("127.0.0.1"));
}
