//! RAG service types: replies, wire parsing, errors, and the service trait.
//!
//! Parsing is kept in free functions over the raw body text so the HTTP
//! client stays a thin wrapper and the rules are testable without a server.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::document::Document;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by RAG service calls.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// The request never reached the server or no response came back.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    /// Success status, but the body was not what the endpoint promises.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl RagError {
    /// Short, user-facing description of the failure. Transport and parse
    /// details stay in the logs.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Status { message: Some(message), .. } if !message.trim().is_empty() => message.trim().to_owned(),
            Self::Status { status, .. } => format!("server responded with status {status}"),
            Self::Transport(_) => "could not reach the document service".to_owned(),
            Self::Malformed(_) => "unexpected response from the document service".to_owned(),
            Self::HttpClientBuild(_) => "HTTP client unavailable".to_owned(),
        }
    }
}

// =============================================================================
// REPLIES
// =============================================================================

/// Successful indexing response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReply {
    /// Identifier of the indexed file, when the service reports one.
    pub source_file: Option<String>,
}

/// Successful answer response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryReply {
    pub answer: String,
}

// =============================================================================
// WIRE
// =============================================================================

#[derive(Serialize)]
pub(crate) struct QueryBody<'a> {
    pub query: &'a str,
}

/// Parse a 2xx body from the upload endpoint.
///
/// The body must be a JSON object. `sourceFile` is optional; a missing or
/// blank value yields `source_file: None`.
///
/// # Errors
///
/// Returns [`RagError::Malformed`] if the body is not a JSON object or
/// `sourceFile` is present with a non-string value.
pub fn parse_upload_response(text: &str) -> Result<UploadReply, RagError> {
    let value = parse_object(text)?;
    let source_file = match value.get("sourceFile") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) if name.trim().is_empty() => None,
        Some(Value::String(name)) => Some(name.clone()),
        Some(_) => return Err(RagError::Malformed("`sourceFile` is not a string".into())),
    };
    Ok(UploadReply { source_file })
}

/// Parse a 2xx body from the query endpoint.
///
/// # Errors
///
/// Returns [`RagError::Malformed`] if the body is not a JSON object or has
/// no string `answer` field.
pub fn parse_query_response(text: &str) -> Result<QueryReply, RagError> {
    let value = parse_object(text)?;
    let answer = value
        .get("answer")
        .and_then(Value::as_str)
        .ok_or_else(|| RagError::Malformed("missing `answer` field".into()))?;
    Ok(QueryReply { answer: answer.to_owned() })
}

/// Extract the `error` field from a failure body, if there is one.
#[must_use]
pub fn parse_error_message(text: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return None;
    };
    value
        .get("error")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

fn parse_object(text: &str) -> Result<Value, RagError> {
    let value = serde_json::from_str::<Value>(text).map_err(|e| RagError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(RagError::Malformed("expected a JSON object".into()));
    }
    Ok(value)
}

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// The two operations the client needs from the RAG backend. Enables mocking
/// in tests.
#[async_trait]
pub trait RagService: Send + Sync {
    /// Upload a document for indexing.
    ///
    /// # Errors
    ///
    /// Returns a [`RagError`] on transport failure, non-success status, or a
    /// malformed body.
    async fn upload_document(&self, document: &Document) -> Result<UploadReply, RagError>;

    /// Ask a question about the indexed document.
    ///
    /// # Errors
    ///
    /// Returns a [`RagError`] on transport failure, non-success status, or a
    /// body without an `answer`.
    async fn query(&self, query: &str) -> Result<QueryReply, RagError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
