//! HTTP client for the RAG service.
//!
//! Thin reqwest wrapper around the two endpoints. Status handling lives in
//! `send`; body parsing lives in `types` so it can be tested without I/O.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::types::{
    QueryBody, QueryReply, RagError, RagService, UploadReply, parse_error_message, parse_query_response,
    parse_upload_response,
};
use crate::config::ClientConfig;
use crate::document::{Document, PDF_CONTENT_TYPE};

/// Multipart field carrying the document bytes.
const UPLOAD_FIELD: &str = "file";

pub struct HttpRagClient {
    http: reqwest::Client,
    upload_url: String,
    query_url: String,
}

impl HttpRagClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::HttpClientBuild`] if reqwest cannot build the client.
    pub fn new(config: &ClientConfig) -> Result<Self, RagError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| RagError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, upload_url: config.upload_url(), query_url: config.query_url() })
    }

    /// Send a request and return the body text of a 2xx response.
    async fn send(&self, request: reqwest::RequestBuilder, endpoint: &str) -> Result<String, RagError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "rag request failed");
            RagError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RagError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = parse_error_message(&text);
            tracing::warn!(endpoint, status = status.as_u16(), message = ?message, "rag request rejected");
            return Err(RagError::Status { status: status.as_u16(), message });
        }
        Ok(text)
    }
}

#[async_trait]
impl RagService for HttpRagClient {
    async fn upload_document(&self, document: &Document) -> Result<UploadReply, RagError> {
        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_owned())
            .mime_str(PDF_CONTENT_TYPE)
            .map_err(|e| RagError::HttpClientBuild(e.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(
            url = %self.upload_url,
            file = document.file_name(),
            bytes = document.len(),
            "uploading document"
        );
        let text = self
            .send(self.http.post(&self.upload_url).multipart(form), "upload")
            .await?;
        parse_upload_response(&text)
    }

    async fn query(&self, query: &str) -> Result<QueryReply, RagError> {
        tracing::debug!(url = %self.query_url, chars = query.len(), "sending query");
        let text = self
            .send(self.http.post(&self.query_url).json(&QueryBody { query }), "query")
            .await?;
        parse_query_response(&text)
    }
}
