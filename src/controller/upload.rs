//! Upload controller: select file → index it → report indexed or failed.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::document::Document;
use crate::net::types::{RagError, UploadReply};
use crate::state::SessionState;
use crate::state::log::Sender;
use crate::state::request::{RequestTicket, Resolution};

/// Shown as the indexed file name when neither the service nor the local
/// file provides one.
pub const FALLBACK_FILE_NAME: &str = "document";

/// Identity of one upload plus what is needed to resolve it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadTicket {
    pub(crate) request: RequestTicket,
    pub(crate) file_name: String,
}

impl UploadTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.request.seq()
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// An upload the caller must issue exactly once.
#[derive(Debug)]
pub struct UploadRequest {
    pub ticket: UploadTicket,
    pub document: Document,
}

/// Start indexing `document`.
///
/// Resets the session optimistically before any network traffic: the log is
/// cleared and the indexed flag dropped. Any upload still in flight becomes
/// stale.
pub fn select_file(state: &mut SessionState, document: Document) -> UploadRequest {
    let request = state.uploads.issue();
    state.messages.clear();
    state.is_indexing = true;
    state.is_indexed = false;
    state.indexed_file_name = None;
    state.last_error = None;

    tracing::info!(seq = request.seq(), file = document.file_name(), bytes = document.len(), "upload started");
    let ticket = UploadTicket { request, file_name: document.file_name().to_owned() };
    UploadRequest { ticket, document }
}

/// Apply the result of the upload identified by `ticket`.
pub fn apply_upload(
    state: &mut SessionState,
    ticket: &UploadTicket,
    result: Result<UploadReply, RagError>,
) -> Resolution {
    if !state.uploads.settle(ticket.request) {
        tracing::debug!(seq = ticket.seq(), latest = state.uploads.latest(), "stale upload result ignored");
        return Resolution::Stale;
    }

    state.is_indexing = false;
    match result {
        Ok(reply) => {
            let name = reply
                .source_file
                .unwrap_or_else(|| fallback_name(&ticket.file_name));
            tracing::info!(seq = ticket.seq(), file = %name, "document indexed");
            state.is_indexed = true;
            state.indexed_file_name = Some(name);
            state.last_error = None;
        }
        Err(error) => {
            tracing::warn!(seq = ticket.seq(), error = %error, "document indexing failed");
            let reason = error.reason();
            state.is_indexed = false;
            state
                .messages
                .append(Sender::Assistant, format!("Failed to index document: {reason}"));
            state.last_error = Some(reason);
        }
    }
    Resolution::Applied
}

fn fallback_name(local: &str) -> String {
    if local.trim().is_empty() {
        FALLBACK_FILE_NAME.to_owned()
    } else {
        local.to_owned()
    }
}
