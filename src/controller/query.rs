//! Query controller: submit question → await answer → append result.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use crate::net::types::{QueryReply, RagError};
use crate::state::SessionState;
use crate::state::log::Sender;
use crate::state::request::{RequestTicket, Resolution};

/// Assistant entry appended when a query fails for any reason.
pub const QUERY_FAILURE_NOTICE: &str = "Sorry, something went wrong while fetching the answer. Please try again.";

/// Identity of one query and the conversation it was asked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryTicket {
    pub(crate) request: RequestTicket,
    pub(crate) epoch: u64,
}

impl QueryTicket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.request.seq()
    }
}

/// A query the caller must issue exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryRequest {
    pub ticket: QueryTicket,
    pub query: String,
}

/// Replace the uncommitted query box text.
pub fn set_draft(state: &mut SessionState, text: impl Into<String>) {
    state.draft_input = text.into();
}

/// Submit `text` as a question.
///
/// No-op (returns `None`, state untouched) when the trimmed text is empty or
/// another query is still in flight. Indexing status is not checked.
pub fn submit_query(state: &mut SessionState, text: &str) -> Option<QueryRequest> {
    let query = text.trim();
    if query.is_empty() || state.is_querying {
        return None;
    }

    let request = state.queries.issue();
    let ticket = QueryTicket { request, epoch: state.epoch() };
    state.messages.append(Sender::User, query);
    state.draft_input.clear();
    state.is_querying = true;

    tracing::info!(seq = request.seq(), epoch = ticket.epoch, "query submitted");
    Some(QueryRequest { ticket, query: query.to_owned() })
}

/// Submit whatever is in the query box.
pub fn submit_draft(state: &mut SessionState) -> Option<QueryRequest> {
    let draft = state.draft_input.clone();
    submit_query(state, &draft)
}

/// Apply the result of the query identified by `ticket`.
pub fn apply_query(state: &mut SessionState, ticket: QueryTicket, result: Result<QueryReply, RagError>) -> Resolution {
    if !state.queries.settle(ticket.request) {
        tracing::debug!(seq = ticket.seq(), "stale query result ignored");
        return Resolution::Stale;
    }

    state.is_querying = false;

    if ticket.epoch != state.epoch() {
        tracing::info!(
            seq = ticket.seq(),
            epoch = ticket.epoch,
            current = state.epoch(),
            "answer for a cleared conversation dropped"
        );
        return Resolution::Discarded;
    }

    match result {
        Ok(reply) => {
            tracing::info!(seq = ticket.seq(), chars = reply.answer.len(), "answer received");
            state.messages.append(Sender::Assistant, reply.answer);
            state.last_error = None;
        }
        Err(error) => {
            tracing::warn!(seq = ticket.seq(), error = %error, "query failed");
            state.messages.append(Sender::Assistant, QUERY_FAILURE_NOTICE);
            state.last_error = Some(error.reason());
        }
    }
    Resolution::Applied
}
