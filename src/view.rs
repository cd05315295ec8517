//! Pure projection of `SessionState` into what the user sees.
//!
//! `render` holds no state of its own; the session calls it after every
//! committed mutation and hands the result to observers.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::controller::upload::FALLBACK_FILE_NAME;
use crate::state::log::{MessageId, Sender};
use crate::state::{Phase, SessionState};

/// One transcript line as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryView {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub entries: Vec<EntryView>,
    pub phase: Phase,
    /// Shown while an upload is in flight.
    pub indexing_indicator: bool,
    /// File name of the indexed document, shown once indexing succeeded.
    pub indexed_indicator: Option<String>,
    /// Shown while a query is in flight.
    pub answering_indicator: bool,
    pub submit_enabled: bool,
    pub file_select_enabled: bool,
    pub draft: String,
}

#[must_use]
pub fn render(state: &SessionState) -> ViewModel {
    let entries = state
        .messages()
        .all()
        .iter()
        .map(|m| EntryView { id: m.id(), sender: m.sender(), text: m.text().to_owned() })
        .collect();

    let indexed_indicator = (state.is_indexed() && !state.is_indexing())
        .then(|| state.indexed_file_name().unwrap_or(FALLBACK_FILE_NAME).to_owned());

    ViewModel {
        entries,
        phase: state.phase(),
        indexing_indicator: state.is_indexing(),
        indexed_indicator,
        answering_indicator: state.is_querying(),
        submit_enabled: !state.draft_input().trim().is_empty() && !state.is_querying(),
        file_select_enabled: !state.is_indexing(),
        draft: state.draft_input().to_owned(),
    }
}
