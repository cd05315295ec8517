//! Session state shared by the upload and query controllers.
//!
//! DESIGN
//! ======
//! `SessionState` is the single source of truth for one chat session. It is
//! owned by whoever drives the session and handed by `&mut` to the
//! controllers, which are the only code allowed to mutate it. Readers get
//! accessors; the UI never sees raw fields.

pub mod log;
pub mod request;


use log::MessageLog;
use request::RequestTracker;

/// Coarse UI phase, derived from the flags. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Indexing,
    Indexed,
    Querying,
    Error,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Indexing => "indexing",
            Self::Indexed => "indexed",
            Self::Querying => "querying",
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub(crate) messages: MessageLog,
    pub(crate) indexed_file_name: Option<String>,
    pub(crate) is_indexed: bool,
    pub(crate) is_indexing: bool,
    pub(crate) is_querying: bool,
    pub(crate) draft_input: String,
    pub(crate) last_error: Option<String>,
    pub(crate) uploads: RequestTracker,
    pub(crate) queries: RequestTracker,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    #[must_use]
    pub fn indexed_file_name(&self) -> Option<&str> {
        self.indexed_file_name.as_deref()
    }

    #[must_use]
    pub fn is_indexed(&self) -> bool {
        self.is_indexed
    }

    #[must_use]
    pub fn is_indexing(&self) -> bool {
        self.is_indexing
    }

    #[must_use]
    pub fn is_querying(&self) -> bool {
        self.is_querying
    }

    #[must_use]
    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_querying {
            Phase::Querying
        } else if self.is_indexing {
            Phase::Indexing
        } else if self.last_error.is_some() {
            Phase::Error
        } else if self.is_indexed {
            Phase::Indexed
        } else {
            Phase::Idle
        }
    }

    /// Conversation epoch: the sequence number of the latest upload. A new
    /// upload clears the log, so anything tagged with an older epoch belongs
    /// to a transcript that no longer exists.
    #[must_use]
    pub(crate) fn epoch(&self) -> u64 {
        self.uploads.latest()
    }
}
