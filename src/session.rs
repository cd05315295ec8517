//! Session driver: the event loop glue between controllers and the network.
//!
//! DESIGN
//! ======
//! `Session` owns the `SessionState` and is driven from a single task.
//! Starting an action runs the controller's begin step, then spawns the
//! network call; the spawned task never touches state, it only sends a
//! `Completion` back over an unbounded channel. The owner pulls completions
//! from `Completions` and hands each one to `Session::apply`, which runs the
//! controller's apply step to completion before observers see the new view.
//!
//! Observers are the re-render hook: they receive a fresh `ViewModel` after
//! every committed mutation, and nothing for results dropped as stale.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::controller::{self, QueryTicket, UploadTicket};
use crate::document::Document;
use crate::net::types::{QueryReply, RagError, RagService, UploadReply};
use crate::state::SessionState;
use crate::state::request::Resolution;
use crate::view::{self, ViewModel};

/// A finished network call, waiting to be applied.
#[derive(Debug)]
pub enum Completion {
    Upload { ticket: UploadTicket, result: Result<UploadReply, RagError> },
    Query { ticket: QueryTicket, result: Result<QueryReply, RagError> },
}

type Observer = Box<dyn FnMut(&ViewModel) + Send>;

pub struct Session {
    state: SessionState,
    service: Arc<dyn RagService>,
    tx: mpsc::UnboundedSender<Completion>,
    observers: Vec<Observer>,
}

/// Receiving side of a session's completion channel.
pub struct Completions {
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Completions {
    /// Wait for the next finished network call.
    ///
    /// Returns `None` only once the owning `Session` is gone and every
    /// spawned call has reported back.
    pub async fn recv(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}

impl Session {
    #[must_use]
    pub fn new(service: Arc<dyn RagService>) -> (Self, Completions) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self { state: SessionState::new(), service, tx, observers: Vec::new() };
        (session, Completions { rx })
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> ViewModel {
        view::render(&self.state)
    }

    /// Register a re-render hook. It is called immediately with the current
    /// view, then after every committed mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&ViewModel) + Send + 'static) {
        let mut observer: Observer = Box::new(observer);
        observer(&self.view());
        self.observers.push(observer);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        controller::set_draft(&mut self.state, text);
        self.notify();
    }

    /// Start indexing `document`. Always accepted; an upload already in
    /// flight becomes stale.
    pub fn select_file(&mut self, document: Document) -> UploadTicket {
        let request = controller::select_file(&mut self.state, document);
        let ticket = request.ticket.clone();
        self.notify();

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.upload_document(&request.document).await;
            let completion = Completion::Upload { ticket: request.ticket, result };
            if tx.send(completion).is_err() {
                tracing::debug!("session closed before upload completed");
            }
        });
        ticket
    }

    /// Submit `text` as a question. `None` means the call was a no-op.
    pub fn submit_query(&mut self, text: &str) -> Option<QueryTicket> {
        let request = controller::submit_query(&mut self.state, text)?;
        self.issue_query(request)
    }

    /// Submit the current draft. `None` means the call was a no-op.
    pub fn submit_draft(&mut self) -> Option<QueryTicket> {
        let request = controller::submit_draft(&mut self.state)?;
        self.issue_query(request)
    }

    fn issue_query(&mut self, request: controller::QueryRequest) -> Option<QueryTicket> {
        let ticket = request.ticket;
        self.notify();

        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.query(&request.query).await;
            if tx.send(Completion::Query { ticket, result }).is_err() {
                tracing::debug!("session closed before query completed");
            }
        });
        Some(ticket)
    }

    /// Apply one completion and re-render if anything changed.
    pub fn apply(&mut self, completion: Completion) -> Resolution {
        let resolution = match completion {
            Completion::Upload { ticket, result } => controller::apply_upload(&mut self.state, &ticket, result),
            Completion::Query { ticket, result } => controller::apply_query(&mut self.state, ticket, result),
        };
        if resolution != Resolution::Stale {
            self.notify();
        }
        resolution
    }

    /// True while an upload or a query is outstanding.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state.is_indexing() || self.state.is_querying()
    }

    /// Apply completions until nothing is outstanding.
    pub async fn run_until_idle(&mut self, completions: &mut Completions) {
        while self.is_busy() {
            let Some(completion) = completions.recv().await else {
                return;
            };
            self.apply(completion);
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = view::render(&self.state);
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}
