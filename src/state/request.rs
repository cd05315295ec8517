//! Request sequencing for the staleness guard.
//!
//! DESIGN
//! ======
//! Each controller owns one `RequestTracker`. Issuing a request bumps the
//! sequence and makes the new ticket the only pending one. A resolution is
//! applied only when its ticket is still the pending one; anything older was
//! superseded and is reported as stale. A ticket settles at most once.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

/// Identity of one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Where a given ticket stands relative to its tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestStatus {
    /// Latest issued request, not resolved yet.
    Pending,
    /// A newer request was issued after this one.
    Stale,
    /// Latest issued request, already resolved.
    Settled,
}

/// Result of handing a response to a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The response updated the session.
    Applied,
    /// The response belonged to a superseded request and was ignored.
    Stale,
    /// The request was current, but the conversation it belonged to was
    /// reset; only the in-flight flag was cleared.
    Discarded,
}

#[derive(Clone, Debug, Default)]
pub struct RequestTracker {
    issued: u64,
    pending: Option<u64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket. Any earlier pending ticket becomes stale.
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        RequestTicket(self.issued)
    }

    #[must_use]
    pub fn status(&self, ticket: RequestTicket) -> RequestStatus {
        if ticket.0 != self.issued {
            RequestStatus::Stale
        } else if self.pending == Some(ticket.0) {
            RequestStatus::Pending
        } else {
            RequestStatus::Settled
        }
    }

    /// Mark `ticket` as resolved. Returns `false` if it is not the pending
    /// ticket, in which case the caller must drop the response.
    pub fn settle(&mut self, ticket: RequestTicket) -> bool {
        if self.status(ticket) != RequestStatus::Pending {
            return false;
        }
        self.pending = None;
        true
    }

    /// Sequence number of the most recently issued ticket (0 if none).
    #[must_use]
    pub fn latest(&self) -> u64 {
        self.issued
    }
}
