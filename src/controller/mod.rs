//! State transitions for the two request lifecycles.
//!
//! DESIGN
//! ======
//! Each lifecycle is split into a synchronous "begin" step that mutates the
//! session and hands back a request descriptor, and an "apply" step that
//! takes the response together with the ticket it was issued under. Neither
//! step performs I/O; the session driver issues the requests in between.

pub mod query;
pub mod upload;

pub use query::{QueryRequest, QueryTicket, apply_query, set_draft, submit_draft, submit_query};
pub use upload::{UploadRequest, UploadTicket, apply_upload, select_file};
