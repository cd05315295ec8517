//! RAG service access.
//!
//! DESIGN
//! ======
//! Controllers never talk HTTP. The session driver calls a `RagService`
//! trait object; production uses `HttpRagClient`, tests plug in mocks.

pub mod http;
pub mod types;

pub use http::HttpRagClient;
pub use types::{QueryReply, RagError, RagService, UploadReply};
