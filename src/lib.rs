//! # ragchat
//!
//! Client for a single-document retrieval-augmented-generation service:
//! upload one PDF, then ask questions about it.
//!
//! This crate contains the session state model, the upload and query
//! controllers that drive it, the pure view projection, the RAG service
//! seam with its HTTP implementation, and the terminal front end used by
//! the `ragchat` binary.

pub mod cli;
pub mod config;
pub mod controller;
pub mod document;
pub mod net;
pub mod session;
pub mod state;
pub mod terminal;
pub mod view;
