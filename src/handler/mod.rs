//! Request handler module
//!
//! Responsible for request routing dispatch and the credential hashing
//! endpoint.

pub mod hasher;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
