//! HTTP protocol layer module
//!
//! Provides HTTP response construction, decoupled from business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_health_response, build_key_response, build_rejection_response,
};
