//! Request and Response models for the HTTP API
//!
//! Query-string DTOs and response bodies that are not already defined by
//! the fetch and store layers.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BenchmarkQuery, FetchQuery};
pub use responses::HealthResponse;
