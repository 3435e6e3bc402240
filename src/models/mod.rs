//! Request and Response models for the cache HTTP surface
//!
//! DTOs serialized to and from JSON request/response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::PutRequest;
pub use responses::{DeleteResponse, GetResponse, HealthResponse, PutResponse, StatsResponse};
