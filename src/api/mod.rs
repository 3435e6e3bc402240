//! API Module
//!
//! Thin HTTP surface over the shared cache.
//!
//! # Endpoints
//! - `PUT /put` - Insert or overwrite a key
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Remove a key
//! - `GET /snapshot` - Ordered cache contents
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
