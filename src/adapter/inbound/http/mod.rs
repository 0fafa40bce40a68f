//! HTTP boundary (axum).
//!
//! - [`routes`] - Router, shared state and handlers
//! - [`multipart`] - Multipart form decoding into a [`ChatRequest`](crate::domain::ChatRequest)
//! - [`error`] - JSON error bodies and status mapping
//! - [`server`] - Listener and graceful shutdown

pub mod error;
pub mod multipart;
pub mod routes;
pub mod server;

pub use routes::{build_router, AppState};
pub use server::serve;
