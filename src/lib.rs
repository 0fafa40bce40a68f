//! Chatgate - a multi-modal chat gateway.
//!
//! Accepts a chat request carrying optional text and any number of images,
//! splits it into independent analysis units, fans them out concurrently to
//! an external inference backend and returns one ordered response.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Units, results and the aggregated response
//! - [`port`] - Traits at the seams ([`InferenceBackend`](port::outbound::InferenceBackend),
//!   [`AssetStore`](port::outbound::AssetStore))
//! - [`application`] - Decomposition, dispatch, aggregation and the chat use case
//! - [`adapter`] - HTTP router, CLI, backend client and local upload store
//! - [`infrastructure`] - Configuration, logging and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Guarantees
//!
//! - Exactly one result per unit, ordered by sequence index regardless of
//!   completion order.
//! - A failing unit (storage, backend or panic) never affects the others.
//! - Backend calls are bounded by a shared concurrency limit across all
//!   requests.
//! - A request either completes fully or fails as a whole on timeout;
//!   in-flight units are cancelled and never returned partially.
//!
//! # Features
//!
//! - `testkit` - Scripted backend, in-memory store and multipart builder for
//!   integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
