//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`backend`] - [`ScriptedBackend`](backend::ScriptedBackend): per-unit
//!   replies, delays and call/completion recording.
//! - [`store`] - [`MemoryAssetStore`](store::MemoryAssetStore): in-memory
//!   uploads with injectable write failures.
//! - [`multipart`] - Hand-built `multipart/form-data` bodies for router tests.

pub mod backend;
pub mod multipart;
pub mod store;
