//! Inference backend adapters.
//!
//! Implements [`InferenceBackend`](crate::port::outbound::InferenceBackend)
//! over HTTPS.

pub mod client;
mod wire;

pub use client::HttpBackend;
