//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the dispatcher and the outside world.
//! Adapters implement them to reach a concrete inference host or storage
//! medium.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  Dispatcher/Aggregator  │
//!                    └───────────┬─────────────┘
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!        ┌─────────────────┐          ┌─────────────────┐
//!        │ InferenceBackend│          │   AssetStore    │
//!        │  (HTTP adapter) │          │ (local adapter) │
//!        └─────────────────┘          └─────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::backend::InferenceBackend`] - Per-unit text/image analysis
//! - [`outbound::store::AssetStore`] - Transient upload persistence

pub mod outbound;
