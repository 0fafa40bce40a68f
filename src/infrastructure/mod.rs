//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! gateway logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`sweeper`] - Background pruning of stale uploads

pub mod bootstrap;
pub mod config;
pub mod sweeper;
