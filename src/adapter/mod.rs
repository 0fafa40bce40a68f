//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - HTTP router and CLI that drive the application
//! - [`outbound`] - Inference backend client and upload store driven by it

pub mod inbound;
pub mod outbound;
