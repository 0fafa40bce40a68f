//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the gateway's single use case: fan a chat request out
//! and aggregate the results.

pub mod aggregate;
pub mod chat;
pub mod dispatch;

pub use aggregate::aggregate;
pub use chat::ChatService;
pub use dispatch::{decompose, Dispatcher};
