//! Outbound ports implemented by infrastructure adapters.

pub mod backend;
pub mod store;

pub use backend::InferenceBackend;
pub use store::AssetStore;
