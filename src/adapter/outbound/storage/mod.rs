//! Upload store adapters.

pub mod local;

pub use local::LocalAssetStore;
