//! Persisted image payloads.

use std::path::PathBuf;

use serde::Serialize;

use super::id::AssetId;

/// An image payload written by the upload store.
///
/// `public_url` is derived from `storage_path` by the store that produced
/// it; no lookup table is involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredAsset {
    pub asset_id: AssetId,
    pub storage_path: PathBuf,
    pub public_url: String,
}
