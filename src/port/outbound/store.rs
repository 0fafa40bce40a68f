//! Upload store port.
//!
//! Persists image payloads under collision-resistant names and maps them
//! to public URLs.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::StoredAsset;
use crate::error::StorageError;

/// Storage sink for transient uploads.
///
/// The target directory or bucket is shared across concurrent requests.
/// Generated names are unique by construction so no locking is required.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Persist `bytes`, keeping the extension of `original_filename`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write cannot complete.
    async fn store(
        &self,
        bytes: &[u8],
        original_filename: Option<&str>,
    ) -> Result<StoredAsset, StorageError>;

    /// Read back the bytes behind a public URL produced by [`store`](Self::store).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::UnknownAsset`] if the URL does not belong to
    /// this store, or a read error.
    async fn fetch(&self, public_url: &str) -> Result<Vec<u8>, StorageError>;

    /// Delete assets older than `age`, returning how many were removed.
    ///
    /// Retention is an operator policy; nothing in the request path calls
    /// this.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the upload directory cannot be listed.
    async fn prune_older_than(&self, age: Duration) -> Result<usize, StorageError>;
}
