//! In-memory [`AssetStore`] for testing.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{AssetId, StoredAsset};
use crate::error::StorageError;
use crate::port::outbound::AssetStore;

const URL_PREFIX: &str = "memory://assets";

/// Keeps uploads in a map keyed by public URL.
///
/// Writes for filenames registered with [`fail_filename`](Self::fail_filename)
/// fail with a permission-denied [`StorageError::Write`].
pub struct MemoryAssetStore {
    assets: Mutex<HashMap<String, (Vec<u8>, Instant)>>,
    failing: HashSet<String>,
    fail_all: bool,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self {
            assets: Mutex::new(HashMap::new()),
            failing: HashSet::new(),
            fail_all: false,
        }
    }

    /// Make writes of this original filename fail.
    #[must_use]
    pub fn fail_filename(mut self, filename: impl Into<String>) -> Self {
        self.failing.insert(filename.into());
        self
    }

    /// Make every write fail.
    #[must_use]
    pub fn fail_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Number of assets currently stored.
    pub fn len(&self) -> usize {
        self.assets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn store(
        &self,
        bytes: &[u8],
        original_filename: Option<&str>,
    ) -> Result<StoredAsset, StorageError> {
        let asset_id = AssetId::generate();
        let name = match original_filename
            .and_then(|f| Path::new(f).extension())
            .and_then(|e| e.to_str())
        {
            Some(ext) => format!("{asset_id}.{ext}"),
            None => asset_id.to_string(),
        };
        let storage_path = PathBuf::from("memory").join(&name);

        let fails = self.fail_all || original_filename.is_some_and(|f| self.failing.contains(f));
        if fails {
            return Err(StorageError::Write {
                path: storage_path,
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected failure"),
            });
        }

        let public_url = format!("{URL_PREFIX}/{name}");
        self.assets
            .lock()
            .insert(public_url.clone(), (bytes.to_vec(), Instant::now()));

        Ok(StoredAsset {
            asset_id,
            storage_path,
            public_url,
        })
    }

    async fn fetch(&self, public_url: &str) -> Result<Vec<u8>, StorageError> {
        self.assets
            .lock()
            .get(public_url)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| StorageError::UnknownAsset {
                url: public_url.to_string(),
            })
    }

    async fn prune_older_than(&self, age: Duration) -> Result<usize, StorageError> {
        let mut assets = self.assets.lock();
        let before = assets.len();
        assets.retain(|_, (_, stored_at)| stored_at.elapsed() < age);
        Ok(before - assets.len())
    }
}
