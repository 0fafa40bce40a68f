//! Local filesystem upload store.
//!
//! Writes each upload to `<upload_dir>/<uuid>[.<ext>]` and publishes it as
//! `<public_prefix>/<uuid>[.<ext>]`. The public URL is a pure function of
//! the file name, so no index is kept.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::domain::{AssetId, StoredAsset};
use crate::error::StorageError;
use crate::port::outbound::store::AssetStore;

/// Longest extension carried over from the client filename.
const MAX_EXTENSION_LEN: usize = 10;

/// Upload store backed by a directory on local or shared disk.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAssetStore {
    /// Create the store, creating `root` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::CreateDir`] if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::CreateDir {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            root,
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        })
    }

    /// Directory uploads are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL for a file stored under this store's root.
    #[must_use]
    pub fn public_url_for(&self, storage_path: &Path) -> Option<String> {
        let name = storage_path.file_name()?.to_str()?;
        Some(format!("{}/{}", self.public_prefix, name))
    }

    /// Inverse of [`public_url_for`](Self::public_url_for).
    #[must_use]
    pub fn path_for(&self, public_url: &str) -> Option<PathBuf> {
        let name = public_url
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        Some(self.root.join(name))
    }

    fn file_name(id: AssetId, original_filename: Option<&str>) -> String {
        match original_filename.and_then(sanitized_extension) {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        }
    }
}

/// Extension of `filename` if it is short and purely alphanumeric.
fn sanitized_extension(filename: &str) -> Option<&str> {
    let ext = Path::new(filename).extension()?.to_str()?;
    let valid = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then_some(ext)
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(
        &self,
        bytes: &[u8],
        original_filename: Option<&str>,
    ) -> Result<StoredAsset, StorageError> {
        let asset_id = AssetId::generate();
        let storage_path = self.root.join(Self::file_name(asset_id, original_filename));

        let write = async {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&storage_path)
                .await?;
            file.write_all(bytes).await?;
            file.flush().await
        };

        if let Err(source) = write.await {
            if fs::remove_file(&storage_path).await.is_ok() {
                debug!(path = %storage_path.display(), "Removed partial upload");
            }
            return Err(StorageError::Write {
                path: storage_path,
                source,
            });
        }

        let public_url = self
            .public_url_for(&storage_path)
            .unwrap_or_else(|| format!("{}/{asset_id}", self.public_prefix));

        debug!(
            asset = %asset_id,
            path = %storage_path.display(),
            bytes = bytes.len(),
            "Stored upload"
        );

        Ok(StoredAsset {
            asset_id,
            storage_path,
            public_url,
        })
    }

    async fn fetch(&self, public_url: &str) -> Result<Vec<u8>, StorageError> {
        let path = self
            .path_for(public_url)
            .ok_or_else(|| StorageError::UnknownAsset {
                url: public_url.to_string(),
            })?;
        fs::read(&path)
            .await
            .map_err(|source| StorageError::Read { path, source })
    }

    async fn prune_older_than(&self, age: Duration) -> Result<usize, StorageError> {
        let list_err = |source| StorageError::Read {
            path: self.root.clone(),
            source,
        };
        let mut entries = fs::read_dir(&self.root).await.map_err(list_err)?;
        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let expired = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .is_some_and(|elapsed| elapsed >= age);
            if !expired {
                continue;
            }
            match fs::remove_file(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %entry.path().display(), error = %e, "Failed to prune asset"),
            }
        }

        Ok(removed)
    }
}
