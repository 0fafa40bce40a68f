//! Upload store configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Where uploads land and how they are exposed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that receives uploaded images.
    pub upload_dir: PathBuf,

    /// URL prefix under which `upload_dir` is published.
    ///
    /// A path (e.g. "/static/uploads") is served by the gateway itself; an
    /// absolute URL points at an external file server and is not mounted.
    pub public_prefix: String,

    /// Age in seconds after which stored assets are pruned. Absent means
    /// assets are kept forever.
    pub retention_secs: Option<u64>,
}

impl StorageConfig {
    /// True when the gateway should serve `upload_dir` itself.
    #[must_use]
    pub fn serves_locally(&self) -> bool {
        self.public_prefix.starts_with('/')
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static/uploads"),
            public_prefix: "/static/uploads".into(),
            retention_secs: None,
        }
    }
}
