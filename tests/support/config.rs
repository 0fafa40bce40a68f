use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Minimal valid configuration whose credential comes from `token_env`.
pub fn minimal_toml(token_env: &str, upload_dir: &Path) -> String {
    format!(
        concat!(
            "[server]\n",
            "bind = \"127.0.0.1:0\"\n",
            "\n",
            "[backend]\n",
            "base_url = \"https://inference.example.com\"\n",
            "api_token_env = \"{}\"\n",
            "\n",
            "[storage]\n",
            "upload_dir = \"{}\"\n",
        ),
        token_env,
        upload_dir.display().to_string().replace('\\', "/"),
    )
}

/// Write `contents` to `config.toml` inside a fresh temp dir.
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}
