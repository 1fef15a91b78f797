use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

use super::{validate_blob_path, BlobStore};

/// Blob store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base: String,
}

impl FsBlobStore {
    /// `public_base` is the URL prefix that serves `root`; defaults to a
    /// `file://` URL of the root itself.
    pub fn new(root: PathBuf, public_base: Option<String>) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("failed to create blob directory {}", root.display()))?;

        let public_base = public_base
            .unwrap_or_else(|| format!("file://{}", root.display()))
            .trim_end_matches('/')
            .to_string();

        Ok(Self { root, public_base })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.public_base, path)
    }
}

impl BlobStore for FsBlobStore {
    async fn upload(&self, bytes: Vec<u8>, path: &str) -> Result<String> {
        let segments = validate_blob_path(path)?;
        let target = segments
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment));

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let size = bytes.len();
        tokio::fs::write(&target, bytes)
            .await
            .with_context(|| format!("failed to write blob {}", target.display()))?;

        debug!("Stored blob {path} ({size} bytes)");
        Ok(self.url_for(path))
    }
}
