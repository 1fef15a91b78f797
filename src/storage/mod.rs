//! Binary image storage.
//!
//! `BlobStore::upload` writes bytes under a relative, slash-separated path and
//! returns a stable URL for later retrieval.

mod fs;

use std::future::Future;

use anyhow::{bail, Result};

pub use fs::FsBlobStore;

pub trait BlobStore: Send + Sync {
    fn upload(&self, bytes: Vec<u8>, path: &str)
        -> impl Future<Output = Result<String>> + Send;
}

/// Splits a blob path into segments, rejecting anything that could escape
/// the store root.
pub fn validate_blob_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        bail!("blob path is empty");
    }
    if path.starts_with('/') || path.contains('\\') {
        bail!("blob path '{path}' must be relative and slash-separated");
    }

    let segments: Vec<&str> = path.split('/').collect();
    for segment in &segments {
        if segment.is_empty() || *segment == "." || *segment == ".." {
            bail!("blob path '{path}' contains an invalid segment");
        }
    }

    Ok(segments)
}

/// Replaces characters that do not belong in a blob file name.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}
