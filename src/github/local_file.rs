use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs::File;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file on disk about to become a release asset.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl LocalFile {
    pub async fn inspect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Cannot read metadata of {}", path.display()))?;

        if !metadata.is_file() {
            anyhow::bail!("{} is not a file", path.display());
        }

        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("Cannot derive an asset name from {}", path.display()))?
            .to_owned();

        Ok(LocalFile {
            path: path.to_path_buf(),
            name,
            content_type: content_type(path),
            size: metadata.len(),
        })
    }

    pub async fn open(self) -> Result<AssetUpload> {
        let content = File::open(&self.path)
            .await
            .with_context(|| format!("Cannot open {}", self.path.display()))?;

        Ok(AssetUpload {
            name: self.name,
            content_type: self.content_type,
            content_length: self.size,
            content,
        })
    }
}

fn content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_owned()
}

/// Everything the upload endpoint needs for one asset.
#[derive(Debug)]
pub struct AssetUpload {
    pub name: String,
    pub content_type: String,
    pub content_length: u64,
    pub content: File,
}
