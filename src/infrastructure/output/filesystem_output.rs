//! Filesystem-based output service implementation

use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::core::error::{GeneratorError, Result};
use crate::generation::OutputService;

/// Output service that writes generated files to disk.
///
/// Every call opens, writes and closes its file.
#[derive(Debug, Default)]
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }

    async fn write(&self, path: &Path, content: &str, append: bool) -> Result<()> {
        let output_err = |source| GeneratorError::Output {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(output_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .await
            .map_err(output_err)?;

        file.write_all(content.as_bytes())
            .await
            .map_err(output_err)?;
        file.flush().await.map_err(output_err)?;
        Ok(())
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_fresh(&self, path: &Path, content: &str) -> Result<()> {
        self.write(path, content, false).await
    }

    async fn append(&self, path: &Path, content: &str) -> Result<()> {
        self.write(path, content, true).await
    }

    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|source| GeneratorError::Output {
                path: path.to_path_buf(),
                source,
            })
    }
}
