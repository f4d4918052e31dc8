//! Static asset copying.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies the static directory into the output directory.
#[derive(Debug, Default)]
pub struct AssetCopier;

impl AssetCopier {
    pub fn new() -> Self {
        Self
    }

    /// Copy every non-hidden file under `source_dir` into `dest_dir`,
    /// preserving relative paths. Returns the number of files copied.
    pub fn copy(&self, source_dir: &Path, dest_dir: &Path) -> Result<usize> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "copying assets"
        );

        if !source_dir.exists() {
            debug!("source directory does not exist, skipping");
            return Ok(0);
        }

        let count = self.copy_dir(source_dir, source_dir, dest_dir)?;
        info!(count, "assets copied");
        Ok(count)
    }

    fn copy_dir(&self, base_dir: &Path, current_dir: &Path, dest_base: &Path) -> Result<usize> {
        let mut count = 0;

        for entry in fs::read_dir(current_dir)? {
            let path = entry?.path();

            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }

            if path.is_dir() {
                count += self.copy_dir(base_dir, &path, dest_base)?;
            } else if path.is_file() {
                let relative = path
                    .strip_prefix(base_dir)
                    .map_err(|_| AssetError::InvalidPath(path.clone()))?;
                let dest = dest_base.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&path, &dest)?;
                debug!(src = %relative.display(), "copied asset");
                count += 1;
            }
        }

        Ok(count)
    }
}
