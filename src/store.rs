//! Asset store capability
//!
//! The resolver never touches the storage backend directly; it goes through
//! the narrow [`AssetStore`] trait to check, create, and move folders. The
//! shipped [`FsAssetStore`] maps pipeline-relative paths (`Assets/...`) onto
//! a project directory on disk. Tests inject recording fakes instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Folder operations the resolver needs from the storage backend
pub trait AssetStore {
    /// Whether `path` (pipeline-relative, e.g. `Assets/Pkg/Materials`)
    /// exists as a folder.
    fn folder_exists(&self, path: &str) -> bool;

    /// Create folder `name` directly under `parent`.
    fn create_folder(&mut self, parent: &str, name: &str) -> Result<()>;

    /// Move the folder at `from` to `to`, replacing an empty folder already
    /// present at `to`.
    fn move_asset(&mut self, from: &str, to: &str) -> Result<()>;
}

/// Filesystem-backed asset store
///
/// Pipeline-relative paths are resolved against `project_dir`, so
/// `Assets/Pkg/Materials` lives at `<project_dir>/Assets/Pkg/Materials`.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    project_dir: PathBuf,
}

impl FsAssetStore {
    /// Create a store rooted at the directory containing the `Assets` folder
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    fn on_disk(&self, pipeline_path: &str) -> PathBuf {
        self.project_dir.join(Path::new(pipeline_path))
    }
}

impl AssetStore for FsAssetStore {
    fn folder_exists(&self, path: &str) -> bool {
        self.on_disk(path).is_dir()
    }

    fn create_folder(&mut self, parent: &str, name: &str) -> Result<()> {
        let target = self.on_disk(parent).join(name);
        tracing::debug!("Creating asset folder: {}", target.display());
        fs::create_dir_all(&target)?;
        Ok(())
    }

    fn move_asset(&mut self, from: &str, to: &str) -> Result<()> {
        let from_disk = self.on_disk(from);
        let to_disk = self.on_disk(to);
        tracing::debug!(
            "Moving asset folder: {} -> {}",
            from_disk.display(),
            to_disk.display()
        );
        // An empty folder at the destination is replaced; a populated one is
        // a real conflict and surfaces as the rename error.
        if to_disk.is_dir() && fs::read_dir(&to_disk)?.next().is_none() {
            fs::remove_dir(&to_disk)?;
        }
        if let Some(parent) = to_disk.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&from_disk, &to_disk)?;
        Ok(())
    }
}
