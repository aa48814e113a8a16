//! Path resolution for URDF asset references
//!
//! Converts the references found in robot description files into paths the
//! asset pipeline can use:
//! - Absolute filesystem paths <-> pipeline-relative paths (`Assets/...`)
//! - `package://` URIs (resolved through a [`PackageLocator`])
//! - Mesh filenames (raw `.stl` rewritten to the prebuilt form)
//!
//! The resolver also owns the package root for the current import session and
//! keeps its `Materials` child folder alive across root reassignments.

use std::path::Path;

use crate::error::{ResolveError, Result};
use crate::locator::PackageLocator;
use crate::store::AssetStore;

/// Root token of pipeline-relative paths
pub const ASSETS_TOKEN: &str = "Assets";

/// Scheme prefix of ROS package URIs
pub const PACKAGE_SCHEME: &str = "package://";

/// Folder under the package root holding generated materials
pub const MATERIALS_FOLDER: &str = "Materials";

/// Extension of the prebuilt form a raw mesh is imported into
pub const PREBUILT_MESH_EXTENSION: &str = "prefab";

/// Extension of generated material assets
pub const MATERIAL_EXTENSION: &str = "mat";

/// Behavior when a path falls outside the data directory
///
/// Interactive (editor-like) sessions treat such paths as unresolved;
/// headless sessions pass them through untouched and defer existence checks
/// to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Interactive,
    Headless,
}

/// Path resolver for one URDF import session
///
/// Owns the current package root. Construct it with the absolute path of the
/// pipeline's data directory (the directory named `Assets`, no trailing
/// separator), an [`AssetStore`] for folder operations, and a
/// [`PackageLocator`] for `package://` URIs.
#[derive(Debug)]
pub struct PathResolver<S: AssetStore, L: PackageLocator> {
    /// Absolute path of the data directory, separator-normalized
    data_dir: String,
    mode: ImportMode,
    store: S,
    locator: L,
    /// Pipeline-relative root of the current import, set by `set_root`
    package_root: Option<String>,
}

impl<S: AssetStore, L: PackageLocator> PathResolver<S, L> {
    /// Create a resolver in interactive mode
    pub fn new(data_dir: impl Into<String>, store: S, locator: L) -> Self {
        Self {
            data_dir: set_separator(&data_dir.into()),
            mode: ImportMode::Interactive,
            store,
            locator,
            package_root: None,
        }
    }

    /// Set the import mode
    pub fn with_mode(mut self, mode: ImportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current package root, if `set_root` has been called
    pub fn root(&self) -> Option<&str> {
        self.package_root.as_deref()
    }

    /// The asset store collaborator
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Assign the package root for this import session
    ///
    /// `new_path` is an absolute path; it is stored in relative form. A
    /// `Materials` folder is guaranteed to exist under the new root on
    /// return. With `relocating` set, the previous root's `Materials`
    /// contents are migrated to the new root first; this is safe to repeat
    /// (a second call finds nothing left to move).
    pub fn set_root(&mut self, new_path: &str, relocating: bool) -> Result<()> {
        let new_root = self.to_relative(new_path)?;
        tracing::info!("Package root set to {}", new_root);

        let old_root = self.package_root.replace(new_root.clone());

        let materials = format!("{}/{}", new_root, MATERIALS_FOLDER);
        if !self.store.folder_exists(&materials) {
            self.store.create_folder(&new_root, MATERIALS_FOLDER)?;
        }

        if relocating {
            if let Some(old_root) = old_root {
                self.relocate_materials(&old_root, &new_root)?;
            }
        }
        Ok(())
    }

    /// Convert an absolute filesystem path to pipeline-relative form
    ///
    /// Paths outside the data directory are unresolvable in interactive mode
    /// ([`ResolveError::OutsideDataDir`]); in headless mode the input is
    /// returned unchanged.
    pub fn to_relative(&self, absolute_path: &str) -> Result<String> {
        let normalized = set_separator(absolute_path);
        if !normalized.starts_with(&self.data_dir) {
            return match self.mode {
                ImportMode::Interactive => {
                    Err(ResolveError::OutsideDataDir(absolute_path.to_string()))
                }
                ImportMode::Headless => Ok(absolute_path.to_string()),
            };
        }
        Ok(format!(
            "{}{}",
            ASSETS_TOKEN,
            &normalized[self.data_dir.len()..]
        ))
    }

    /// Convert a pipeline-relative path back to an absolute filesystem path
    ///
    /// Paths that omit the `Assets` token are treated as rooted one level
    /// above the data directory.
    pub fn to_absolute(&self, relative_path: &str) -> String {
        let full = if relative_path.starts_with(ASSETS_TOKEN) {
            format!("{}{}", self.data_dir, &relative_path[ASSETS_TOKEN.len()..])
        } else {
            let project_prefix = self
                .data_dir
                .strip_suffix(ASSETS_TOKEN)
                .unwrap_or(&self.data_dir);
            format!("{}{}", project_prefix, relative_path)
        };
        set_separator(&full)
    }

    /// Resolve a reference found in a URDF file
    ///
    /// `package://` URIs are resolved through the package locator and
    /// returned as-is (already absolute, no mesh rewrite, no root join).
    /// Plain paths are joined under the current package root, with raw
    /// `.stl` suffixes rewritten to the prebuilt extension when
    /// `convert_mesh` is set.
    pub fn resolve_urdf_reference(&self, reference: &str, convert_mesh: bool) -> Result<String> {
        if let Some(stripped) = reference.strip_prefix(PACKAGE_SCHEME) {
            return self.resolve_package_uri(stripped);
        }

        let mut path = set_separator(reference);
        if convert_mesh && has_stl_suffix(&path) {
            // Replace the 3-char suffix, keeping the dot: foo.STL -> foo.prefab
            path.truncate(path.len() - 3);
            path.push_str(PREBUILT_MESH_EXTENSION);
        }

        let root = self.package_root.as_deref().ok_or(ResolveError::RootNotSet)?;
        Ok(format!("{}/{}", root, path))
    }

    /// Whether `path` is usable as an asset reference in the current mode
    pub fn is_valid_reference(&self, path: &str) -> bool {
        match self.mode {
            ImportMode::Interactive => self.to_relative(path).is_ok(),
            ImportMode::Headless => true,
        }
    }

    /// Canonical asset path for a generated material
    ///
    /// Directory components and the source extension of `material_name` are
    /// discarded; only the file stem survives.
    pub fn material_asset_path(&self, material_name: &str) -> Result<String> {
        let root = self.package_root.as_deref().ok_or(ResolveError::RootNotSet)?;
        let normalized = set_separator(material_name);
        let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        Ok(format!(
            "{}/{}/{}.{}",
            root, MATERIALS_FOLDER, stem, MATERIAL_EXTENSION
        ))
    }

    fn resolve_package_uri(&self, stripped: &str) -> Result<String> {
        let path = set_separator(stripped);
        let (package, remainder) = match path.split_once('/') {
            Some((package, rest)) => (package, Some(rest)),
            None => (path.as_str(), None),
        };
        if package.is_empty() {
            return Err(ResolveError::MalformedReference(format!(
                "{}{}",
                PACKAGE_SCHEME, stripped
            )));
        }

        let share_dir = self.locator.locate_share_dir(package)?;
        Ok(match remainder {
            Some(rest) => format!("{}/{}", share_dir, rest),
            None => share_dir,
        })
    }

    fn relocate_materials(&mut self, old_root: &str, new_root: &str) -> Result<()> {
        let old_materials = format!("{}/{}", old_root, MATERIALS_FOLDER);
        let new_materials = format!("{}/{}", new_root, MATERIALS_FOLDER);

        if self.store.folder_exists(&old_materials) {
            tracing::info!(
                "Relocating materials: {} -> {}",
                old_materials,
                new_materials
            );
            self.store.move_asset(&old_materials, &new_materials)?;
        } else if !self.store.folder_exists(&new_materials) {
            self.store.create_folder(new_root, MATERIALS_FOLDER)?;
        }
        Ok(())
    }
}

/// Normalize platform separators to the canonical `/`
fn set_separator(path: &str) -> String {
    path.replace('\\', "/")
}

/// Case-insensitive check for a `.stl` suffix
fn has_stl_suffix(path: &str) -> bool {
    path.len() >= 4
        && path
            .get(path.len() - 4..)
            .map_or(false, |suffix| suffix.eq_ignore_ascii_case(".stl"))
}
