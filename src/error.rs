//! Error types for asset path resolution
//!
//! One enum covers every way resolution can fail, keeping the "expected
//! unresolved" case (a path outside the data directory in interactive mode)
//! distinct from hard failures like a locator process exiting non-zero.

/// Errors that can occur while resolving URDF asset references
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Absolute path not rooted under the data directory (interactive mode).
    /// Callers treat this as "unresolved", not as a crash.
    #[error("path is outside the asset data directory: {0}")]
    OutsideDataDir(String),

    /// A plain (non-package) reference was resolved before any package root
    /// was assigned.
    #[error("no package root set; call set_root() before resolving references")]
    RootNotSet,

    /// Structurally invalid input, e.g. `package://` with no package name.
    #[error("malformed asset reference: {0}")]
    MalformedReference(String),

    /// The external package locator failed; `detail` carries its captured
    /// output.
    #[error("failed to locate package `{package}`: {detail}")]
    PackageResolution { package: String, detail: String },

    /// The asset store could not create or move a folder.
    #[error("asset store operation failed: {0}")]
    Store(#[from] std::io::Error),
}

/// Result type using ResolveError
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_resolution_display() {
        let err = ResolveError::PackageResolution {
            package: "my_robot".to_string(),
            detail: "Package not found".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("my_robot"));
        assert!(msg.contains("Package not found"));
    }

    #[test]
    fn test_outside_data_dir_display() {
        let err = ResolveError::OutsideDataDir("/tmp/elsewhere/mesh.stl".to_string());
        assert!(format!("{}", err).contains("/tmp/elsewhere/mesh.stl"));
    }
}
