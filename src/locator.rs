//! External package location
//!
//! `package://` URIs name a ROS package, not a filesystem path. Resolving one
//! means asking the package manager where the package's share directory is
//! installed. That is an external-process call, so it lives behind the
//! [`PackageLocator`] trait and tests substitute canned results.

use std::process::Command;

use crate::error::{ResolveError, Result};

/// Maps a ROS package name to its installed share directory
pub trait PackageLocator {
    /// Absolute path of the package's share directory, e.g.
    /// `/opt/ros/humble/share/my_robot`.
    fn locate_share_dir(&self, package: &str) -> Result<String>;
}

/// Locator backed by the `ros2` CLI
///
/// Runs `ros2 pkg prefix --share <package>` and blocks until it exits. Both
/// stdout and stderr are captured in full before the wait, so a chatty
/// subprocess cannot deadlock on a full pipe. There is no timeout or retry;
/// callers needing cancellation run the resolution on a worker of their own.
#[derive(Debug, Clone, Default)]
pub struct Ros2PackageLocator;

impl Ros2PackageLocator {
    pub fn new() -> Self {
        Self
    }
}

impl PackageLocator for Ros2PackageLocator {
    fn locate_share_dir(&self, package: &str) -> Result<String> {
        tracing::debug!("Locating ROS package share dir: {}", package);

        let output = Command::new("ros2")
            .args(["pkg", "prefix", "--share", package])
            .output()
            .map_err(|e| ResolveError::PackageResolution {
                package: package.to_string(),
                detail: format!("failed to run `ros2 pkg prefix`: {}", e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let mut detail = stdout.trim().to_string();
            if detail.is_empty() {
                detail = stderr.trim().to_string();
            }
            tracing::warn!("ros2 pkg prefix failed for {}: {}", package, detail);
            return Err(ResolveError::PackageResolution {
                package: package.to_string(),
                detail,
            });
        }

        // `ros2 pkg prefix` terminates the path with a newline.
        Ok(stdout.trim_end().to_string())
    }
}
