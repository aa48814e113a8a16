//! URDF asset path resolution
//!
//! Translates the references found in robot description (URDF) files into
//! paths usable by an asset pipeline:
//! - absolute filesystem paths <-> pipeline-relative (`Assets/...`) paths
//! - ROS `package://` URIs, resolved through an external package locator
//! - raw mesh filenames, rewritten to their prebuilt form
//!
//! and manages the package root of an import session, including the
//! `Materials` folder kept under it and its relocation when the root moves.

pub mod error;
pub mod locator;
pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use error::{ResolveError, Result};
pub use locator::{PackageLocator, Ros2PackageLocator};
pub use resolver::{ImportMode, PathResolver};
pub use store::{AssetStore, FsAssetStore};
