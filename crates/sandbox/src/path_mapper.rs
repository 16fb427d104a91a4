// SPDX-License-Identifier: MIT

//! Translates paths as seen inside the container to paths on the host, and
//! the reverse helpers callers use to build in-sandbox paths from bare
//! filenames. See spec §4.1.
//!
//! Grounded in `nekro_agent/tools/path_convertor.py::convert_to_host_path`:
//! scan the path's segments for the first occurrence of the literal
//! segment `uploads` or `shared`; everything after it is the `tail`.

use crate::error::InvalidPathError;
use codebox_core::ChatKey;
use md5::{Digest, Md5};
use std::path::{Component, Path, PathBuf};

/// The two in-container roots the Path Mapper recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathLocation {
    Uploads,
    Shared,
}

impl PathLocation {
    fn segment(self) -> &'static str {
        match self {
            PathLocation::Uploads => "uploads",
            PathLocation::Shared => "shared",
        }
    }
}

/// The two host roots, resolved to absolute form once at startup.
#[derive(Debug, Clone)]
pub struct PathRoots {
    pub upload_root: PathBuf,
    pub shared_root: PathBuf,
}

impl PathRoots {
    pub fn new(upload_root: impl Into<PathBuf>, shared_root: impl Into<PathBuf>) -> Self {
        Self { upload_root: upload_root.into(), shared_root: shared_root.into() }
    }

    /// Translate a path as seen inside the container to its host
    /// equivalent.
    ///
    /// Relative `sandbox_path`s are treated as rooted at `/app` first.
    /// `container_key` is required when the path resolves under `shared`.
    pub fn to_host_path(
        &self,
        sandbox_path: &Path,
        chat_key: &ChatKey,
        container_key: Option<&str>,
    ) -> Result<PathBuf, InvalidPathError> {
        let absolute = if sandbox_path.is_absolute() {
            sandbox_path.to_path_buf()
        } else {
            Path::new("/app").join(sandbox_path)
        };

        let components: Vec<Component> = absolute.components().collect();
        let marker_index = components.iter().position(|c| {
            matches!(
                c.as_os_str().to_str(),
                Some(s) if s == PathLocation::Uploads.segment() || s == PathLocation::Shared.segment()
            )
        });

        let Some(idx) = marker_index else {
            return Err(InvalidPathError::NoLocationMarker(absolute.display().to_string()));
        };

        let location = match components[idx].as_os_str().to_str() {
            Some(s) if s == PathLocation::Uploads.segment() => PathLocation::Uploads,
            _ => PathLocation::Shared,
        };

        let tail: PathBuf = components[idx + 1..].iter().collect();

        match location {
            PathLocation::Uploads => Ok(self.upload_root.join(chat_key.as_str()).join(tail)),
            PathLocation::Shared => {
                let container_key = container_key.ok_or_else(|| {
                    InvalidPathError::MissingContainerKey(absolute.display().to_string())
                })?;
                Ok(self.shared_root.join(container_key).join(tail))
            }
        }
    }

    /// Create (if needed) and return the host upload directory for a
    /// newly created artifact.
    ///
    /// Mirrors `get_upload_file_path`: when `file_name` is absent, a name
    /// is synthesized as `md5(seed or random uuid) + suffix`. The parent
    /// directory is created; the file itself is not.
    pub fn get_upload_file_path(
        &self,
        chat_key: &ChatKey,
        file_name: Option<&str>,
        suffix: &str,
        seed: Option<&str>,
    ) -> std::io::Result<PathBuf> {
        let owned_name;
        let file_name = match file_name {
            Some(name) => name,
            None => {
                let seed = seed.map(str::to_string).unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                let digest = Md5::digest(seed.as_bytes());
                owned_name = format!("{digest:x}{suffix}");
                &owned_name
            }
        };

        let dir = self.upload_root.join(chat_key.as_str());
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join(file_name))
    }
}

/// `filename → /app/uploads/<name>`. Multi-level paths are not supported;
/// only the basename is kept.
pub fn filename_to_sandbox_upload_path(filename: &str) -> PathBuf {
    let name = Path::new(filename).file_name().unwrap_or_default();
    Path::new("/app/uploads").join(name)
}

/// `filename → /app/shared/<name>`. Only the basename is kept.
pub fn filename_to_sandbox_shared_path(filename: &str) -> PathBuf {
    let name = Path::new(filename).file_name().unwrap_or_default();
    Path::new("/app/shared").join(name)
}

/// `filepath → /app/shared/<filepath>`, preserving sub-paths.
pub fn filepath_to_sandbox_shared_path(filepath: &Path) -> PathBuf {
    Path::new("/app/shared").join(filepath)
}

/// `filepath → /app/uploads/<filepath>`, preserving sub-paths.
pub fn filepath_to_sandbox_upload_path(filepath: &Path) -> PathBuf {
    Path::new("/app/uploads").join(filepath)
}

#[cfg(test)]
#[path = "path_mapper_tests.rs"]
mod tests;
