//! Output target resolution

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::invocation::{FlagValue, Invocation};

/// Suffix that marks a target as a file rather than a directory
pub const JSON_SUFFIX: &str = ".json";

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Cannot write output to a file. {0} is not a directory.")]
    OutputDirectoryConflict(PathBuf),
}

/// A resolved output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Receives the default file name
    Directory(PathBuf),

    /// Written as-is
    File(PathBuf),
}

impl OutputTarget {
    /// Classifies a path by its suffix: `.json` is a file, anything else a directory
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.to_string_lossy().ends_with(JSON_SUFFIX) {
            OutputTarget::File(path)
        } else {
            OutputTarget::Directory(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            OutputTarget::Directory(p) | OutputTarget::File(p) => p,
        }
    }

    /// The file that will actually be written
    pub fn write_path(&self, default_filename: &str) -> PathBuf {
        match self {
            OutputTarget::Directory(dir) => dir.join(default_filename),
            OutputTarget::File(file) => file.clone(),
        }
    }

    /// Fails if a directory target already exists as a regular file
    pub fn verify(&self) -> Result<(), RouteError> {
        match self {
            OutputTarget::Directory(dir) if dir.is_file() => {
                Err(RouteError::OutputDirectoryConflict(dir.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Picks the output path from, in order: an explicitly assigned path, the
/// `--output` argument, and `--output` in the lifecycle script
///
/// Only non-empty string values count; a bare `--output` switch does not
/// name a destination.
pub fn resolve_output(explicit: Option<&Path>, invocation: &Invocation) -> Option<PathBuf> {
    if let Some(explicit) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Some(explicit.to_path_buf());
    }

    let text = |value: Option<FlagValue>| {
        value
            .and_then(|v| v.as_text().map(str::to_string))
            .filter(|s| !s.is_empty())
    };

    text(invocation.probe("--output"))
        .or_else(|| text(invocation.lifecycle_value("--output")))
        .map(PathBuf::from)
}
