use std::path::PathBuf;
use thiserror::Error;

/// Structural failures that abort a command.
///
/// Recoverable conditions (missing manifest, refusing to overwrite) are
/// reported through [`crate::commands::Outcome`] instead.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Folder {folder:?} cannot be resolved to an absolute path")]
    InvalidPath { folder: PathBuf },

    #[error("Folder {package:?} has no path relative to {app:?}")]
    UnrelatedPaths { package: PathBuf, app: PathBuf },

    #[error("There is no package manifest file for the requested package folder at {folder:?}")]
    MissingPackageManifest { folder: PathBuf },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
