// Public API
pub mod cli;
pub mod commands;

// Core domain types
mod alias;
mod config;
mod error;
mod filesystem;
mod manifest;
mod paths;
mod report;
mod restart;
mod ui;
mod util;

// Re-export main types
pub use alias::{ConfigAliases, FolderAliasResolver};
pub use config::Config;
pub use error::LinkError;
pub use filesystem::{DiskFileSystem, FileSystem};
pub use manifest::{PackageManifest, Role, MANIFEST_FILE};
pub use paths::relative_path;
pub use report::{ConsoleReporter, Level, Reporter};
pub use restart::{RestartTrigger, TouchRestart};
