use crate::alias::{ConfigAliases, FolderAliasResolver};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::filesystem::{DiskFileSystem, FileSystem};
use crate::report::{ConsoleReporter, Reporter};
use crate::restart::{RestartTrigger, TouchRestart};
use crate::util::xdg;
use anyhow::Result;

pub mod alias;
pub mod link;
pub mod manifest;

#[cfg(test)]
mod testing;

pub use alias::AliasRequest;
pub use link::{list_current_links, LinkMode, LinkOperation, LinkRequest};
pub use manifest::{ManifestAction, ManifestChanges, ManifestOperation, ManifestRequest};

/// Result of a command that did not hit a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A recoverable condition was reported to the user.
    Failed,
}

/// Capabilities the link and manifest operations run against.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub fs: &'a dyn FileSystem,
    pub reporter: &'a dyn Reporter,
    pub restart: &'a dyn RestartTrigger,
}

pub fn execute(cli: Cli) -> Result<Outcome> {
    // Config is the root entry point: aliases, editor and restart marker live there
    let config_path = xdg::config_file()?;
    let mut config = Config::load(&config_path)?;

    let aliases = ConfigAliases::new(config.aliases.clone());
    let fs = DiskFileSystem::new(config.editor_command());
    let restart = TouchRestart::new(config.restart_file.clone());
    let reporter = ConsoleReporter;
    let collaborators = Collaborators {
        fs: &fs,
        reporter: &reporter,
        restart: &restart,
    };

    match cli.command {
        Commands::Link {
            app,
            package,
            remove,
            clean_all,
            restart,
        } => {
            let app = aliases.resolve_folder(&app)?;
            let package = package
                .map(|folder| aliases.resolve_folder(&folder))
                .transpose()?;
            let request = LinkRequest::from_flags(app, package, remove, clean_all)?
                .with_restart(restart);
            LinkOperation::new(collaborators).execute(&request)
        }

        Commands::Manifest {
            app,
            create,
            force,
            open,
            assembly,
            environment_class,
        } => {
            let request = ManifestRequest {
                app: aliases.resolve_folder(&app)?,
                action: ManifestAction::from_flags(create, force)?,
                changes: ManifestChanges {
                    assembly,
                    environment_class,
                },
                open,
            };
            ManifestOperation::new(collaborators).execute(&request)
        }

        Commands::Alias {
            name,
            folder,
            remove,
        } => {
            let request = AliasRequest::from_args(name, folder, remove)?;
            alias::execute(&mut config, &config_path, &reporter, request)
        }
    }
}
