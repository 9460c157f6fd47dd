use crate::alias::expand_folder;
use crate::config::Config;
use crate::error::LinkError;
use crate::report::Reporter;
use anyhow::Result;
use std::path::Path;

use super::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasRequest {
    List,
    Show { name: String },
    Set { name: String, folder: String },
    Remove { name: String },
}

impl AliasRequest {
    pub fn from_args(
        name: Option<String>,
        folder: Option<String>,
        remove: bool,
    ) -> Result<Self, LinkError> {
        match (name, folder, remove) {
            (None, None, false) => Ok(Self::List),
            (Some(name), None, false) => Ok(Self::Show { name }),
            (Some(name), Some(folder), false) => Ok(Self::Set { name, folder }),
            (Some(name), None, true) => Ok(Self::Remove { name }),
            _ => Err(LinkError::InvalidRequest(
                "alias takes NAME FOLDER to set, NAME --remove to delete, or no arguments to list"
                    .to_string(),
            )),
        }
    }
}

pub fn execute(
    config: &mut Config,
    config_path: &Path,
    reporter: &dyn Reporter,
    request: AliasRequest,
) -> Result<Outcome> {
    match request {
        AliasRequest::List => {
            if config.aliases.is_empty() {
                reporter.info("No aliases defined. Use 'devlink alias <NAME> <FOLDER>' to add one.");
            } else {
                for (name, folder) in &config.aliases {
                    reporter.plain(&format!("  {name} -> {folder}"));
                }
            }
        }

        AliasRequest::Show { name } => match config.aliases.get(&name) {
            Some(folder) => reporter.plain(folder),
            None => {
                reporter.warn(&format!("Alias '{name}' is not defined"));
                return Ok(Outcome::Failed);
            }
        },

        AliasRequest::Set { name, folder } => {
            let folder = expand_folder(&folder)?.display().to_string();
            if config.aliases.get(&name) == Some(&folder) {
                reporter.info(&format!("Alias '{name}' already points to {folder}"));
            } else {
                config.aliases.insert(name.clone(), folder.clone());
                config.save(config_path)?;
                reporter.success("Aliased", &format!("{name} -> {folder}"));
            }
        }

        AliasRequest::Remove { name } => {
            if config.aliases.remove(&name).is_some() {
                config.save(config_path)?;
                reporter.success("Removed", &format!("alias '{name}'"));
            } else {
                reporter.info(&format!("Alias '{name}' was not defined"));
            }
        }
    }

    Ok(Outcome::Success)
}
