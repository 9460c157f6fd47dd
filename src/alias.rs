use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::paths;

/// Translates a folder argument (alias name or path) into an absolute folder.
pub trait FolderAliasResolver {
    fn resolve_folder(&self, name_or_path: &str) -> Result<PathBuf>;
}

/// Resolves aliases from the `[aliases]` table of the devlink config.
#[derive(Debug, Clone, Default)]
pub struct ConfigAliases {
    aliases: BTreeMap<String, String>,
}

impl ConfigAliases {
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }
}

impl FolderAliasResolver for ConfigAliases {
    fn resolve_folder(&self, name_or_path: &str) -> Result<PathBuf> {
        let raw = match self.aliases.get(name_or_path) {
            Some(folder) => {
                tracing::debug!(alias = name_or_path, folder = %folder, "resolved alias");
                folder.as_str()
            }
            None => name_or_path,
        };

        expand_folder(raw)
    }
}

/// Expand `~` and environment variables, then make the folder absolute.
pub(crate) fn expand_folder(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand folder '{}'", raw))?;
    let folder = paths::absolute(Path::new(expanded.as_ref()))?;
    Ok(folder)
}
