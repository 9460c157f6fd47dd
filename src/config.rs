use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_RESTART_FILE: &str = ".restart";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Short names for frequently used folders
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Editor command used by `manifest --open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Marker file touched in the application folder to request a restart
    #[serde(default = "default_restart_file")]
    pub restart_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            editor: None,
            restart_file: DEFAULT_RESTART_FILE.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize devlink config file")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {:?}", path))?;
        Ok(())
    }

    /// Editor command: config, then `$VISUAL`, then `$EDITOR`, then a platform default.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| env::var("VISUAL").ok().filter(|value| !value.trim().is_empty()))
            .or_else(|| env::var("EDITOR").ok().filter(|value| !value.trim().is_empty()))
            .unwrap_or_else(|| default_editor().to_string())
    }
}

fn default_restart_file() -> String {
    DEFAULT_RESTART_FILE.to_string()
}

fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}
