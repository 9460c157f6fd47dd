use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// File name of the manifest kept in every application and package folder.
pub const MANIFEST_FILE: &str = ".package-manifest";

/// Role recorded in a manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Application,
    Package,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Application => write!(f, "application"),
            Role::Package => write!(f, "package"),
            Role::Unknown => write!(f, "unknown"),
        }
    }
}

/// In-memory content of a `.package-manifest` file.
///
/// Linked folders are relative paths from the owning folder to each package
/// folder. They behave as an ordered set: insertion order is kept for display
/// and a path is stored at most once, compared in normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment_assembly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    environment_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    configuration_file: Option<String>,
    #[serde(default)]
    linked_folders: Vec<String>,
}

impl PackageManifest {
    /// Fresh manifest for an application folder.
    pub fn application() -> Self {
        Self {
            role: Role::Application,
            ..Self::default()
        }
    }

    /// Parse manifest contents. Blank input yields the default manifest.
    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut manifest: Self = toml::from_str(contents)?;

        // Collapse duplicates a hand-edited file may carry.
        let folders = std::mem::take(&mut manifest.linked_folders);
        for folder in folders {
            manifest.add_link(&folder);
        }

        Ok(manifest)
    }

    /// Serialize to the on-disk TOML form.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize package manifest")
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn environment_assembly(&self) -> Option<&str> {
        self.environment_assembly.as_deref()
    }

    pub fn environment_class_name(&self) -> Option<&str> {
        self.environment_class_name.as_deref()
    }

    pub fn configuration_file(&self) -> Option<&str> {
        self.configuration_file.as_deref()
    }

    /// Add a relative link. Returns `false` when it is already present.
    pub fn add_link(&mut self, relative_path: &str) -> bool {
        let link = normalize_link(relative_path);
        if self.position(&link).is_some() {
            return false;
        }
        self.linked_folders.push(link);
        true
    }

    /// Remove a relative link. Returns `false` when it was not present.
    pub fn remove_link(&mut self, relative_path: &str) -> bool {
        match self.position(&normalize_link(relative_path)) {
            Some(index) => {
                self.linked_folders.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_all_links(&mut self) {
        self.linked_folders.clear();
    }

    /// Current links in insertion order.
    pub fn list_links(&self) -> &[String] {
        &self.linked_folders
    }

    /// Returns whether the stored value changed.
    pub fn set_environment_assembly(&mut self, value: impl Into<String>) -> bool {
        replace_if_changed(&mut self.environment_assembly, value.into())
    }

    /// Returns whether the stored value changed.
    pub fn set_environment_class_name(&mut self, value: impl Into<String>) -> bool {
        replace_if_changed(&mut self.environment_class_name, value.into())
    }

    pub fn set_configuration_file(&mut self, value: impl Into<String>) -> bool {
        replace_if_changed(&mut self.configuration_file, value.into())
    }

    fn position(&self, normalized: &str) -> Option<usize> {
        self.linked_folders
            .iter()
            .position(|existing| normalize_link(existing) == normalized)
    }
}

fn replace_if_changed(slot: &mut Option<String>, value: String) -> bool {
    if slot.as_deref() == Some(value.as_str()) {
        return false;
    }
    *slot = Some(value);
    true
}

/// Canonical form used to compare links: `.` segments and trailing
/// separators are dropped, `..` segments are kept.
fn normalize_link(relative_path: &str) -> String {
    let path: PathBuf = Path::new(relative_path)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if path.as_os_str().is_empty() {
        ".".to_string()
    } else {
        path.to_string_lossy().into_owned()
    }
}
