use crate::error::LinkError;
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::link::list_current_links;
use super::{Collaborators, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestAction {
    /// Show the manifest, applying any requested setting changes.
    Inspect,
    /// Write a fresh application manifest.
    Create { force: bool },
}

impl ManifestAction {
    pub fn from_flags(create: bool, force: bool) -> Result<Self, LinkError> {
        match (create, force) {
            (true, force) => Ok(Self::Create { force }),
            (false, false) => Ok(Self::Inspect),
            (false, true) => Err(LinkError::InvalidRequest(
                "--force is only valid together with --create".to_string(),
            )),
        }
    }
}

/// Environment settings to write into the manifest. Empty values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestChanges {
    pub assembly: Option<String>,
    pub environment_class: Option<String>,
}

impl ManifestChanges {
    /// Returns whether anything in `manifest` changed.
    fn apply(&self, manifest: &mut PackageManifest) -> bool {
        let mut changed = false;

        if let Some(assembly) = non_empty(self.assembly.as_deref()) {
            changed |= manifest.set_environment_assembly(assembly);
        }

        if let Some(class_name) = non_empty(self.environment_class.as_deref()) {
            changed |= manifest.set_environment_class_name(class_name);
        }

        changed
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRequest {
    pub app: PathBuf,
    pub action: ManifestAction,
    pub changes: ManifestChanges,
    pub open: bool,
}

/// Creates, updates and prints application manifests.
pub struct ManifestOperation<'a> {
    collaborators: Collaborators<'a>,
}

impl<'a> ManifestOperation<'a> {
    pub fn new(collaborators: Collaborators<'a>) -> Self {
        Self { collaborators }
    }

    pub fn execute(&self, request: &ManifestRequest) -> Result<Outcome> {
        let app = request.app.as_path();
        let exists = self.collaborators.fs.application_manifest_exists(app);
        let reporter = self.collaborators.reporter;

        tracing::debug!(app = %app.display(), exists, action = ?request.action, "running manifest operation");

        match (exists, request.action) {
            (true, ManifestAction::Inspect) => {
                let mut manifest = self.collaborators.fs.load_application_manifest_from(app)?;
                if request.changes.apply(&mut manifest) {
                    self.persist(app, &manifest)?;
                }
                self.write_manifest(app, &manifest);
            }

            (true, ManifestAction::Create { force: false }) => {
                reporter.warn(&format!(
                    "File {} already exists, use the '--force' flag to overwrite the existing file",
                    manifest_path(app).display()
                ));
                return Ok(Outcome::Failed);
            }

            (_, ManifestAction::Create { .. }) => {
                if !self.collaborators.fs.folder_exists(app) {
                    return Err(LinkError::InvalidPath {
                        folder: app.to_path_buf(),
                    }
                    .into());
                }
                let mut manifest = PackageManifest::application();
                request.changes.apply(&mut manifest);
                self.persist(app, &manifest)?;
                self.write_manifest(app, &manifest);
            }

            (false, ManifestAction::Inspect) => {
                reporter.warn(&format!(
                    "Application manifest file at {} does not exist",
                    manifest_path(app).display()
                ));
                return Ok(Outcome::Failed);
            }
        }

        if request.open {
            self.collaborators.fs.launch_editor(app, MANIFEST_FILE);
        }

        Ok(Outcome::Success)
    }

    fn persist(&self, app: &Path, manifest: &PackageManifest) -> Result<()> {
        self.collaborators
            .fs
            .persist_to_file(manifest, app, MANIFEST_FILE)?;
        self.collaborators.reporter.success(
            "Persisted",
            &format!("changes to {}", manifest_path(app).display()),
        );
        Ok(())
    }

    fn write_manifest(&self, app: &Path, manifest: &PackageManifest) {
        let reporter = self.collaborators.reporter;
        let role = manifest.role().to_string();
        let rows = [
            ("Role", Some(role.as_str())),
            ("EnvironmentAssembly", manifest.environment_assembly()),
            ("EnvironmentClassName", manifest.environment_class_name()),
            ("ConfigurationFile", manifest.configuration_file()),
        ];

        reporter.plain(&format!(
            "Application Manifest for {}",
            manifest_path(app).display()
        ));
        for line in two_columns(&rows) {
            reporter.plain(&line);
        }
        reporter.plain("");

        list_current_links(reporter, app, manifest);
    }
}

fn manifest_path(app: &Path) -> PathBuf {
    app.join(MANIFEST_FILE)
}

/// Left-align labels into a column wide enough for the longest one.
fn two_columns(rows: &[(&str, Option<&str>)]) -> Vec<String> {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            format!("  {label:<width$}  {}", value.unwrap_or_default())
                .trim_end()
                .to_string()
        })
        .collect()
}
