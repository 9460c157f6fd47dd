use crate::error::LinkError;
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::paths::relative_path;
use crate::report::Reporter;
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Collaborators, Outcome};

/// What a `link` invocation does. Each mode carries only the folders it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkMode {
    List,
    Create { package: PathBuf },
    Remove { package: PathBuf },
    /// Clear every link. Without a manifest on disk, `fallback` runs instead.
    Clean { fallback: Box<LinkMode> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub app: PathBuf,
    pub mode: LinkMode,
    pub restart: bool,
}

impl LinkRequest {
    pub fn new(app: impl Into<PathBuf>, mode: LinkMode) -> Self {
        Self {
            app: app.into(),
            mode,
            restart: false,
        }
    }

    pub fn with_restart(mut self, restart: bool) -> Self {
        self.restart = restart;
        self
    }

    /// Build a request from command-line flags.
    ///
    /// `clean_all` takes priority over a package folder, which is kept as the
    /// fallback for an application without a manifest. `remove` needs a package.
    pub fn from_flags(
        app: PathBuf,
        package: Option<PathBuf>,
        remove: bool,
        clean_all: bool,
    ) -> Result<Self, LinkError> {
        let mode = match (clean_all, package, remove) {
            (true, package, remove) => {
                let fallback = match package {
                    Some(package) if remove => LinkMode::Remove { package },
                    Some(package) => LinkMode::Create { package },
                    None => LinkMode::List,
                };
                LinkMode::Clean {
                    fallback: Box::new(fallback),
                }
            }
            (false, Some(package), true) => LinkMode::Remove { package },
            (false, Some(package), false) => LinkMode::Create { package },
            (false, None, true) => {
                return Err(LinkError::InvalidRequest(
                    "--remove requires a package folder".to_string(),
                ))
            }
            (false, None, false) => LinkMode::List,
        };

        Ok(Self::new(app, mode))
    }
}

/// Applies a [`LinkRequest`] to the application manifest.
pub struct LinkOperation<'a> {
    collaborators: Collaborators<'a>,
}

impl<'a> LinkOperation<'a> {
    pub fn new(collaborators: Collaborators<'a>) -> Self {
        Self { collaborators }
    }

    pub fn execute(&self, request: &LinkRequest) -> Result<Outcome> {
        let app = request.app.as_path();
        let mut manifest = self.collaborators.fs.load_application_manifest_from(app)?;

        tracing::debug!(app = %app.display(), mode = ?request.mode, "running link operation");

        let mode = match &request.mode {
            LinkMode::Clean { fallback } if !self.collaborators.fs.application_manifest_exists(app) => {
                tracing::debug!(app = %app.display(), "no manifest to clean");
                &**fallback
            }
            mode => mode,
        };

        match mode {
            LinkMode::Clean { .. } => self.clean(app, &mut manifest)?,
            LinkMode::Create { package } => self.add(app, package, &mut manifest)?,
            LinkMode::Remove { package } => self.remove(app, package, &mut manifest)?,
            LinkMode::List => list_current_links(self.collaborators.reporter, app, &manifest),
        }

        if request.restart {
            self.collaborators.restart.restart(app);
        }

        Ok(Outcome::Success)
    }

    fn clean(&self, app: &Path, manifest: &mut PackageManifest) -> Result<()> {
        let reporter = self.collaborators.reporter;

        manifest.remove_all_links();
        self.persist(app, manifest)?;
        reporter.success(
            "Removed",
            &format!(
                "all package links from the manifest file for {}",
                app.display()
            ),
        );

        list_current_links(reporter, app, manifest);
        Ok(())
    }

    fn add(&self, app: &Path, package: &Path, manifest: &mut PackageManifest) -> Result<()> {
        self.require_app_folder(app)?;
        let relative = relative_path(package, app)?;

        if !self.collaborators.fs.file_exists(package, MANIFEST_FILE) {
            return Err(LinkError::MissingPackageManifest {
                folder: package.to_path_buf(),
            }
            .into());
        }

        if manifest.add_link(&relative) {
            self.persist(app, manifest)?;
            self.collaborators.reporter.success(
                "Added",
                &format!(
                    "folder {} to the application at {}",
                    package.display(),
                    app.display()
                ),
            );
        } else {
            self.collaborators.reporter.info(&format!(
                "Folder {} is already included in the application at {}",
                package.display(),
                app.display()
            ));
        }
        Ok(())
    }

    fn remove(&self, app: &Path, package: &Path, manifest: &mut PackageManifest) -> Result<()> {
        self.require_app_folder(app)?;
        let relative = relative_path(package, app)?;

        if manifest.remove_link(&relative) {
            self.persist(app, manifest)?;
            self.collaborators.reporter.success(
                "Removed",
                &format!(
                    "folder {} from the application at {}",
                    package.display(),
                    app.display()
                ),
            );
        } else {
            self.collaborators.reporter.info(&format!(
                "Folder {} was not linked to the application at {}",
                package.display(),
                app.display()
            ));
        }
        Ok(())
    }

    fn require_app_folder(&self, app: &Path) -> Result<(), LinkError> {
        if self.collaborators.fs.folder_exists(app) {
            Ok(())
        } else {
            Err(LinkError::InvalidPath {
                folder: app.to_path_buf(),
            })
        }
    }

    fn persist(&self, app: &Path, manifest: &PackageManifest) -> Result<()> {
        self.collaborators
            .fs
            .persist_to_file(manifest, app, MANIFEST_FILE)
    }
}

/// Print the links of `manifest`, or a note that there are none.
pub fn list_current_links(reporter: &dyn Reporter, app: &Path, manifest: &PackageManifest) {
    let links = manifest.list_links();
    if links.is_empty() {
        reporter.plain(&format!("  No package links for {}", app.display()));
        return;
    }

    reporter.plain(&format!("  Links for {}", app.display()));
    for link in links {
        reporter.plain(&format!("    {link}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::report::Level;

    const APP: &str = "/apps/foo";
    const PKG: &str = "/pkgs/bar";

    fn create(package: &str) -> LinkRequest {
        LinkRequest::new(
            APP,
            LinkMode::Create {
                package: PathBuf::from(package),
            },
        )
    }

    fn remove(package: &str) -> LinkRequest {
        LinkRequest::new(
            APP,
            LinkMode::Remove {
                package: PathBuf::from(package),
            },
        )
    }

    #[test]
    fn from_flags_selects_mode() {
        let list = LinkRequest::from_flags(APP.into(), None, false, false).unwrap();
        assert_eq!(list.mode, LinkMode::List);

        let add = LinkRequest::from_flags(APP.into(), Some(PKG.into()), false, false).unwrap();
        assert_eq!(
            add.mode,
            LinkMode::Create {
                package: PKG.into()
            }
        );

        let rm = LinkRequest::from_flags(APP.into(), Some(PKG.into()), true, false).unwrap();
        assert_eq!(
            rm.mode,
            LinkMode::Remove {
                package: PKG.into()
            }
        );
    }

    #[test]
    fn clean_flag_wins_over_package() {
        let request = LinkRequest::from_flags(APP.into(), Some(PKG.into()), false, true).unwrap();
        assert_eq!(
            request.mode,
            LinkMode::Clean {
                fallback: Box::new(LinkMode::Create {
                    package: PKG.into()
                })
            }
        );

        let request = LinkRequest::from_flags(APP.into(), Some(PKG.into()), true, true).unwrap();
        assert_eq!(
            request.mode,
            LinkMode::Clean {
                fallback: Box::new(LinkMode::Remove {
                    package: PKG.into()
                })
            }
        );
    }

    fn clean() -> LinkMode {
        LinkMode::Clean {
            fallback: Box::new(LinkMode::List),
        }
    }

    #[test]
    fn remove_without_package_is_rejected() {
        let err = LinkRequest::from_flags(APP.into(), None, true, false).unwrap_err();
        assert!(matches!(err, LinkError::InvalidRequest(_)));
    }

    #[test]
    fn create_links_package_relative_to_app() {
        let harness = Harness::new();
        harness.fs.put_manifest(APP, &PackageManifest::application());
        harness.fs.put_manifest(PKG, &PackageManifest::default());

        let outcome = harness.link().execute(&create(PKG)).unwrap();

        assert_eq!(outcome, Outcome::Success);
        let manifest = harness.fs.manifest(APP).unwrap();
        assert_eq!(manifest.list_links(), ["../../pkgs/bar"]);
        assert!(harness.reporter.contains(Level::Success, "Added"));
    }

    #[test]
    fn create_twice_reports_already_included() {
        let harness = Harness::new();
        harness.fs.put_folder(APP);
        harness.fs.put_manifest(PKG, &PackageManifest::default());

        harness.link().execute(&create(PKG)).unwrap();
        let writes = harness.fs.writes();
        harness.link().execute(&create(PKG)).unwrap();

        assert_eq!(harness.fs.manifest(APP).unwrap().list_links().len(), 1);
        assert_eq!(harness.fs.writes(), writes);
        assert!(harness.reporter.contains(Level::Info, "already included"));
    }

    #[test]
    fn create_without_package_manifest_fails_and_leaves_app_untouched() {
        let harness = Harness::new();
        let mut existing = PackageManifest::application();
        existing.add_link("../other");
        harness.fs.put_manifest(APP, &existing);
        let before = harness.fs.raw(APP).unwrap();

        let err = harness.link().execute(&create(PKG)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<LinkError>(),
            Some(LinkError::MissingPackageManifest { .. })
        ));
        assert_eq!(harness.fs.raw(APP).unwrap(), before);
    }

    #[test]
    fn remove_unlinked_package_keeps_manifest_bytes() {
        let harness = Harness::new();
        let mut existing = PackageManifest::application();
        existing.add_link("../../pkgs/other");
        harness.fs.put_manifest(APP, &existing);
        let before = harness.fs.raw(APP).unwrap();

        let outcome = harness.link().execute(&remove(PKG)).unwrap();

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(harness.fs.raw(APP).unwrap(), before);
        assert!(harness.reporter.contains(Level::Info, "was not linked"));
    }

    #[test]
    fn remove_linked_package() {
        let harness = Harness::new();
        let mut existing = PackageManifest::application();
        existing.add_link("../../pkgs/bar");
        existing.add_link("../../pkgs/other");
        harness.fs.put_manifest(APP, &existing);

        harness.link().execute(&remove(PKG)).unwrap();

        let manifest = harness.fs.manifest(APP).unwrap();
        assert_eq!(manifest.list_links(), ["../../pkgs/other"]);
        assert_eq!(manifest.role(), crate::manifest::Role::Application);
        assert!(harness.reporter.contains(Level::Success, "Removed"));
    }

    #[test]
    fn clean_removes_every_link_then_lists() {
        let harness = Harness::new();
        let mut existing = PackageManifest::application();
        existing.add_link("../a");
        existing.add_link("../b");
        harness.fs.put_manifest(APP, &existing);

        let request = LinkRequest::from_flags(APP.into(), Some(PKG.into()), false, true).unwrap();
        harness.link().execute(&request).unwrap();

        assert!(harness.fs.manifest(APP).unwrap().list_links().is_empty());
        assert!(harness.reporter.contains(Level::Plain, "No package links for"));
    }

    #[test]
    fn clean_without_manifest_lists_without_creating_one() {
        let harness = Harness::new();
        harness.fs.put_folder(APP);

        harness
            .link()
            .execute(&LinkRequest::new(APP, clean()))
            .unwrap();

        assert!(harness.fs.raw(APP).is_none());
        assert!(harness.reporter.contains(Level::Plain, "No package links for"));
    }

    #[test]
    fn clean_without_manifest_falls_back_to_linking_package() {
        let harness = Harness::new();
        harness.fs.put_folder(APP);
        harness.fs.put_manifest(PKG, &PackageManifest::default());

        let request = LinkRequest::from_flags(APP.into(), Some(PKG.into()), false, true).unwrap();
        harness.link().execute(&request).unwrap();

        let manifest = harness.fs.manifest(APP).unwrap();
        assert_eq!(manifest.list_links(), ["../../pkgs/bar"]);
        assert!(harness.reporter.contains(Level::Success, "Added"));
    }

    #[test]
    fn missing_app_folder_is_invalid_path() {
        let harness = Harness::new();
        harness.fs.put_manifest(PKG, &PackageManifest::default());

        for request in [create(PKG), remove(PKG)] {
            let err = harness.link().execute(&request).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<LinkError>(),
                Some(LinkError::InvalidPath { folder }) if folder == Path::new(APP)
            ));
        }

        assert!(harness.fs.raw(APP).is_none());
        assert_eq!(harness.fs.writes(), 0);
    }

    #[test]
    fn list_prints_links_in_order_without_writing() {
        let harness = Harness::new();
        let mut existing = PackageManifest::application();
        existing.add_link("../zeta");
        existing.add_link("../alpha");
        harness.fs.put_manifest(APP, &existing);
        let writes = harness.fs.writes();

        harness
            .link()
            .execute(&LinkRequest::new(APP, LinkMode::List))
            .unwrap();

        assert_eq!(harness.fs.writes(), writes);
        assert_eq!(
            harness.reporter.plain_lines(),
            vec![
                format!("  Links for {APP}"),
                "    ../zeta".to_string(),
                "    ../alpha".to_string(),
            ]
        );
    }

    #[test]
    fn restart_runs_after_any_mode() {
        let harness = Harness::new();
        harness.fs.put_manifest(APP, &PackageManifest::application());

        for mode in [LinkMode::List, clean()] {
            harness
                .link()
                .execute(&LinkRequest::new(APP, mode).with_restart(true))
                .unwrap();
        }

        assert_eq!(harness.restart.calls(), vec![PathBuf::from(APP); 2]);
    }

    #[test]
    fn no_restart_unless_requested() {
        let harness = Harness::new();
        harness
            .link()
            .execute(&LinkRequest::new(APP, LinkMode::List))
            .unwrap();
        assert!(harness.restart.calls().is_empty());
    }
}
