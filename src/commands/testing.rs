//! In-memory collaborators for operation tests.

use crate::filesystem::FileSystem;
use crate::manifest::{PackageManifest, MANIFEST_FILE};
use crate::report::{Level, Reporter};
use crate::restart::RestartTrigger;
use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::{Collaborators, LinkOperation, ManifestOperation};

#[derive(Default)]
pub(crate) struct MemoryFileSystem {
    files: RefCell<BTreeMap<PathBuf, String>>,
    folders: RefCell<BTreeSet<PathBuf>>,
    writes: Cell<usize>,
    editor_launches: RefCell<Vec<PathBuf>>,
}

impl MemoryFileSystem {
    pub fn put_folder(&self, folder: &str) {
        self.folders.borrow_mut().insert(PathBuf::from(folder));
    }

    pub fn put_manifest(&self, folder: &str, manifest: &PackageManifest) {
        self.put_folder(folder);
        self.files.borrow_mut().insert(
            Path::new(folder).join(MANIFEST_FILE),
            manifest.to_toml().unwrap(),
        );
    }

    pub fn raw(&self, folder: &str) -> Option<String> {
        self.files
            .borrow()
            .get(&Path::new(folder).join(MANIFEST_FILE))
            .cloned()
    }

    pub fn manifest(&self, folder: &str) -> Option<PackageManifest> {
        self.raw(folder)
            .map(|contents| PackageManifest::parse(&contents).unwrap())
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn editor_launches(&self) -> Vec<PathBuf> {
        self.editor_launches.borrow().clone()
    }
}

impl FileSystem for MemoryFileSystem {
    fn file_exists(&self, folder: &Path, filename: &str) -> bool {
        self.files.borrow().contains_key(&folder.join(filename))
    }

    fn folder_exists(&self, folder: &Path) -> bool {
        self.folders.borrow().contains(folder)
    }

    fn load_application_manifest_from(&self, folder: &Path) -> Result<PackageManifest> {
        match self.files.borrow().get(&folder.join(MANIFEST_FILE)) {
            Some(contents) => PackageManifest::parse(contents),
            None => Ok(PackageManifest::default()),
        }
    }

    fn persist_to_file(
        &self,
        manifest: &PackageManifest,
        folder: &Path,
        filename: &str,
    ) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(folder.join(filename), manifest.to_toml()?);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn launch_editor(&self, folder: &Path, filename: &str) {
        self.editor_launches.borrow_mut().push(folder.join(filename));
    }
}

#[derive(Default)]
pub(crate) struct RecordingReporter {
    lines: RefCell<Vec<(Level, String, String)>>,
}

impl RecordingReporter {
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(lvl, label, message)| {
            *lvl == level && (label.contains(needle) || message.contains(needle))
        })
    }

    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(level, _, _)| *level == Level::Plain)
            .map(|(_, _, message)| message.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, label: &str, message: &str) {
        self.lines
            .borrow_mut()
            .push((level, label.to_string(), message.to_string()));
    }
}

#[derive(Default)]
pub(crate) struct RecordingRestart {
    calls: RefCell<Vec<PathBuf>>,
}

impl RecordingRestart {
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl RestartTrigger for RecordingRestart {
    fn restart(&self, app_folder: &Path) {
        self.calls.borrow_mut().push(app_folder.to_path_buf());
    }
}

#[derive(Default)]
pub(crate) struct Harness {
    pub fs: MemoryFileSystem,
    pub reporter: RecordingReporter,
    pub restart: RecordingRestart,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            fs: &self.fs,
            reporter: &self.reporter,
            restart: &self.restart,
        }
    }

    pub fn link(&self) -> LinkOperation<'_> {
        LinkOperation::new(self.collaborators())
    }

    pub fn manifest(&self) -> ManifestOperation<'_> {
        ManifestOperation::new(self.collaborators())
    }
}
