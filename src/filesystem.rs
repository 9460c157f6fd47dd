use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::manifest::{PackageManifest, MANIFEST_FILE};

/// Disk access needed by the link and manifest commands.
pub trait FileSystem {
    fn file_exists(&self, folder: &Path, filename: &str) -> bool;

    fn folder_exists(&self, folder: &Path) -> bool;

    /// Read the manifest stored in `folder`, or the default manifest when there is none.
    fn load_application_manifest_from(&self, folder: &Path) -> Result<PackageManifest>;

    fn persist_to_file(
        &self,
        manifest: &PackageManifest,
        folder: &Path,
        filename: &str,
    ) -> Result<()>;

    /// Open `folder/filename` in an editor without waiting for it.
    fn launch_editor(&self, folder: &Path, filename: &str);

    fn application_manifest_exists(&self, folder: &Path) -> bool {
        self.file_exists(folder, MANIFEST_FILE)
    }
}

/// [`FileSystem`] backed by the real disk.
#[derive(Debug, Clone)]
pub struct DiskFileSystem {
    editor: String,
}

impl DiskFileSystem {
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }
}

impl FileSystem for DiskFileSystem {
    fn file_exists(&self, folder: &Path, filename: &str) -> bool {
        folder.join(filename).is_file()
    }

    fn folder_exists(&self, folder: &Path) -> bool {
        folder.is_dir()
    }

    fn load_application_manifest_from(&self, folder: &Path) -> Result<PackageManifest> {
        if !self.file_exists(folder, MANIFEST_FILE) {
            return Ok(PackageManifest::default());
        }

        let path = folder.join(MANIFEST_FILE);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest file {:?}", path))?;
        PackageManifest::parse(&contents)
            .with_context(|| format!("Failed to parse manifest file {:?}", path))
    }

    fn persist_to_file(
        &self,
        manifest: &PackageManifest,
        folder: &Path,
        filename: &str,
    ) -> Result<()> {
        let path = folder.join(filename);
        let contents = manifest.to_toml()?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write manifest file {:?}", path))?;

        tracing::debug!(path = %path.display(), "persisted manifest");
        Ok(())
    }

    fn launch_editor(&self, folder: &Path, filename: &str) {
        let path: PathBuf = folder.join(filename);
        let mut parts = self.editor.split_whitespace();
        let Some(program) = parts.next() else {
            tracing::warn!("No editor configured; not opening {}", path.display());
            return;
        };

        let spawned = Command::new(program)
            .args(parts)
            .arg(&path)
            .stdin(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => tracing::debug!(pid = child.id(), editor = %self.editor, "launched editor"),
            Err(err) => tracing::warn!("Failed to launch editor '{}': {}", self.editor, err),
        }
    }
}
