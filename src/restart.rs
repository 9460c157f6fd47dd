use std::fs;
use std::path::Path;

/// Signals a running application to restart.
pub trait RestartTrigger {
    fn restart(&self, app_folder: &Path);
}

/// Restarts an application by rewriting a marker file its host watches.
#[derive(Debug, Clone)]
pub struct TouchRestart {
    marker: String,
}

impl TouchRestart {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl RestartTrigger for TouchRestart {
    fn restart(&self, app_folder: &Path) {
        let path = app_folder.join(&self.marker);
        let stamp = chrono::Utc::now().to_rfc3339();

        match fs::write(&path, format!("{stamp}\n")) {
            Ok(()) => tracing::debug!(path = %path.display(), "touched restart marker"),
            Err(err) => tracing::warn!("Failed to touch restart marker {:?}: {}", path, err),
        }
    }
}
