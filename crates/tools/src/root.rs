//! Module root discovery.

use std::path::{Path, PathBuf};

/// Finds the nearest directory containing a marker file (`go.mod`).
#[derive(Debug, Clone)]
pub struct RootLocator {
    marker: String,
}

impl RootLocator {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Walk upward from the directory holding `file_path`, returning the first
    /// directory that contains the marker. The starting directory counts.
    ///
    /// Relative paths are resolved against the process working directory.
    /// Existence of `file_path` itself is not checked.
    pub fn locate(&self, file_path: &Path) -> Option<PathBuf> {
        let absolute = absolutize(file_path)?;
        let mut current = absolute.parent()?.to_path_buf();

        loop {
            if current.join(&self.marker).is_file() {
                tracing::debug!(root = %current.display(), "Found module root");
                return Some(current);
            }
            match current.parent() {
                Some(parent) if parent != current => current = parent.to_path_buf(),
                _ => return None,
            }
        }
    }
}

impl Default for RootLocator {
    fn default() -> Self {
        Self::new("go.mod")
    }
}

fn absolutize(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        std::env::current_dir().ok().map(|cwd| cwd.join(path))
    }
}
