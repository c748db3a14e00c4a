//! Pre-exported snapshot files, the resolver's second stage.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::core::types::DatasetName;

pub const GENERIC_FALLBACK_FILE: &str = "fallback.json";

/// Directory of dataset snapshots exported ahead of time.
///
/// Loading is best-effort: unreadable or unparseable files degrade to the
/// next candidate rather than failing the resolve.
#[derive(Debug, Clone)]
pub struct StaticStore {
    root: PathBuf,
}

impl StaticStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the snapshot for `name`, trying the dataset-specific file first
    /// and the generic fallback file last.
    #[must_use]
    pub fn load(&self, name: DatasetName) -> Option<serde_json::Value> {
        for file_name in [name.static_file_name(), GENERIC_FALLBACK_FILE] {
            let path = self.root.join(file_name);
            if let Some(value) = self.read_json(&path, name) {
                return Some(value);
            }
        }
        None
    }

    fn read_json(&self, path: &Path, name: DatasetName) -> Option<serde_json::Value> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        dataset = %name,
                        path = %path.display(),
                        error = %err,
                        "failed to read static snapshot"
                    );
                }
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    dataset = %name,
                    path = %path.display(),
                    error = %err,
                    "failed to parse static snapshot"
                );
                None
            }
        }
    }
}
