//! Activity manifests: an ordered list of image + answer-key pairs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ManifestError;

#[derive(Debug, Deserialize)]
struct ManifestFileEntry {
    image: String,
    answer_key: String,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    activities: Vec<ManifestFileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub image_path: PathBuf,
    pub answer_key_path: PathBuf,
}

impl ManifestEntry {
    /// Where the submitted selection for this activity is written.
    pub fn selection_path(&self, results_dir: Option<&Path>) -> PathBuf {
        let file = self.answer_key_path.with_extension("selection.json");
        match (results_dir, file.file_name()) {
            (Some(dir), Some(name)) => dir.join(name),
            _ => file,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActivityManifest {
    pub entries: Vec<ManifestEntry>,
    pub current_index: usize,
}

impl ActivityManifest {
    /// Parse manifest JSON, resolving paths against `base_dir`.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self, ManifestError> {
        let parsed: ManifestFile = serde_json::from_str(text)?;
        let entries: Vec<ManifestEntry> = parsed
            .activities
            .into_iter()
            .map(|e| ManifestEntry {
                image_path: base_dir.join(e.image),
                answer_key_path: base_dir.join(e.answer_key),
            })
            .collect();

        if entries.is_empty() {
            return Err(ManifestError::Empty);
        }

        Ok(Self {
            entries,
            current_index: 0,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::parse(&text, base_dir)
    }

    pub fn current(&self) -> &ManifestEntry {
        &self.entries[self.current_index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// "3 / 12" style position label.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current_index + 1, self.entries.len())
    }
}
