//! Directory-backed result store.
//!
//! Each variant lives in `<root>/results_<variant>.json`.

use std::fs;
use std::path::{Path, PathBuf};

use super::document::{load_result, save_result, StoreError};
use super::ResultStore;
use crate::types::HarnessResult;

const FILE_PREFIX: &str = "results_";
const FILE_SUFFIX: &str = ".json";

/// Result store writing one JSON document per variant.
#[derive(Debug, Clone)]
pub struct FileResultStore {
    root: PathBuf,
}

impl FileResultStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the document for a variant.
    pub fn path_for(&self, variant: &str) -> Result<PathBuf, StoreError> {
        validate_variant(variant)?;
        Ok(self.root.join(format!("{FILE_PREFIX}{variant}{FILE_SUFFIX}")))
    }
}

fn validate_variant(variant: &str) -> Result<(), StoreError> {
    let valid = !variant.is_empty()
        && variant
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && variant != "."
        && variant != "..";
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidVariant(variant.to_string()))
    }
}

impl ResultStore for FileResultStore {
    type Error = StoreError;

    fn save(&mut self, result: &HarnessResult) -> Result<(), Self::Error> {
        let path = self.path_for(&result.variant)?;
        save_result(result, path)
    }

    fn load(&self, variant: &str) -> Result<HarnessResult, Self::Error> {
        let path = self.path_for(variant)?;
        if !path.exists() {
            return Err(StoreError::NotFound(variant.to_string()));
        }

        let result = load_result(&path)?;
        if result.variant != variant {
            tracing::warn!(
                expected = variant,
                found = %result.variant,
                path = %path.display(),
                "rejected result stored under another variant's file name"
            );
            return Err(StoreError::VariantMismatch {
                expected: variant.to_string(),
                found: result.variant,
            });
        }
        Ok(result)
    }

    fn variants(&self) -> Result<Vec<String>, Self::Error> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.root, e)),
        };

        let mut variants = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.root, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(variant) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                if validate_variant(variant).is_ok() {
                    variants.push(variant.to_string());
                }
            }
        }

        variants.sort();
        Ok(variants)
    }
}
