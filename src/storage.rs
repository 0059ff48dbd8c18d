use crate::sheet::Sheet;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// TOML file backing for the persistence endpoint
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the stored sheet; `None` if the file does not exist or is empty
    pub fn load(&self) -> Result<Option<Sheet>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("failed to read {}", self.file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let sheet: Sheet = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.file_path.display()))?;
        Ok(Some(sheet))
    }

    pub fn save(&self, sheet: &Sheet) -> Result<()> {
        let content = toml::to_string_pretty(sheet)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}
