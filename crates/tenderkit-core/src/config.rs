//! Data directory layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to the company data files and working directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Qualification records (`data/qualifications.json`).
    pub qualifications_file: PathBuf,
    /// Past-project case records (`data/cases.json`).
    pub cases_file: PathBuf,
    /// Product catalog (`data/products.json`).
    pub products_file: PathBuf,
    /// Personnel roster (`data/personnel.json`).
    pub personnel_file: PathBuf,
    /// Uploaded tender files awaiting parsing (`data/uploads/`).
    pub uploads: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            qualifications_file: root.join("qualifications.json"),
            cases_file: root.join("cases.json"),
            products_file: root.join("products.json"),
            personnel_file: root.join("personnel.json"),
            uploads: root.join("uploads"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(&self.uploads)?;
        Ok(())
    }
}
