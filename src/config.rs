use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a resweep run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source tree, relative to the project root (default: `src`)
    pub source_dir: Option<PathBuf>,

    /// Resource tree, relative to the project root (default: `res`)
    pub resource_dir: Option<PathBuf>,

    /// Directory to write the per-type configuration matrices into.
    /// When unset, matrices go to `resource-matrices/` under the project
    /// root, and only if that directory already exists.
    pub matrix_dir: Option<PathBuf>,

    /// Additional library project roots, beyond project.properties
    pub libraries: Vec<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .into_diagnostic()
            .wrap_err("failed to parse config file")
    }

    /// Look for `resweep.toml` or `.resweep.toml` in the project root.
    pub fn from_default_locations(root: &Path) -> Result<Self> {
        for name in ["resweep.toml", ".resweep.toml"] {
            let candidate = root.join(name);
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }
        Ok(Self::default())
    }
}
