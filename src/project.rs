//! Project layout discovery.
//!
//! Locates the source tree, resource tree, manifest and generated registry
//! for a project root. Every missing piece is a distinct structural
//! failure: there is nothing useful to scan without them.

use crate::config::Config;
use crate::error::StructuralError;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Filesystem layout of an Android project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub source_dir: PathBuf,
    pub resource_dir: PathBuf,
    pub manifest: PathBuf,
    pub package: String,
    /// The generated identifier registry (`gen/<package>/R.java`).
    pub registry: PathBuf,
}

impl ProjectLayout {
    /// Resolve the layout for `root`, honoring config overrides for the
    /// source and resource trees.
    pub fn discover(root: &Path, config: &Config) -> Result<Self, StructuralError> {
        let source_dir = resolve(root, config.source_dir.as_deref(), "src");
        let resource_dir = resolve(root, config.resource_dir.as_deref(), "res");
        let manifest = root.join("AndroidManifest.xml");

        if !source_dir.is_dir() || !resource_dir.is_dir() || !manifest.is_file() {
            return Err(StructuralError::InvalidProjectRoot(root.to_path_buf()));
        }

        let package = package_name(&manifest)
            .ok_or_else(|| StructuralError::MissingPackageName(manifest.clone()))?;
        debug!("application package: {package}");

        let gen_dir = root.join("gen");
        let registry = gen_dir.join(package.replace('.', "/")).join("R.java");
        if !registry.is_file() {
            return Err(StructuralError::MissingRegistry(gen_dir));
        }

        Ok(Self {
            root: root.to_path_buf(),
            source_dir,
            resource_dir,
            manifest,
            package,
            registry,
        })
    }
}

fn resolve(root: &Path, configured: Option<&Path>, default: &str) -> PathBuf {
    match configured {
        Some(dir) => root.join(dir),
        None => root.join(default),
    }
}

/// Application package from a manifest's `<manifest ... package="...">`.
pub fn package_name(manifest: &Path) -> Option<String> {
    let contents = fs::read_to_string(manifest).ok()?;
    let pattern =
        Regex::new(r#"(?s)<manifest\s+.*?package\s*=\s*"([A-Za-z0-9_.]+)".*?>"#).unwrap();
    let package = pattern.captures(&contents)?.get(1)?.as_str().trim().to_string();
    if package.is_empty() {
        None
    } else {
        Some(package)
    }
}
