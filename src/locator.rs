//! Declaration locating: record where each resource is actually declared.
//!
//! Walks the resource tree (hidden entries skipped) and applies every
//! relevant type rule to every readable file, appending the file's absolute
//! path and the parent directory's qualifier to each declared resource.
//! Contents are decoded lossily: binary resources (a `.png` drawable) still
//! declare through the filename-identity rules. Recording is append-only
//! and keyed by file identity, so no two files can overwrite each other's
//! contribution.

use crate::resource::GroupedResources;
use crate::rules::{directory_qualifier, RuleSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

pub struct DeclarationLocator<'a> {
    rules: &'a RuleSet,
}

impl<'a> DeclarationLocator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Populate declared paths and configurations for every resource in the
    /// grouped view. A single file may declare zero, one or many resources;
    /// an unreadable file contributes no declarations.
    pub fn locate(&self, resource_root: &Path, grouped: &mut GroupedResources) {
        let walker = WalkDir::new(resource_root)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker.filter_map(|entry| entry.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let file = entry.path();
            let Some(parent) = file.parent() else {
                continue;
            };
            let Some(file_name) = file.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(qualifier) = directory_qualifier(parent) else {
                continue;
            };

            // Lossy, not strict: a binary drawable must still reach the
            // filename-identity rules.
            let contents = match fs::read(file) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    warn!("failed to read {}: {err}", file.display());
                    continue;
                }
            };

            let absolute = absolute_path(file);
            for (res_type, by_name) in grouped.iter_mut() {
                let Some(kind) = self.rules.get(res_type) else {
                    continue;
                };
                for resource in by_name.values_mut() {
                    if kind.declares(parent, file_name, &contents, &resource.name) {
                        resource.declared_paths.insert(absolute.clone());
                        resource.configurations.insert(qualifier.clone());
                    }
                }
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn absolute_path(file: &Path) -> PathBuf {
    fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf())
}
