//! Usage scanning: partition the candidate set into used and not-yet-used.
//!
//! One scan covers one root (a tree or a single file) and one file family.
//! Matching is whole-file text matching, so declarations split across lines
//! still count. Classification is a monotonic set move: a resource found
//! used anywhere stays used, and the final partition does not depend on the
//! order files are visited, which is why the per-file matching fans out on
//! rayon and the per-file results are unioned afterwards.

use crate::resource::ResourceId;
use crate::rules::{compile_pattern, name_fragment, ResourceKind, RuleSet};
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file-extension family paired with its generic reference form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFamily {
    /// `.java` / `.kt` sources, referencing resources as `R.type.name`.
    Identifier,
    /// `.xml` markup, referencing resources as `@type/name`.
    Markup,
}

impl FileFamily {
    pub fn matches_extension(self, path: &Path) -> bool {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("java") | Some("kt") | Some("kts") => self == FileFamily::Identifier,
            Some("xml") => self == FileFamily::Markup,
            _ => false,
        }
    }

    /// The generic reference pattern for one resource in this family.
    pub fn reference_pattern(self, res_type: &str, name_frag: &str) -> String {
        match self {
            FileFamily::Identifier => format!(r"R\.{res_type}\.{name_frag}[^\w_]"),
            FileFamily::Markup => format!(r#"[" >]@{res_type}/{name_frag}[" <]"#),
        }
    }
}

/// Everything needed to test one candidate against one file, prepared once
/// per scan instead of once per file.
struct Probe {
    id: ResourceId,
    generic: Option<Regex>,
    kind: Option<ResourceKind>,
}

pub struct UsageScanner<'a> {
    rules: &'a RuleSet,
}

impl<'a> UsageScanner<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Classify every candidate against one scan root.
    ///
    /// Matched resources move from `candidates` to `used`. The move happens
    /// after all files are evaluated, so no resource is double-counted or
    /// lost. A file that cannot be read contributes no matches.
    pub fn scan_tree(
        &self,
        root: &Path,
        family: FileFamily,
        candidates: &mut BTreeSet<ResourceId>,
        used: &mut BTreeSet<ResourceId>,
    ) {
        let probes: Vec<Probe> = candidates
            .iter()
            .map(|id| {
                let frag = name_fragment(&id.1);
                Probe {
                    id: id.clone(),
                    generic: compile_pattern(&family.reference_pattern(&id.0, &frag)),
                    kind: self.rules.get(&id.0),
                }
            })
            .collect();

        let found: HashSet<ResourceId> = if root.is_file() {
            // A root handed in as a single file (the manifest) is scanned
            // without directory context.
            if family.matches_extension(root) {
                self.scan_file(None, root, &probes)
            } else {
                HashSet::new()
            }
        } else {
            collect_files(root, family)
                .par_iter()
                .map(|file| self.scan_file(file.parent(), file, &probes))
                .reduce(HashSet::new, |mut acc, part| {
                    acc.extend(part);
                    acc
                })
        };

        debug!(
            "scan of {} marked {} of {} candidates used",
            root.display(),
            found.len(),
            candidates.len()
        );

        for id in found {
            candidates.remove(&id);
            used.insert(id);
        }
    }

    fn scan_file(&self, parent: Option<&Path>, file: &Path, probes: &[Probe]) -> HashSet<ResourceId> {
        let mut found = HashSet::new();

        let contents = match fs::read_to_string(file) {
            Ok(contents) => contents,
            Err(err) => {
                // Failing to read means "not observed here", never "used".
                warn!("failed to read {}: {err}", file.display());
                return found;
            }
        };
        let file_name = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        for probe in probes {
            let generic_hit = probe
                .generic
                .as_ref()
                .map(|re| re.is_match(&contents))
                .unwrap_or(false);

            if generic_hit
                || probe
                    .kind
                    .map(|kind| kind.uses(parent, file_name, &contents, &probe.id.1))
                    .unwrap_or(false)
            {
                found.insert(probe.id.clone());
            }
        }

        found
    }
}

fn collect_files(root: &Path, family: FileFamily) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| family.matches_extension(path))
        .collect()
}
