//! The full unused-resource pipeline.
//!
//! Registry -> usage scan -> declaration locating (over both partitions)
//! -> library override resolution -> coverage matrices. The two working
//! sets always partition the registry: a resource is in exactly one of
//! them, and overrides are the only later removal.

use crate::config::Config;
use crate::error::StructuralError;
use crate::library;
use crate::locator::DeclarationLocator;
use crate::matrix::{build_matrices, TypeMatrix};
use crate::project::ProjectLayout;
use crate::registry;
use crate::resource::{group_by_type, grouped_len, GroupedResources};
use crate::rules::RuleSet;
use crate::scanner::{FileFamily, UsageScanner};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Everything the reporting sink needs.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    /// Declared-but-unreferenced resources, with their declared paths
    pub unused: GroupedResources,

    /// Referenced resources, with their configurations populated
    pub used: GroupedResources,

    /// Per-type configuration coverage tables
    pub matrices: Vec<TypeMatrix>,

    pub total_declared: usize,
    pub total_unused: usize,
    pub removed_by_libraries: usize,
}

pub struct Analyzer {
    rules: RuleSet,
    config: Config,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self {
            rules: RuleSet::standard(),
            config,
        }
    }

    /// Run the whole pipeline over a project root.
    pub fn analyze(&self, root: &Path) -> Result<AnalysisReport, StructuralError> {
        let layout = ProjectLayout::discover(root, &self.config)?;

        let registry = registry::load_listing(&layout.registry)?;
        let total_declared = registry.len();
        info!(
            "{total_declared} resources found in {}",
            layout.registry.display()
        );

        // Usage scan: sources, then the resource tree, then the manifest.
        let mut candidates = registry;
        let mut used_ids = BTreeSet::new();
        let scanner = UsageScanner::new(&self.rules);
        scanner.scan_tree(
            &layout.source_dir,
            FileFamily::Identifier,
            &mut candidates,
            &mut used_ids,
        );
        scanner.scan_tree(
            &layout.resource_dir,
            FileFamily::Markup,
            &mut candidates,
            &mut used_ids,
        );
        scanner.scan_tree(
            &layout.manifest,
            FileFamily::Markup,
            &mut candidates,
            &mut used_ids,
        );
        debug!(
            "{} used, {} candidates after scanning",
            used_ids.len(),
            candidates.len()
        );

        // Locate declarations for both partitions: paths for the report,
        // configurations for the matrices.
        let mut unused = group_by_type(&candidates);
        let mut used = group_by_type(&used_ids);
        let locator = DeclarationLocator::new(&self.rules);
        locator.locate(&layout.resource_dir, &mut unused);
        locator.locate(&layout.resource_dir, &mut used);

        // Resources supplied (and never redeclared) by library projects are
        // not dead.
        let mut library_roots = library::discover_libraries(root);
        library_roots.extend(self.config.libraries.iter().map(|path| root.join(path)));
        let mut removed_by_libraries = 0;
        for lib_root in &library_roots {
            let supplied = library::library_resources(lib_root);
            removed_by_libraries += library::resolve_overrides(&mut unused, &supplied);
        }
        if removed_by_libraries > 0 {
            info!("{removed_by_libraries} resources supplied by library projects");
        }

        let matrices = build_matrices(&used);
        let total_unused = grouped_len(&unused);

        Ok(AnalysisReport {
            unused,
            used,
            matrices,
            total_declared,
            total_unused,
            removed_by_libraries,
        })
    }
}
