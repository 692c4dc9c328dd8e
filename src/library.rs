//! Override resolution against library sub-projects.
//!
//! An app can override a library resource, so library-declared identities
//! cannot simply be dropped from the report: only a host resource with no
//! declaration anywhere in the host project is assumed to be supplied by
//! the library. A host redeclaration keeps the resource reported, since an
//! override can be used transitively through the library's own code.

use crate::project;
use crate::registry;
use crate::resource::{GroupedResources, ResourceId};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Library roots referenced by the project's properties file, one level
/// deep. Nested library references are not followed.
pub fn discover_libraries(base: &Path) -> Vec<PathBuf> {
    let properties = base.join("project.properties");
    let Ok(text) = fs::read_to_string(&properties) else {
        return Vec::new();
    };

    let reference = Regex::new(r"(?im)^android\.library\.reference\.\d+=(.*)$").unwrap();
    reference
        .captures_iter(&text)
        .map(|caps| base.join(caps[1].trim()))
        .collect()
}

/// The full candidate set a library supplies, from its own generated
/// listing. A broken library contributes nothing rather than failing the
/// host scan.
pub fn library_resources(lib_root: &Path) -> BTreeSet<ResourceId> {
    if !lib_root.is_dir() {
        warn!("library project {} does not exist", lib_root.display());
        return BTreeSet::new();
    }

    let manifest = lib_root.join("AndroidManifest.xml");
    let Some(package) = project::package_name(&manifest) else {
        warn!(
            "skipping library {}: no package in its manifest",
            lib_root.display()
        );
        return BTreeSet::new();
    };

    let listing = lib_root
        .join("gen")
        .join(package.replace('.', "/"))
        .join("R.java");
    match fs::read_to_string(&listing) {
        Ok(text) => {
            let resources = registry::parse_listing(&text);
            debug!(
                "library {} supplies {} resources",
                lib_root.display(),
                resources.len()
            );
            resources
        }
        Err(err) => {
            warn!(
                "skipping library {}: cannot read {}: {err}",
                lib_root.display(),
                listing.display()
            );
            BTreeSet::new()
        }
    }
}

/// Remove library-supplied identities the host never redeclares from the
/// unused grouping. Returns how many were removed.
pub fn resolve_overrides(unused: &mut GroupedResources, library: &BTreeSet<ResourceId>) -> usize {
    let mut removed = 0;

    for (res_type, name) in library {
        if let Some(by_name) = unused.get_mut(res_type) {
            let supplied_only = by_name
                .get(name)
                .map(|resource| resource.has_no_declared_paths())
                .unwrap_or(false);
            if supplied_only {
                by_name.remove(name);
                removed += 1;
            }
        }
    }

    unused.retain(|_, by_name| !by_name.is_empty());
    removed
}
