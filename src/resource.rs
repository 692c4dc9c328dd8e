use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Identity of a resource: `(type, name)`, e.g. `("string", "app_name")`.
///
/// Working sets are keyed by identity alone; the mutable declaration data
/// lives in [`Resource`] and is only populated during the locator pass.
pub type ResourceId = (String, String);

/// Grouped-by-type view of a working set.
///
/// Outer map sorted by type name, inner map sorted by resource name. The
/// ordering is a reporting contract, not an identity contract.
pub type GroupedResources = BTreeMap<String, BTreeMap<String, Resource>>;

/// A declarable entity in the project, plus everywhere it was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Resource type (e.g. "string", "drawable")
    pub res_type: String,

    /// Resource name (e.g. "app_name")
    pub name: String,

    /// Every path where a declaration of this resource was found
    pub declared_paths: BTreeSet<PathBuf>,

    /// Directory qualifiers the resource is declared under (e.g. "values-en-rUS")
    pub configurations: BTreeSet<String>,
}

impl Resource {
    pub fn new(res_type: String, name: String) -> Self {
        Self {
            res_type,
            name,
            declared_paths: BTreeSet::new(),
            configurations: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> ResourceId {
        (self.res_type.clone(), self.name.clone())
    }

    pub fn has_no_declared_paths(&self) -> bool {
        self.declared_paths.is_empty()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10}: {}", self.res_type, self.name)?;
        for path in &self.declared_paths {
            write!(f, "\n    {}", path.display())?;
        }
        Ok(())
    }
}

/// Build the grouped view of a working set, outer and inner maps sorted.
pub fn group_by_type(ids: &BTreeSet<ResourceId>) -> GroupedResources {
    let mut grouped = GroupedResources::new();
    for (res_type, name) in ids {
        grouped
            .entry(res_type.clone())
            .or_default()
            .insert(name.clone(), Resource::new(res_type.clone(), name.clone()));
    }
    grouped
}

/// Total number of resources across a grouped view.
pub fn grouped_len(grouped: &GroupedResources) -> usize {
    grouped.values().map(|by_name| by_name.len()).sum()
}
