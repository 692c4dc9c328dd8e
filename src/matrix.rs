//! Per-type configuration coverage matrices.
//!
//! A pure projection over the used grouping: which configuration qualifiers
//! declare which resource. No matching happens here.

use crate::resource::GroupedResources;
use serde::Serialize;
use std::collections::HashSet;

/// One resource row: which configuration columns declare it.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub name: String,
    pub cells: Vec<bool>,
}

/// The coverage table for one resource type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeMatrix {
    pub res_type: String,
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

impl TypeMatrix {
    /// CSV rendering: a `,<col>,<col>` header row, then one
    /// `name,X,,X` row per resource.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for column in &self.columns {
            out.push(',');
            out.push_str(column);
        }
        for row in &self.rows {
            out.push('\n');
            out.push_str(&row.name);
            for &cell in &row.cells {
                out.push(',');
                if cell {
                    out.push('X');
                }
            }
        }
        out
    }
}

/// One matrix per type that has at least one used resource with recorded
/// configurations. Column order is first-seen while iterating resources in
/// name order, which makes it stable across runs.
pub fn build_matrices(used: &GroupedResources) -> Vec<TypeMatrix> {
    let mut matrices = Vec::new();

    for (res_type, by_name) in used {
        let mut columns: Vec<String> = Vec::new();
        let mut seen = HashSet::new();
        for resource in by_name.values() {
            for configuration in &resource.configurations {
                if seen.insert(configuration.clone()) {
                    columns.push(configuration.clone());
                }
            }
        }
        if columns.is_empty() {
            continue;
        }

        let rows = by_name
            .values()
            .map(|resource| MatrixRow {
                name: resource.name.clone(),
                cells: columns
                    .iter()
                    .map(|column| resource.configurations.contains(column))
                    .collect(),
            })
            .collect();

        matrices.push(TypeMatrix {
            res_type: res_type.clone(),
            columns,
            rows,
        });
    }

    matrices
}
