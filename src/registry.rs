//! Parser for the generated identifier registry (`R.java`).
//!
//! The listing is line-oriented and stateful: a type-opening line
//! establishes the current type for the identifier lines that follow it.
//! Identifier lines seen before any type line, and malformed lines, are
//! dropped; parsing itself never fails.

use crate::error::StructuralError;
use crate::resource::ResourceId;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Parse the listing text into the full, deduplicated candidate set.
///
/// Every emitted identity has a non-empty type and name.
pub fn parse_listing(text: &str) -> BTreeSet<ResourceId> {
    let type_line = Regex::new(r"^\s*public static final class (\w+)\s*\{$").unwrap();
    let name_line =
        Regex::new(r"^\s*public static( final)? int(\[\])? (\w+)\s*=\s*(\{|(0x)?[0-9A-Fa-f]+;)\s*$")
            .unwrap();

    let mut resources = BTreeSet::new();
    let mut current_type: Option<String> = None;

    for line in text.lines() {
        if let Some(caps) = name_line.captures(line) {
            if let Some(res_type) = &current_type {
                resources.insert((res_type.clone(), caps[3].to_string()));
            }
        } else if let Some(caps) = type_line.captures(line) {
            current_type = Some(caps[1].to_string());
        }
    }

    resources
}

/// Load and parse a registry file. A missing or unreadable registry is a
/// structural failure; the whole run depends on it.
pub fn load_listing(path: &Path) -> Result<BTreeSet<ResourceId>, StructuralError> {
    let text = fs::read_to_string(path).map_err(|source| StructuralError::UnreadableRegistry {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_listing(&text))
}
