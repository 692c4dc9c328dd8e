//! Per-type declaration and usage rules.
//!
//! Every resource type answers two questions: "does this file, inside this
//! directory, declare this resource?" and, optionally, "does this file use
//! it in a form the generic reference patterns cannot see?". The set of
//! types is closed, so rules are plain enum dispatch over [`ResourceKind`],
//! collected into an immutable lookup table by [`RuleSet::standard`]. There
//! is no global registration: the orchestrator builds the table once and
//! passes it down.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One rule per known resource type.
///
/// Three shapes exist: filename-identity types (one file per resource, e.g.
/// `layout`), markup-block types (a tag with a `name` attribute in a
/// `values` directory, e.g. `string`), and the composite `styleable` type
/// whose attributes only count inside their declaring block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Anim,
    Array,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Id,
    Integer,
    Layout,
    Menu,
    Plurals,
    Raw,
    StringRes,
    Style,
    Styleable,
    Xml,
}

impl ResourceKind {
    pub fn all() -> [ResourceKind; 17] {
        [
            ResourceKind::Anim,
            ResourceKind::Array,
            ResourceKind::Attr,
            ResourceKind::Bool,
            ResourceKind::Color,
            ResourceKind::Dimen,
            ResourceKind::Drawable,
            ResourceKind::Id,
            ResourceKind::Integer,
            ResourceKind::Layout,
            ResourceKind::Menu,
            ResourceKind::Plurals,
            ResourceKind::Raw,
            ResourceKind::StringRes,
            ResourceKind::Style,
            ResourceKind::Styleable,
            ResourceKind::Xml,
        ]
    }

    /// The type name as it appears in the generated registry.
    pub fn type_name(self) -> &'static str {
        match self {
            ResourceKind::Anim => "anim",
            ResourceKind::Array => "array",
            ResourceKind::Attr => "attr",
            ResourceKind::Bool => "bool",
            ResourceKind::Color => "color",
            ResourceKind::Dimen => "dimen",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Id => "id",
            ResourceKind::Integer => "integer",
            ResourceKind::Layout => "layout",
            ResourceKind::Menu => "menu",
            ResourceKind::Plurals => "plurals",
            ResourceKind::Raw => "raw",
            ResourceKind::StringRes => "string",
            ResourceKind::Style => "style",
            ResourceKind::Styleable => "styleable",
            ResourceKind::Xml => "xml",
        }
    }

    /// Does `file_name` inside `parent`, with text `contents`, declare the
    /// resource named `name`?
    pub fn declares(self, parent: &Path, file_name: &str, contents: &str, name: &str) -> bool {
        if !parent.is_dir() {
            return false;
        }
        let Some(base) = directory_base(parent) else {
            return false;
        };

        match self {
            ResourceKind::Anim
            | ResourceKind::Layout
            | ResourceKind::Menu
            | ResourceKind::Raw
            | ResourceKind::Xml => base == self.type_name() && declares_as_file(file_name, name),

            ResourceKind::Drawable => {
                if base == "drawable" {
                    declares_as_file(file_name, name)
                } else if base == "values" {
                    declares_as_value_tag("drawable", contents, name)
                } else {
                    false
                }
            }

            ResourceKind::Array => {
                base == "values" && declares_as_value_tag("([a-z]+-)?array", contents, name)
            }
            ResourceKind::Attr => base == "values" && declares_as_value_tag("attr", contents, name),
            ResourceKind::Bool => base == "values" && declares_as_value_tag("bool", contents, name),
            ResourceKind::Color => {
                base == "values" && declares_as_value_tag("color", contents, name)
            }
            ResourceKind::Dimen => {
                base == "values" && declares_as_value_tag("dimen", contents, name)
            }
            ResourceKind::Integer => {
                base == "values" && declares_as_value_tag("integer", contents, name)
            }
            ResourceKind::Plurals => {
                base == "values" && declares_as_value_tag("plurals", contents, name)
            }
            ResourceKind::StringRes => {
                base == "values" && declares_as_value_tag("string", contents, name)
            }
            ResourceKind::Style => {
                base == "values" && declares_as_value_tag("style", contents, name)
            }

            ResourceKind::Id => (base == "values" || base == "layout") && declares_id(contents, name),

            ResourceKind::Styleable => base == "values" && declares_styleable(contents, name),
        }
    }

    /// Does `contents` use the resource in a type-specific form?
    ///
    /// `parent` is `None` when invoked as a pure text probe with no
    /// directory context; a non-`None` parent that fails the rule's
    /// directory gating yields `false`.
    pub fn uses(self, parent: Option<&Path>, _file_name: &str, contents: &str, name: &str) -> bool {
        match self {
            ResourceKind::Attr => uses_attr(parent, contents, name),
            ResourceKind::Style => uses_style(parent, contents, name),
            _ => false,
        }
    }
}

/// The immutable type-name -> rule table.
pub struct RuleSet {
    rules: HashMap<&'static str, ResourceKind>,
}

impl RuleSet {
    /// Build the full rule table, one entry per known resource type.
    pub fn standard() -> Self {
        let rules = ResourceKind::all()
            .iter()
            .map(|kind| (kind.type_name(), *kind))
            .collect();
        Self { rules }
    }

    pub fn get(&self, res_type: &str) -> Option<ResourceKind> {
        self.rules.get(res_type).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Regex fragment for a resource name: each underscore may appear in a
/// reference as `_`, `.` or `-` (values/markup contexts rewrite them).
pub fn name_fragment(name: &str) -> String {
    name.split('_')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("[_.\\-]")
}

/// Compile a derived pattern, treating a malformed one as matching nothing.
pub(crate) fn compile_pattern(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            debug!("skipping malformed pattern {pattern}: {err}");
            None
        }
    }
}

fn is_match(pattern: &str, text: &str) -> bool {
    compile_pattern(pattern)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// The substring of a directory name before its first qualifier separator:
/// `values-en-rUS` has base `values`.
pub fn directory_base(dir: &Path) -> Option<String> {
    let name = dir.file_name()?.to_str()?;
    Some(name.split('-').next().unwrap_or(name).to_string())
}

/// The full directory name, used verbatim as a configuration label.
pub fn directory_qualifier(dir: &Path) -> Option<String> {
    Some(dir.file_name()?.to_str()?.to_string())
}

fn declares_as_file(file_name: &str, name: &str) -> bool {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    is_match(&format!("^{}$", name_fragment(name)), stem)
}

fn declares_as_value_tag(tag: &str, contents: &str, name: &str) -> bool {
    // The whitespace after the tag keeps `<string` from matching `<string-array`.
    is_match(
        &format!(r#"(?s)<{}\s.*?name\s*=\s*"{}".*?/?>"#, tag, name_fragment(name)),
        contents,
    )
}

fn declares_id(contents: &str, name: &str) -> bool {
    let frag = name_fragment(name);
    is_match(
        &format!(r#"(?s)<item.*?type\s*=\s*"id".*?name\s*=\s*"{frag}".*?/?>"#),
        contents,
    ) || is_match(
        &format!(r#"(?s)<item.*?name\s*=\s*"{frag}".*?type\s*=\s*"id".*?/?>"#),
        contents,
    ) || is_match(&format!(r#":id\s*=\s*"@\+id/{frag}""#), contents)
}

/// `Widget_color` (or `Widget.color`) names the `color` attribute of the
/// `Widget` group; a bare group name has no member part.
fn split_group_member(name: &str) -> (&str, Option<&str>) {
    match name.find(['_', '.']) {
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
        None => (name, None),
    }
}

fn declares_styleable(contents: &str, name: &str) -> bool {
    let (group, member) = split_group_member(name);
    let group_frag = name_fragment(group);

    let Some(member) = member else {
        return is_match(
            &format!(r#"(?s)<declare-styleable.*?name\s*=\s*"{group_frag}".*?/?>"#),
            contents,
        );
    };

    // An attribute only counts inside its group's block; the same attr name
    // elsewhere in the file is a different declaration.
    let Some(block_re) = compile_pattern(&format!(
        r#"(?s)<declare-styleable.*?name\s*=\s*"{group_frag}".*?>(.*?)</declare-styleable\s*>"#
    )) else {
        return false;
    };
    let Some(caps) = block_re.captures(contents) else {
        return false;
    };
    let block = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    is_match(
        &format!(r#"(?s)<attr.*?name\s*=\s*"{}".*?/?>"#, name_fragment(member)),
        block,
    )
}

/// Directory gating shared by the use predicates: a `None` parent means any
/// directory is acceptable, an invalid parent fails closed.
fn parent_base_in(parent: Option<&Path>, allowed: &[&str]) -> bool {
    match parent {
        None => true,
        Some(dir) => {
            if !dir.is_dir() {
                return false;
            }
            directory_base(dir)
                .map(|base| allowed.contains(&base.as_str()))
                .unwrap_or(false)
        }
    }
}

fn uses_attr(parent: Option<&Path>, contents: &str, name: &str) -> bool {
    if !parent_base_in(parent, &["layout", "values"]) {
        return false;
    }
    let frag = name_fragment(name);

    // Known under-approximation: an attr referenced like this is never
    // reported as unused, even when it genuinely is. Do not tighten these
    // patterns; a false positive here is worse than a miss.
    is_match(&format!(r#"(?s)<.+?:{frag}\s*=\s*".*?".*?/?>"#), contents)
        || is_match(&format!(r#"(?s)<item.+?name\s*=\s*"{frag}".*?>"#), contents)
}

fn uses_style(parent: Option<&Path>, contents: &str, name: &str) -> bool {
    if !parent_base_in(parent, &["values"]) {
        return false;
    }
    let frag = name_fragment(name);

    // A style is also used when another style dots off it (name="Parent.Child")
    // or names it as an explicit parent (parent="Parent").
    is_match(
        &format!(r#"(?s)<style.*?name\s*=\s*"{frag}\.\w+".*?/?>"#),
        contents,
    ) || is_match(
        &format!(r#"(?s)<style.*?parent\s*=\s*"{frag}".*?/?>"#),
        contents,
    )
}
