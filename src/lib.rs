//! resweep - declared-but-unused Android resource detection
//!
//! This library cross-references the generated identifier registry
//! (`R.java`) against every reference found in the source tree, the
//! resource tree and the manifest, then reports resources nothing ever
//! uses.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **Project Layout** - locate src/, res/, the manifest and the registry
//! 2. **Registry Builder** - parse the generated listing into candidates
//! 3. **Usage Scanner** - partition candidates into used and unused
//! 4. **Declaration Locator** - record where each resource is declared
//! 5. **Override Resolver** - drop resources supplied by library projects
//! 6. **Coverage Matrix** - per-type configuration tables
//! 7. **Reporting** - terminal, JSON and CSV output

pub mod analysis;
pub mod config;
pub mod error;
pub mod library;
pub mod locator;
pub mod matrix;
pub mod project;
pub mod registry;
pub mod report;
pub mod resource;
pub mod rules;
pub mod scanner;

pub use analysis::{AnalysisReport, Analyzer};
pub use config::Config;
pub use error::StructuralError;
pub use locator::DeclarationLocator;
pub use matrix::TypeMatrix;
pub use project::ProjectLayout;
pub use report::{ReportFormat, Reporter};
pub use resource::{GroupedResources, Resource, ResourceId};
pub use rules::{ResourceKind, RuleSet};
pub use scanner::{FileFamily, UsageScanner};
