use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures that invalidate the whole scan.
///
/// Anything not listed here is local and recoverable: an unreadable file or
/// a malformed resource-name pattern is logged and contributes no matches,
/// and the scan continues over the remaining files.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("{0} is not a valid Android project root (missing src/, res/ or AndroidManifest.xml)")]
    InvalidProjectRoot(PathBuf),

    #[error("unable to determine the application package from {0}; ensure the <manifest> element sets it")]
    MissingPackageName(PathBuf),

    #[error("no generated R.java found under {0}; build the project first")]
    MissingRegistry(PathBuf),

    #[error("the generated registry {path} could not be read")]
    UnreadableRegistry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
