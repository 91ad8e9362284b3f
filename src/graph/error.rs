//! Error types for graph resolution.

use thiserror::Error;

/// Errors returned from the top-level resolve surface.
///
/// Importer failures below the root are never escalated here; they surface as
/// unresolved nodes in the tree instead.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The root package itself could not be resolved. No partial tree is
    /// considered valid in this case.
    #[error("unable to resolve root package `{0}`")]
    RootUnresolved(String),

    /// The configured name-matcher pattern failed to compile. Raised at
    /// initialization time, before any traversal.
    #[error("invalid name matcher pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The working directory for the root lookup could not be determined.
    #[error("unable to determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}
