//! Rich diagnostic error types for the component explorer.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know what went wrong and how to
//! fix it.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for the explorer.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum ExplorerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("data file not found: {path}")]
    #[diagnostic(
        code(explorer::load::missing),
        help(
            "The component dataset could not be located. Pass the Turtle file with \
             --data, or set `data_file` in the config file."
        )
    )]
    Missing { path: String },

    #[error("failed to read data file {path}")]
    #[diagnostic(
        code(explorer::load::unreadable),
        help("Check that the file is readable by the current user.")
    )]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed Turtle in {origin}: {message}")]
    #[diagnostic(
        code(explorer::load::malformed),
        help(
            "The document is not valid Turtle. Fix the syntax error reported above \
             and reload."
        )
    )]
    Malformed { origin: String, message: String },

    #[error("store rejected statements from {origin}: {message}")]
    #[diagnostic(
        code(explorer::load::storage),
        help(
            "The triple store could not persist the parsed statements. \
             Check the store directory permissions and free disk space."
        )
    )]
    Storage { origin: String, message: String },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("triple store unreachable ({store}): {message}")]
    #[diagnostic(
        code(explorer::store::connection),
        help(
            "The store did not answer. If you use a remote SPARQL endpoint, check that \
             it is running and reachable, then retry."
        )
    )]
    Connection { store: String, message: String },

    #[error("SPARQL query failed ({store}): {message}")]
    #[diagnostic(
        code(explorer::store::query),
        help(
            "The store rejected the query or returned a response that is not a \
             SPARQL result set. This is not retried automatically."
        )
    )]
    Query { store: String, message: String },
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("component search unavailable: {message}")]
    #[diagnostic(
        code(explorer::catalog::connection),
        help("The triple store could not be reached. Retry once it is back.")
    )]
    Connection { message: String },

    #[error("component query failed: {message}")]
    #[diagnostic(
        code(explorer::catalog::query),
        help("The store answered with an error or an unexpected result shape.")
    )]
    Query { message: String },

    #[error("component not found: \"{id}\"")]
    #[diagnostic(
        code(explorer::catalog::not_found),
        help("List available components with `ros-explorer list`.")
    )]
    NotFound { id: String },
}

impl CatalogError {
    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection { .. } => Self::Connection {
                message: err.to_string(),
            },
            StoreError::Query { .. } => Self::Query {
                message: err.to_string(),
            },
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Convenience alias for explorer-wide results.
pub type ExplorerResult<T> = std::result::Result<T, ExplorerError>;
