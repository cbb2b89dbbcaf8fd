//! Compiler errors and non-fatal diagnostics

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Fatal compilation failures; no partial route table is ever produced
#[derive(Debug, Error)]
pub enum RouteError {
    /// The page source could not enumerate pages
    #[error("page discovery failed")]
    Discovery(#[source] anyhow::Error),

    /// A page's module failed to load
    #[error("failed to load module for page '{page}'")]
    ModuleLoad {
        page: String,
        #[source]
        source: anyhow::Error,
    },

    /// Two pages resolve to the same route path
    #[error("route '{path}' is declared by both '{first}' and '{second}'")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },

    /// More than one not-found page was discovered
    #[error("multiple not-found pages: {}", pages.join(", "))]
    MultipleNotFound { pages: Vec<String> },

    /// A page was described with no path segments
    #[error("page descriptor has no path segments")]
    EmptySegments,
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;

/// Conditions worth reporting that do not stop compilation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No not-found page: the table has no wildcard fallback
    MissingNotFound { expected: String },

    /// A child page whose parent route does not exist; it is left out
    OrphanChild { page: String, parent: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingNotFound { expected } => write!(
                f,
                "no '{}' page found, unmatched URLs have no fallback route",
                expected
            ),
            Diagnostic::OrphanChild { page, parent } => write!(
                f,
                "child page '{}' has no parent route '/{}', it was not registered",
                page, parent
            ),
        }
    }
}
