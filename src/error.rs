use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ClassQueryResult<T> = Result<T, ClassQueryError>;

/// Fatal errors. These abort a pass before any DOM mutation happens.
#[derive(Error, Debug, Clone)]
pub enum ClassQueryError {
    #[error("Markup parse error: {0}")]
    MarkupError(String),

    #[error("Empty document: no elements found")]
    EmptyDocument,

    #[error("Multiple root elements found. A page must have exactly one root element")]
    MultipleRootElements,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<roxmltree::Error> for ClassQueryError {
    fn from(err: roxmltree::Error) -> Self {
        ClassQueryError::MarkupError(err.to_string())
    }
}

/// Non-fatal, clause-local problems found while decoding a marker attribute.
///
/// A diagnostic never aborts the pass: the offending clause is skipped and
/// every other clause on the same element is still processed. Diagnostics are
/// collected into the pass report so callers can surface authoring mistakes.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    #[error("Clause {index} ('{clause}') is missing the ',' separating condition from style token")]
    MissingSeparator { index: usize, clause: String },

    #[error("Clause {index} has an empty media condition")]
    EmptyCondition { index: usize },

    #[error("Clause {index} has an empty style token")]
    EmptyStyleToken { index: usize },

    #[error("Clause {index} has an invalid style token '{token}': must start with a letter and contain only letters, digits, '-' or '_'")]
    InvalidStyleToken { index: usize, token: String },
}
