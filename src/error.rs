//! Error taxonomy for revision selection
//!
//! None of these are fatal to a dialog session: a missing revision reads as
//! "nothing selected", a failed load reads as an empty list, and a load that
//! outlives its dialog is dropped.

use thiserror::Error;

/// Errors produced while selecting or resolving a revision
#[derive(Debug, Error)]
pub enum Error {
    /// The expression is empty, malformed, or names no commit
    #[error("Revision not found: '{expression}'")]
    RevisionNotFound {
        /// The expression that failed to resolve
        expression: String,
    },

    /// A background ref listing failed
    #[error("Failed to load {what}: {message}")]
    LoadFailure {
        /// Which list was being loaded ("tags" or "branches")
        what: &'static str,
        /// Rendered cause chain
        message: String,
    },

    /// The dialog was closed before a background load delivered its result
    #[error("Dialog closed before {what} finished loading")]
    DisposedDuringLoad {
        /// Which list was being loaded
        what: &'static str,
    },

    /// The repository could not be opened or read
    #[error(transparent)]
    Repository(#[from] git2::Error),
}

impl Error {
    /// Build a [`Error::RevisionNotFound`] for the given expression
    #[must_use]
    pub fn not_found(expression: impl Into<String>) -> Self {
        Self::RevisionNotFound {
            expression: expression.into(),
        }
    }

    /// Whether this error means "no value selected" rather than a broken repository
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RevisionNotFound { .. })
    }
}
