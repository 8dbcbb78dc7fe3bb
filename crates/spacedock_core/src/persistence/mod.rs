//! Workspace document persistence.
//!
//! # Responsibility
//! - Define the JSON wire codec for the workspace tree.
//! - Provide the file-backed store used by save and load flows.
//!
//! # Invariants
//! - Loads are all-or-nothing: a document either decodes into a complete
//!   workspace or nothing is produced.
//! - I/O failures and malformed documents stay distinct error cases, so a
//!   missing save file can be treated as "no data yet".

pub mod codec;
pub mod store;

pub use codec::{
    workspace_from_json, workspace_from_json_str, workspace_to_json, workspace_to_json_string,
};
pub use store::WorkspaceStore;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence failures, split by recovery semantics.
#[derive(Debug)]
pub enum PersistenceError {
    /// File-level failure while reading or writing the document.
    Io(std::io::Error),
    /// The document is not a valid workspace; nothing was loaded.
    InvalidFormat { reason: String },
}

impl PersistenceError {
    pub(crate) fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Whether this failure is just a missing save file.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "workspace file i/o error: {err}"),
            Self::InvalidFormat { reason } => write!(f, "invalid workspace document: {reason}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidFormat { .. } => None,
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
