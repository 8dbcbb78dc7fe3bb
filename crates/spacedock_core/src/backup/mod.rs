//! Remote backup contract and orchestration.
//!
//! # Responsibility
//! - Define the store interface a remote backend implements for per-account
//!   workspace snapshots.
//! - Push and pull whole documents through the wire codec.
//!
//! # Invariants
//! - A restore validates the fetched document before anything is returned;
//!   a corrupt backup never produces a partial workspace.
//! - The core never opens network connections itself; transport lives
//!   behind `BackupStore`.

use crate::model::workspace::WorkspaceApp;
use crate::persistence::{codec, PersistenceError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque remote account identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AccountId = i64;

/// Failure reported by a backup store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupError {
    /// No snapshot is stored for this account.
    NotFound,
    /// Transport-level failure talking to the store.
    Connection(String),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no backup found for this account"),
            Self::Connection(detail) => write!(f, "backup store connection failed: {detail}"),
        }
    }
}

impl Error for BackupError {}

/// Remote snapshot storage keyed by account.
///
/// `backup` overwrites the previous snapshot for the account; `restore`
/// returns the stored document text verbatim.
pub trait BackupStore {
    fn backup(&self, account: AccountId, document: &str) -> Result<(), BackupError>;
    fn restore(&self, account: AccountId) -> Result<String, BackupError>;
}

pub type BackupOpResult<T> = Result<T, BackupOpError>;

/// Errors from backup orchestration on top of the store contract.
#[derive(Debug)]
pub enum BackupOpError {
    /// Failure reported by the store itself.
    Store(BackupError),
    /// The restored document failed validation; nothing was produced.
    Format(PersistenceError),
}

impl Display for BackupOpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BackupOpError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Format(err) => Some(err),
        }
    }
}

impl From<BackupError> for BackupOpError {
    fn from(value: BackupError) -> Self {
        Self::Store(value)
    }
}

impl From<PersistenceError> for BackupOpError {
    fn from(value: PersistenceError) -> Self {
        Self::Format(value)
    }
}

/// Pushes the current workspace as this account's snapshot.
pub fn backup_workspace(
    app: &WorkspaceApp,
    store: &dyn BackupStore,
    account: AccountId,
) -> BackupOpResult<()> {
    let document = codec::workspace_to_json_string(app)?;
    store.backup(account, &document)?;
    info!(
        "event=backup_push module=backup status=ok account={account} bytes={}",
        document.len()
    );
    Ok(())
}

/// Pulls and decodes this account's snapshot into a fresh workspace.
pub fn restore_workspace(
    store: &dyn BackupStore,
    account: AccountId,
) -> BackupOpResult<WorkspaceApp> {
    let document = match store.restore(account) {
        Ok(document) => document,
        Err(err) => {
            error!("event=backup_pull module=backup status=error account={account} error={err}");
            return Err(err.into());
        }
    };
    match codec::workspace_from_json_str(&document) {
        Ok(app) => {
            info!(
                "event=backup_pull module=backup status=ok account={account} spaces={}",
                app.space_count()
            );
            Ok(app)
        }
        Err(err) => {
            error!(
                "event=backup_pull module=backup status=error account={account} error_code=invalid_format error={err}"
            );
            Err(err.into())
        }
    }
}
