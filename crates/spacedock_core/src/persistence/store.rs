//! File-backed workspace document store.
//!
//! # Responsibility
//! - Read and write the workspace document at one configured path.
//! - Log save/load outcomes as structured events.
//!
//! # Invariants
//! - A failed load never yields a partial workspace; callers keep whatever
//!   state they had.
//! - A missing file surfaces as an I/O error, distinguishable from a
//!   malformed document via `PersistenceError::is_missing_file`.

use super::{codec, PersistenceResult};
use crate::model::workspace::WorkspaceApp;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Store bound to a single document path.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    path: PathBuf,
}

impl WorkspaceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the whole workspace document.
    pub fn save(&self, app: &WorkspaceApp) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let document = codec::workspace_to_json_string(app)?;
        match std::fs::write(&self.path, document) {
            Ok(()) => {
                info!(
                    "event=workspace_save module=persistence status=ok path={} spaces={} duration_ms={}",
                    self.path.display(),
                    app.space_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=workspace_save module=persistence status=error path={} error={err}",
                    self.path.display()
                );
                Err(err.into())
            }
        }
    }

    /// Reads and decodes the whole workspace document.
    pub fn load(&self) -> PersistenceResult<WorkspaceApp> {
        let started_at = Instant::now();
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    info!(
                        "event=workspace_load module=persistence status=missing path={}",
                        self.path.display()
                    );
                } else {
                    error!(
                        "event=workspace_load module=persistence status=error path={} error={err}",
                        self.path.display()
                    );
                }
                return Err(err.into());
            }
        };
        match codec::workspace_from_json_str(&text) {
            Ok(app) => {
                info!(
                    "event=workspace_load module=persistence status=ok path={} spaces={} duration_ms={}",
                    self.path.display(),
                    app.space_count(),
                    started_at.elapsed().as_millis()
                );
                Ok(app)
            }
            Err(err) => {
                error!(
                    "event=workspace_load module=persistence status=error path={} error={err}",
                    self.path.display()
                );
                Err(err)
            }
        }
    }

    /// Loads the document, mapping a missing file to an empty workspace.
    ///
    /// Malformed documents and real I/O failures still fail so callers never
    /// silently overwrite data they could not read.
    pub fn load_or_default(&self) -> PersistenceResult<WorkspaceApp> {
        match self.load() {
            Ok(app) => Ok(app),
            Err(err) if err.is_missing_file() => Ok(WorkspaceApp::new()),
            Err(err) => Err(err),
        }
    }
}
