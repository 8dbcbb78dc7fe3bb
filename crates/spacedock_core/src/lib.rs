//! spacedock core: workspace domain logic shared by every front end.
//!
//! # Responsibility
//! - Own the workspace model (spaces, resources, to-do lists), the JSON
//!   persistence round trip, the countdown timer engine, and the backup
//!   orchestration.
//! - Stay UI-free: launching and remote storage are collaborator traits.
//!
//! # Invariants
//! - All domain invariants are enforced here, never in a front end.

pub mod backup;
pub mod launch;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod timer;

pub use backup::{
    backup_workspace, restore_workspace, AccountId, BackupError, BackupOpError, BackupOpResult,
    BackupStore,
};
pub use launch::{LaunchError, ResourceLauncher};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::resource::{Resource, ResourceError, ResourceKind, ResourceResult};
pub use model::space::{LaunchFailure, Space, SpaceError, SpaceResult};
pub use model::todo::{Task, ToDoList, TodoError, TodoResult};
pub use model::workspace::WorkspaceApp;
pub use persistence::{
    workspace_from_json, workspace_from_json_str, workspace_to_json, workspace_to_json_string,
    PersistenceError, PersistenceResult, WorkspaceStore,
};
pub use timer::{
    format_remaining, ListenerId, TimerError, TimerEvent, TimerListener, TimerResult, WorkTimer,
    DEFAULT_TICK_INTERVAL,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
