//! Resource-launch collaborator contract.
//!
//! # Responsibility
//! - Define the interface a platform shell implements to open resources.
//! - Keep the core free of any process-spawning or desktop integration.
//!
//! # Invariants
//! - The core never interprets launch failures; they surface to callers
//!   exactly as the collaborator reported them.

use crate::model::resource::ResourceKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by the platform collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// The host system offers no way to open resources at all.
    SystemNotSupported,
    /// The system is capable, but this particular resource failed to open.
    FailedToOpen(String),
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SystemNotSupported => {
                write!(f, "opening resources is not supported on this system")
            }
            Self::FailedToOpen(reason) => write!(f, "failed to open resource: {reason}"),
        }
    }
}

impl Error for LaunchError {}

/// Platform-side opener for resources, keyed by kind and stored path.
///
/// Implementations live outside the core (a desktop shell, a test double);
/// the core only dispatches on it.
pub trait ResourceLauncher {
    fn launch(&self, kind: ResourceKind, path: &str) -> Result<(), LaunchError>;
}
