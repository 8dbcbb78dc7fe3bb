//! Space aggregate: resources, to-do list, and the optional work timer.
//!
//! # Responsibility
//! - Group the launchable resources and the task list for one context.
//! - Own at most one countdown timer and its replace/cancel lifecycle.
//!
//! # Invariants
//! - Starting a timer always cancels the previous one first; a space never
//!   drives two countdowns at once.
//! - Dropping a space cancels its timer.
//! - `launch_all` stops at the first `SystemNotSupported`; per-resource open
//!   failures never prevent the remaining resources from being attempted.

use crate::launch::{LaunchError, ResourceLauncher};
use crate::model::resource::Resource;
use crate::model::todo::ToDoList;
use crate::timer::{TimerError, WorkTimer};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SpaceResult<T> = Result<T, SpaceError>;

/// One failed resource inside a `launch_all` sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchFailure {
    /// Name of the resource that failed.
    pub resource: String,
    pub error: LaunchError,
}

/// Errors for space-level operations.
#[derive(Debug)]
pub enum SpaceError {
    /// The resource index is outside `0..len`.
    ResourceIndexOutOfRange { index: usize, len: usize },
    /// Collaborator failure for a single launch, passed through unchanged.
    Launch(LaunchError),
    /// `launch_all` attempted every resource; these could not be opened.
    LaunchAllFailed { failures: Vec<LaunchFailure> },
    /// A timer query was made while no timer is running.
    NoActiveTimer,
    /// Lifecycle failure from the countdown engine.
    Timer(TimerError),
}

impl Display for SpaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceIndexOutOfRange { index, len } => {
                write!(f, "resource index {index} is out of range for a space with {len}")
            }
            Self::Launch(err) => write!(f, "{err}"),
            Self::LaunchAllFailed { failures } => {
                write!(f, "{} resource(s) failed to open", failures.len())
            }
            Self::NoActiveTimer => write!(f, "no timer is currently running"),
            Self::Timer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SpaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Launch(err) => Some(err),
            Self::Timer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LaunchError> for SpaceError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

impl From<TimerError> for SpaceError {
    fn from(value: TimerError) -> Self {
        Self::Timer(value)
    }
}

/// One named workspace context.
#[derive(Debug)]
pub struct Space {
    name: String,
    resources: Vec<Resource>,
    todo: ToDoList,
    timer: Option<WorkTimer>,
}

impl Space {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            todo: ToDoList::new(),
            timer: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Removes and returns the resource at `index`.
    pub fn remove_resource(&mut self, index: usize) -> SpaceResult<Resource> {
        self.check_resource_index(index)?;
        Ok(self.resources.remove(index))
    }

    /// Removes every resource named `name` exactly; returns how many.
    pub fn remove_resources_named(&mut self, name: &str) -> usize {
        let before = self.resources.len();
        self.resources.retain(|resource| resource.name() != name);
        before - self.resources.len()
    }

    /// First resource with this exact name, if any.
    pub fn resource_named(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub fn resource_named_mut(&mut self, name: &str) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| r.name() == name)
    }

    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Launches the resource at `index` through the collaborator.
    pub fn launch_resource(
        &self,
        index: usize,
        launcher: &dyn ResourceLauncher,
    ) -> SpaceResult<()> {
        self.check_resource_index(index)?;
        self.resources[index].launch(launcher)?;
        Ok(())
    }

    /// Launches every resource in order.
    ///
    /// `SystemNotSupported` aborts the sweep immediately since no later
    /// attempt can succeed; individual open failures are collected and the
    /// sweep continues. Returns how many resources were opened.
    pub fn launch_all(&self, launcher: &dyn ResourceLauncher) -> SpaceResult<usize> {
        let mut failures = Vec::new();
        let mut launched = 0usize;
        for resource in &self.resources {
            match resource.launch(launcher) {
                Ok(()) => launched += 1,
                Err(LaunchError::SystemNotSupported) => {
                    warn!(
                        "event=launch_all module=space status=error space={} reason=system_not_supported",
                        self.name
                    );
                    return Err(SpaceError::Launch(LaunchError::SystemNotSupported));
                }
                Err(error) => failures.push(LaunchFailure {
                    resource: resource.name().to_string(),
                    error,
                }),
            }
        }
        if failures.is_empty() {
            info!(
                "event=launch_all module=space status=ok space={} launched={launched}",
                self.name
            );
            Ok(launched)
        } else {
            warn!(
                "event=launch_all module=space status=error space={} launched={launched} failed={}",
                self.name,
                failures.len()
            );
            Err(SpaceError::LaunchAllFailed { failures })
        }
    }

    pub fn todo(&self) -> &ToDoList {
        &self.todo
    }

    pub fn todo_mut(&mut self) -> &mut ToDoList {
        &mut self.todo
    }

    /// Starts a fresh countdown of `hours` and `minutes`.
    ///
    /// Any previously running timer is cancelled first.
    pub fn start_timer(&mut self, hours: u32, minutes: u32) -> SpaceResult<()> {
        self.start_timer_with(WorkTimer::new(hours, minutes))
    }

    /// Installs a caller-built timer (custom interval, pre-subscribed
    /// listeners) and runs it. The previous timer, if any, is cancelled.
    pub fn start_timer_with(&mut self, timer: WorkTimer) -> SpaceResult<()> {
        self.cancel_timer();
        timer.run()?;
        self.timer = Some(timer);
        Ok(())
    }

    /// Cancels and discards the current timer; no-op without one.
    pub fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn timer(&self) -> Option<&WorkTimer> {
        self.timer.as_ref()
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(WorkTimer::is_running)
    }

    /// Remaining time of the running timer as `H:MM:SS`.
    pub fn timer_display(&self) -> SpaceResult<String> {
        match &self.timer {
            Some(timer) if timer.is_running() => Ok(timer.display()),
            _ => Err(SpaceError::NoActiveTimer),
        }
    }

    fn check_resource_index(&self, index: usize) -> SpaceResult<()> {
        if index >= self.resources.len() {
            return Err(SpaceError::ResourceIndexOutOfRange {
                index,
                len: self.resources.len(),
            });
        }
        Ok(())
    }
}
