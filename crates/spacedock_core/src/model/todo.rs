//! To-do list model.
//!
//! # Responsibility
//! - Hold a space's ordered task list and its completion flags.
//! - Support both index-addressed and description-addressed operations.
//!
//! # Invariants
//! - Task order is insertion order; removal preserves the relative order of
//!   the remaining tasks.
//! - Description-addressed operations act on every match and are no-ops when
//!   nothing matches.
//! - Index-addressed operations fail without mutating the list when the
//!   index is out of range.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoResult<T> = Result<T, TodoError>;

/// Index error for task operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The index is outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for TodoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "task index {index} is out of range for a list of {len}")
            }
        }
    }
}

impl Error for TodoError {}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    complete: bool,
}

impl Task {
    /// Creates an incomplete task.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            complete: false,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }
}

/// Ordered task list owned by a space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToDoList {
    tasks: Vec<Task>,
    completed_prefix: String,
}

impl ToDoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Removes and returns the task at `index`.
    pub fn remove_task(&mut self, index: usize) -> TodoResult<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Removes every task whose description equals `description` exactly.
    ///
    /// Returns how many tasks were removed; zero matches is not an error.
    pub fn remove_tasks_matching(&mut self, description: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.description != description);
        before - self.tasks.len()
    }

    /// Marks the task at `index` complete.
    pub fn complete_task(&mut self, index: usize) -> TodoResult<()> {
        self.check_index(index)?;
        self.tasks[index].complete = true;
        Ok(())
    }

    /// Marks the task at `index` incomplete again.
    pub fn uncomplete_task(&mut self, index: usize) -> TodoResult<()> {
        self.check_index(index)?;
        self.tasks[index].complete = false;
        Ok(())
    }

    /// Marks every task whose description equals `description` complete.
    ///
    /// Returns how many tasks were affected; zero matches is not an error.
    pub fn complete_tasks_matching(&mut self, description: &str) -> usize {
        let mut affected = 0;
        for task in &mut self.tasks {
            if task.description == description {
                task.complete = true;
                affected += 1;
            }
        }
        affected
    }

    /// Removes every completed task, keeping incomplete ones in order.
    pub fn delete_completed_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.complete);
        before - self.tasks.len()
    }

    /// Display strings for every task, in list order.
    ///
    /// Completed tasks carry the configured prefix (empty by default, so the
    /// flag is invisible until a caller opts in).
    pub fn task_descriptions(&self) -> Vec<String> {
        self.tasks
            .iter()
            .map(|task| {
                if task.complete {
                    format!("{}{}", self.completed_prefix, task.description)
                } else {
                    task.description.clone()
                }
            })
            .collect()
    }

    /// Sets the marker prepended to completed tasks in `task_descriptions`.
    pub fn set_completed_prefix(&mut self, prefix: impl Into<String>) {
        self.completed_prefix = prefix.into();
    }

    pub fn completed_prefix(&self) -> &str {
        &self.completed_prefix
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn check_index(&self, index: usize) -> TodoResult<()> {
        if index >= self.tasks.len() {
            return Err(TodoError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}
