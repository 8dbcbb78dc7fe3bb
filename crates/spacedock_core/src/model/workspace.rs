//! Top-level workspace aggregate.
//!
//! # Responsibility
//! - Hold every space in creation order and resolve spaces by name.
//! - Provide the wholesale replacement hook used by load and restore paths.
//!
//! # Invariants
//! - Space order is insertion order; name lookups return the first match.
//! - Removing or replacing spaces drops them, which cancels their timers.

use crate::model::space::Space;

/// The root collection of spaces.
#[derive(Debug, Default)]
pub struct WorkspaceApp {
    spaces: Vec<Space>,
}

impl WorkspaceApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_space(&mut self, space: Space) {
        self.spaces.push(space);
    }

    /// Removes the first space with this name and hands it to the caller.
    ///
    /// Dropping the returned space cancels its timer.
    pub fn remove_space(&mut self, name: &str) -> Option<Space> {
        let position = self.spaces.iter().position(|s| s.name() == name)?;
        Some(self.spaces.remove(position))
    }

    /// First space with this exact name, if any.
    pub fn space_named(&self, name: &str) -> Option<&Space> {
        self.spaces.iter().find(|s| s.name() == name)
    }

    pub fn space_named_mut(&mut self, name: &str) -> Option<&mut Space> {
        self.spaces.iter_mut().find(|s| s.name() == name)
    }

    pub fn space_names(&self) -> Vec<String> {
        self.spaces.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    pub fn space_count(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Replaces the whole collection, dropping every previous space.
    ///
    /// Load and restore paths go through here so a failed decode never
    /// leaves a half-replaced workspace behind.
    pub fn replace_all(&mut self, spaces: Vec<Space>) {
        self.spaces = spaces;
    }
}
