//! Workspace domain model.
//!
//! # Responsibility
//! - Define spaces, their launchable resources, and their to-do lists.
//! - Keep construction-time invariants local to each type.
//!
//! # Invariants
//! - Model mutation is synchronous; the countdown engine in `crate::timer`
//!   is the only concurrent component a space owns.
//! - Invalid resources are rejected at the constructor boundary, never
//!   stored.

pub mod resource;
pub mod space;
pub mod todo;
pub mod workspace;
