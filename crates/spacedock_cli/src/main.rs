//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `spacedock_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use spacedock_core::{workspace_to_json_string, Resource, Space, Task, WorkspaceApp};

fn main() {
    println!("spacedock_core ping={}", spacedock_core::ping());
    println!("spacedock_core version={}", spacedock_core::core_version());

    match sample_document() {
        Ok(document) => println!("{document}"),
        Err(err) => eprintln!("sample document failed: {err}"),
    }
}

/// Builds a tiny in-memory workspace and encodes it, proving the model and
/// codec wiring without touching the filesystem.
fn sample_document() -> Result<String, Box<dyn std::error::Error>> {
    let mut space = Space::new("smoke");
    space.add_resource(Resource::link("course page", "ubc.ca")?);
    space.todo_mut().add(Task::new("check wiring"));

    let mut app = WorkspaceApp::new();
    app.add_space(space);
    Ok(workspace_to_json_string(&app)?)
}
