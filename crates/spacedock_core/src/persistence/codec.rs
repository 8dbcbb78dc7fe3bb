//! JSON wire codec for the workspace tree.
//!
//! # Responsibility
//! - Serialize a `WorkspaceApp` into the persisted array-of-spaces document.
//! - Rebuild a `WorkspaceApp` from a document, dispatching every resource on
//!   its `type` tag through the validating constructors.
//!
//! # Invariants
//! - Decoding re-runs full resource validation; a document that passed the
//!   syntax check can still be rejected as a whole.
//! - Unknown resource `type` tags are rejected, never defaulted to a kind.
//! - Strings use serde_json's canonical escaping; backslashes in stored
//!   paths round-trip byte-exactly and forward slashes stay unescaped.

use super::{PersistenceError, PersistenceResult};
use crate::model::resource::{Resource, ResourceKind};
use crate::model::space::Space;
use crate::model::todo::Task;
use crate::model::workspace::WorkspaceApp;
use serde::{Deserialize, Serialize};

/// Wire record for one space.
#[derive(Debug, Serialize, Deserialize)]
struct RawSpace {
    name: String,
    resources: Vec<RawResource>,
    tasks: Vec<RawTask>,
}

/// Wire record for one resource; `kind` travels as the `type` tag.
#[derive(Debug, Serialize, Deserialize)]
struct RawResource {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    path: String,
}

/// Wire record for one task. The completion flag keeps its historical
/// `complete?` key.
#[derive(Debug, Serialize, Deserialize)]
struct RawTask {
    description: String,
    #[serde(rename = "complete?")]
    complete: bool,
}

/// Encodes the workspace as a JSON value.
pub fn workspace_to_json(app: &WorkspaceApp) -> PersistenceResult<serde_json::Value> {
    serde_json::to_value(raw_spaces(app))
        .map_err(|err| PersistenceError::invalid_format(format!("failed to encode workspace: {err}")))
}

/// Encodes the workspace as a pretty-printed JSON document.
pub fn workspace_to_json_string(app: &WorkspaceApp) -> PersistenceResult<String> {
    serde_json::to_string_pretty(&raw_spaces(app))
        .map_err(|err| PersistenceError::invalid_format(format!("failed to encode workspace: {err}")))
}

/// Decodes a workspace from JSON text.
pub fn workspace_from_json_str(text: &str) -> PersistenceResult<WorkspaceApp> {
    let raw: Vec<RawSpace> = serde_json::from_str(text)
        .map_err(|err| PersistenceError::invalid_format(format!("not a workspace document: {err}")))?;
    build_workspace(raw)
}

/// Decodes a workspace from an already parsed JSON value.
pub fn workspace_from_json(value: &serde_json::Value) -> PersistenceResult<WorkspaceApp> {
    let raw: Vec<RawSpace> = serde_json::from_value(value.clone())
        .map_err(|err| PersistenceError::invalid_format(format!("not a workspace document: {err}")))?;
    build_workspace(raw)
}

fn raw_spaces(app: &WorkspaceApp) -> Vec<RawSpace> {
    app.spaces()
        .iter()
        .map(|space| RawSpace {
            name: space.name().to_string(),
            resources: space
                .resources()
                .iter()
                .map(|resource| RawResource {
                    kind: resource_kind_tag(resource.kind()).to_string(),
                    name: resource.name().to_string(),
                    path: resource.path().to_string(),
                })
                .collect(),
            tasks: space
                .todo()
                .tasks()
                .iter()
                .map(|task| RawTask {
                    description: task.description().to_string(),
                    complete: task.is_complete(),
                })
                .collect(),
        })
        .collect()
}

fn build_workspace(raw: Vec<RawSpace>) -> PersistenceResult<WorkspaceApp> {
    let mut spaces = Vec::with_capacity(raw.len());
    for raw_space in raw {
        let mut space = Space::new(raw_space.name);
        for raw_resource in raw_space.resources {
            let kind = parse_resource_kind(&raw_resource.kind).ok_or_else(|| {
                PersistenceError::invalid_format(format!(
                    "unknown resource type `{}` for resource `{}`",
                    raw_resource.kind, raw_resource.name
                ))
            })?;
            let name = raw_resource.name;
            let resource = Resource::new(kind, name.as_str(), &raw_resource.path)
                .map_err(|err| {
                    PersistenceError::invalid_format(format!("invalid resource `{name}`: {err}"))
                })?;
            space.add_resource(resource);
        }
        for raw_task in raw_space.tasks {
            let mut task = Task::new(raw_task.description);
            task.set_complete(raw_task.complete);
            space.todo_mut().add(task);
        }
        spaces.push(space);
    }
    let mut app = WorkspaceApp::new();
    app.replace_all(spaces);
    Ok(app)
}

fn resource_kind_tag(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Link => "LINK",
        ResourceKind::File => "FILE",
        ResourceKind::App => "APP",
    }
}

fn parse_resource_kind(tag: &str) -> Option<ResourceKind> {
    match tag {
        "LINK" => Some(ResourceKind::Link),
        "FILE" => Some(ResourceKind::File),
        "APP" => Some(ResourceKind::App),
        _ => None,
    }
}
