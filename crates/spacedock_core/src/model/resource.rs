//! Launchable resource model.
//!
//! # Responsibility
//! - Represent the three resource kinds (web link, file, app shortcut)
//!   behind one uniform record.
//! - Enforce per-kind path invariants at construction and on every mutation.
//!
//! # Invariants
//! - An invalid `Resource` is never observable: constructors and `set_path`
//!   validate before any state change, and a failed `set_path` keeps the
//!   previous path.
//! - Link paths are stored with their scheme (`http://` is prepended when
//!   the caller supplies none).
//! - File and app paths referenced an existing filesystem entry when last
//!   validated.

use crate::launch::{LaunchError, ResourceLauncher};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Extension required for app shortcut targets.
const APP_EXTENSION: &str = "exe";

/// Whole-path allow-set for link validation: Unicode letters and digits plus
/// the URL symbol set carried over from the desktop app.
static URL_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}\-.~_:/?#\[\]@!$&'()*+,;%=]+$").expect("valid url allow-set regex")
});

/// Unified discriminant for the launchable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Web link opened in the default browser.
    Link,
    /// Existing file opened with its associated application.
    File,
    /// Shortcut to an executable (`.exe`) target.
    App,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Link => "LINK",
            Self::File => "FILE",
            Self::App => "APP",
        };
        write!(f, "{label}")
    }
}

pub type ResourceResult<T> = Result<T, ResourceError>;

/// Validation failure for a resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The supplied path is empty.
    EmptyPath,
    /// A link path contains a character outside the allow-set.
    InvalidUrlCharacter { path: String, character: char },
    /// A file or app path does not reference an existing filesystem entry.
    NoSuchPath { path: String },
    /// An app path exists but is not a regular file.
    NotAFile { path: String },
    /// An app target is a file but does not carry the required extension.
    WrongExtension { path: String, extension: String },
}

impl Display for ResourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "resource path must not be empty"),
            Self::InvalidUrlCharacter { path, character } => {
                write!(f, "invalid character `{character}` in url `{path}`")
            }
            Self::NoSuchPath { path } => write!(f, "no such file or directory: `{path}`"),
            Self::NotAFile { path } => write!(f, "app target is not a regular file: `{path}`"),
            Self::WrongExtension { path, extension } => {
                write!(
                    f,
                    "app target `{path}` has extension `{extension}`, expected `{APP_EXTENSION}`"
                )
            }
        }
    }
}

impl Error for ResourceError {}

/// One launchable resource owned by a space.
///
/// Fields are private so that only validated instances exist; go through the
/// per-kind constructors and `set_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    name: String,
    path: String,
}

impl Resource {
    /// Creates a web link, defaulting the scheme to `http://` when missing.
    pub fn link(name: impl Into<String>, path: &str) -> ResourceResult<Self> {
        Self::new(ResourceKind::Link, name, path)
    }

    /// Creates a file resource; the path must reference an existing entry.
    pub fn file(name: impl Into<String>, path: &str) -> ResourceResult<Self> {
        Self::new(ResourceKind::File, name, path)
    }

    /// Creates an app shortcut; the target must be an existing `.exe` file.
    pub fn app(name: impl Into<String>, path: &str) -> ResourceResult<Self> {
        Self::new(ResourceKind::App, name, path)
    }

    /// Creates a resource of an explicit kind.
    ///
    /// Used by decode paths that dispatch on a persisted kind tag; the same
    /// validation as the per-kind constructors applies.
    pub fn new(kind: ResourceKind, name: impl Into<String>, path: &str) -> ResourceResult<Self> {
        let path = validated_path(kind, path)?;
        Ok(Self {
            kind,
            name: name.into(),
            path,
        })
    }

    /// Replaces the path after re-running kind-specific validation.
    ///
    /// On failure the previously stored path is kept unchanged.
    pub fn set_path(&mut self, path: &str) -> ResourceResult<()> {
        self.path = validated_path(self.kind, path)?;
        Ok(())
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Stored path, scheme-prefixed for links.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extension of the final path segment, empty when it has no dot.
    pub fn extension(&self) -> &str {
        path_extension(&self.path)
    }

    /// Asks the platform collaborator to open this resource.
    ///
    /// The outcome is passed through unchanged; no retry or fallback.
    pub fn launch(&self, launcher: &dyn ResourceLauncher) -> Result<(), LaunchError> {
        launcher.launch(self.kind, &self.path)
    }
}

fn validated_path(kind: ResourceKind, path: &str) -> ResourceResult<String> {
    if path.is_empty() {
        return Err(ResourceError::EmptyPath);
    }
    match kind {
        ResourceKind::Link => {
            let normalized = normalize_link_path(path);
            if !URL_PATH_RE.is_match(&normalized) {
                let character = normalized
                    .chars()
                    .find(|c| !is_allowed_url_char(*c))
                    .unwrap_or('?');
                return Err(ResourceError::InvalidUrlCharacter {
                    path: normalized,
                    character,
                });
            }
            Ok(normalized)
        }
        ResourceKind::File => {
            if !Path::new(path).exists() {
                return Err(ResourceError::NoSuchPath {
                    path: path.to_string(),
                });
            }
            Ok(path.to_string())
        }
        ResourceKind::App => {
            let target = Path::new(path);
            if !target.exists() {
                return Err(ResourceError::NoSuchPath {
                    path: path.to_string(),
                });
            }
            if !target.is_file() {
                return Err(ResourceError::NotAFile {
                    path: path.to_string(),
                });
            }
            let extension = path_extension(path);
            if extension != APP_EXTENSION {
                return Err(ResourceError::WrongExtension {
                    path: path.to_string(),
                    extension: extension.to_string(),
                });
            }
            Ok(path.to_string())
        }
    }
}

fn normalize_link_path(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("http://{path}")
    }
}

fn is_allowed_url_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    URL_PATH_RE.is_match(c.encode_utf8(&mut buf))
}

/// Extension of the final path segment: everything after its first `.`.
///
/// Multi-dot names keep the tail whole (`archive.tar.gz` -> `tar.gz`), so an
/// app target like `tool.v2.exe` does not count as a plain `exe`.
fn path_extension(path: &str) -> &str {
    let segment = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match segment.find('.') {
        Some(dot) => &segment[dot + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_spans_from_first_dot() {
        assert_eq!(path_extension("notes/report.pdf"), "pdf");
        assert_eq!(path_extension("backups/archive.tar.gz"), "tar.gz");
        assert_eq!(path_extension("C:\\tools\\setup.exe"), "exe");
        assert_eq!(path_extension("plain"), "");
        assert_eq!(path_extension("dir.d/plain"), "");
    }

    #[test]
    fn link_scheme_defaults_to_http() {
        assert_eq!(normalize_link_path("ubc.ca"), "http://ubc.ca");
        assert_eq!(normalize_link_path("http://ubc.ca"), "http://ubc.ca");
        assert_eq!(normalize_link_path("https://ubc.ca"), "https://ubc.ca");
    }

    #[test]
    fn url_allow_set_accepts_symbols_and_unicode() {
        assert!(is_allowed_url_char('?'));
        assert!(is_allowed_url_char('%'));
        assert!(is_allowed_url_char('['));
        assert!(is_allowed_url_char('é'));
        assert!(!is_allowed_url_char(' '));
        assert!(!is_allowed_url_char('\\'));
        assert!(!is_allowed_url_char('"'));
    }
}
