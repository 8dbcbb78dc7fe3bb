//! Behavior tests for resource construction and path validation.

use spacedock_core::{Resource, ResourceError, ResourceKind};
use tempfile::TempDir;

#[test]
fn link_defaults_missing_scheme_to_http() {
    let link = Resource::link("course page", "ubc.ca").expect("plain host should be valid");
    assert_eq!(link.kind(), ResourceKind::Link);
    assert_eq!(link.name(), "course page");
    assert_eq!(link.path(), "http://ubc.ca");
}

#[test]
fn link_keeps_an_existing_scheme() {
    let http = Resource::link("a", "http://ubc.ca").expect("http link should be valid");
    assert_eq!(http.path(), "http://ubc.ca");

    let https =
        Resource::link("b", "https://canvas.ubc.ca/courses").expect("https link should be valid");
    assert_eq!(https.path(), "https://canvas.ubc.ca/courses");
}

#[test]
fn link_accepts_the_url_symbol_set() {
    let path = "example.com/search?q=rust+lang&lang=en#results";
    let link = Resource::link("search", path).expect("symbol-heavy link should be valid");
    assert_eq!(link.path(), format!("http://{path}"));
}

#[test]
fn link_rejects_disallowed_characters() {
    let err = Resource::link("bad", "fake\\site").expect_err("backslash must be rejected");
    match err {
        ResourceError::InvalidUrlCharacter { character, .. } => assert_eq!(character, '\\'),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = Resource::link("bad", "two words.com").expect_err("space must be rejected");
    match err {
        ResourceError::InvalidUrlCharacter { character, .. } => assert_eq!(character, ' '),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_path_is_rejected_for_every_kind() {
    assert!(matches!(
        Resource::link("l", ""),
        Err(ResourceError::EmptyPath)
    ));
    assert!(matches!(
        Resource::file("f", ""),
        Err(ResourceError::EmptyPath)
    ));
    assert!(matches!(
        Resource::app("a", ""),
        Err(ResourceError::EmptyPath)
    ));
}

#[test]
fn file_requires_an_existing_entry() {
    let dir = TempDir::new().expect("temp dir");
    let file_path = dir.path().join("notes.txt");
    std::fs::write(&file_path, "notes").expect("write sample file");
    let path_str = file_path.to_str().expect("utf-8 path");

    let file = Resource::file("notes", path_str).expect("existing file should be accepted");
    assert_eq!(file.kind(), ResourceKind::File);
    assert_eq!(file.path(), path_str);

    let missing = dir.path().join("gone.txt");
    let err = Resource::file("gone", missing.to_str().expect("utf-8 path"))
        .expect_err("missing file must be rejected");
    assert!(matches!(err, ResourceError::NoSuchPath { .. }));
}

#[test]
fn file_accepts_a_directory_entry() {
    let dir = TempDir::new().expect("temp dir");
    let file = Resource::file("workdir", dir.path().to_str().expect("utf-8 path"))
        .expect("a directory is an existing entry");
    assert_eq!(file.kind(), ResourceKind::File);
}

#[test]
fn app_requires_an_existing_exe_file() {
    let dir = TempDir::new().expect("temp dir");
    let exe_path = dir.path().join("tool.exe");
    std::fs::write(&exe_path, b"binary").expect("write sample exe");
    let exe_str = exe_path.to_str().expect("utf-8 path");

    let app = Resource::app("tool", exe_str).expect("existing exe should be accepted");
    assert_eq!(app.kind(), ResourceKind::App);
    assert_eq!(app.extension(), "exe");

    let missing = dir.path().join("gone.exe");
    let err = Resource::app("gone", missing.to_str().expect("utf-8 path"))
        .expect_err("missing exe must be rejected");
    assert!(matches!(err, ResourceError::NoSuchPath { .. }));

    let text_path = dir.path().join("readme.txt");
    std::fs::write(&text_path, "text").expect("write text file");
    let err = Resource::app("readme", text_path.to_str().expect("utf-8 path"))
        .expect_err("non-exe extension must be rejected");
    match err {
        ResourceError::WrongExtension { extension, .. } => assert_eq!(extension, "txt"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn app_rejects_a_directory_even_with_an_exe_name() {
    let dir = TempDir::new().expect("temp dir");
    let exe_dir = dir.path().join("fake.exe");
    std::fs::create_dir(&exe_dir).expect("create directory");

    let err = Resource::app("fake", exe_dir.to_str().expect("utf-8 path"))
        .expect_err("a directory is not a launchable app");
    assert!(matches!(err, ResourceError::NotAFile { .. }));
}

#[test]
fn app_extension_spans_from_the_first_dot() {
    let dir = TempDir::new().expect("temp dir");
    let versioned = dir.path().join("tool.v2.exe");
    std::fs::write(&versioned, b"binary").expect("write versioned exe");

    let err = Resource::app("tool", versioned.to_str().expect("utf-8 path"))
        .expect_err("multi-dot extension is not plain exe");
    match err {
        ResourceError::WrongExtension { extension, .. } => assert_eq!(extension, "v2.exe"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn extension_is_read_from_the_final_segment() {
    let dir = TempDir::new().expect("temp dir");
    let archive = dir.path().join("archive.tar.gz");
    std::fs::write(&archive, b"data").expect("write archive");
    let resource = Resource::file("backup", archive.to_str().expect("utf-8 path"))
        .expect("existing archive should be accepted");
    assert_eq!(resource.extension(), "tar.gz");

    let plain = dir.path().join("LICENSE");
    std::fs::write(&plain, "mit").expect("write plain file");
    let resource = Resource::file("license", plain.to_str().expect("utf-8 path"))
        .expect("dotless file should be accepted");
    assert_eq!(resource.extension(), "");
}

#[test]
fn set_path_failure_keeps_the_previous_path() {
    let mut link = Resource::link("docs", "docs.rs").expect("valid link");
    let err = link
        .set_path("bad path")
        .expect_err("invalid replacement must fail");
    assert!(matches!(err, ResourceError::InvalidUrlCharacter { .. }));
    assert_eq!(link.path(), "http://docs.rs");

    let dir = TempDir::new().expect("temp dir");
    let first = dir.path().join("a.txt");
    std::fs::write(&first, "a").expect("write file");
    let mut file =
        Resource::file("file", first.to_str().expect("utf-8 path")).expect("valid file");
    let missing = dir.path().join("missing.txt");
    file.set_path(missing.to_str().expect("utf-8 path"))
        .expect_err("missing replacement must fail");
    assert_eq!(file.path(), first.to_str().expect("utf-8 path"));
}

#[test]
fn set_path_revalidates_for_the_resource_kind() {
    let dir = TempDir::new().expect("temp dir");
    let first = dir.path().join("a.txt");
    let second = dir.path().join("b.txt");
    std::fs::write(&first, "a").expect("write first");
    std::fs::write(&second, "b").expect("write second");

    let mut file =
        Resource::file("file", first.to_str().expect("utf-8 path")).expect("valid file");
    file.set_path(second.to_str().expect("utf-8 path"))
        .expect("existing replacement should succeed");
    assert_eq!(file.path(), second.to_str().expect("utf-8 path"));

    let mut link = Resource::link("link", "ubc.ca").expect("valid link");
    link.set_path("students.ubc.ca")
        .expect("replacement link should be normalized");
    assert_eq!(link.path(), "http://students.ubc.ca");
}
