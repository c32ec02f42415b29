//! Integration test: the committed `shell.nix` and evaluation against a
//! package collection on disk.

use std::fs;
use std::path::{Path, PathBuf};

use garlic_nix::{evaluate, NixError, PackageSetImport, ShellDescriptor};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("workspace root exists")
        .to_path_buf()
}

/// Lay out `<root>/pkgs/<tool>/bin` for each tool.
fn make_collection(root: &Path, tools: &[&str]) {
    for tool in tools {
        fs::create_dir_all(root.join("pkgs").join(tool).join("bin")).expect("create tool prefix");
    }
}

#[test]
fn committed_shell_nix_matches_rendered_descriptor() {
    let on_disk = fs::read_to_string(workspace_root().join("shell.nix")).expect("read shell.nix");
    assert_eq!(on_disk, ShellDescriptor::garlic().render());
}

#[test]
fn committed_package_set_import_exists() {
    let descriptor = ShellDescriptor::garlic();
    assert!(
        workspace_root().join(descriptor.pkgs.path()).is_file(),
        "shell.nix imports a file that is not in the repository"
    );
}

#[test]
fn existing_tool_lands_on_search_path() {
    let dir = tempfile::tempdir().expect("create temp dir");
    make_collection(dir.path(), &["cargo"]);

    let descriptor = ShellDescriptor::new(PackageSetImport::new("pkgs"))
        .with_tool("cargo")
        .expect("valid tool name");
    let env = evaluate(&descriptor, dir.path()).expect("evaluation succeeds");

    let bin = dir.path().join("pkgs/cargo/bin");
    assert!(env.provides(&bin), "cargo's bin dir must be on the search path");
    let joined = env.search_path().expect("join search path");
    assert_eq!(joined, bin.into_os_string());
}

#[test]
fn missing_import_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    make_collection(dir.path(), &["cargo"]);

    let descriptor = ShellDescriptor::new(PackageSetImport::new("nope"))
        .with_tool("cargo")
        .expect("valid tool name");
    let result = evaluate(&descriptor, dir.path());
    assert!(matches!(result, Err(NixError::ImportNotFound { .. })), "got {result:?}");
}

#[test]
fn garlic_descriptor_evaluates_against_file_import() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(dir.path().join("nix/cargo/bin")).expect("create tool prefix");
    fs::write(dir.path().join("nix/pkgs.nix"), "import <nixpkgs>").expect("write import");

    let env = evaluate(&ShellDescriptor::garlic(), dir.path()).expect("evaluation succeeds");

    let bin = dir.path().join("nix/cargo/bin");
    assert_eq!(env.path_entries, vec![bin.clone()]);
    assert!(env.provides(&bin), "cargo's bin dir must be on the search path");
}

#[test]
fn file_import_still_requires_the_tool() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(dir.path().join("nix")).expect("create nix dir");
    fs::write(dir.path().join("nix/pkgs.nix"), "import <nixpkgs>").expect("write import");

    match evaluate(&ShellDescriptor::garlic(), dir.path()) {
        Err(NixError::UnknownTool { name }) => assert_eq!(name, "cargo"),
        other => panic!("expected UnknownTool, got {other:?}"),
    }
}

#[test]
fn tool_absent_from_collection_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    make_collection(dir.path(), &["rustc"]);

    let descriptor = ShellDescriptor::new(PackageSetImport::new("pkgs"))
        .with_tool("cargo")
        .expect("valid tool name");
    match evaluate(&descriptor, dir.path()) {
        Err(NixError::UnknownTool { name }) => assert_eq!(name, "cargo"),
        other => panic!("expected UnknownTool, got {other:?}"),
    }
}
