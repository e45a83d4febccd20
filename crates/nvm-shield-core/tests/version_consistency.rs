//! Workspace manifest checks: every member inherits the workspace version and
//! internal crates are wired through `[workspace.dependencies]`.

use std::path::{Path, PathBuf};

const MEMBERS: [&str; 3] = [
    "crates/lockfile-guard",
    "crates/nvm-shield-core",
    "crates/nvm-shield-cli",
];

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .unwrap()
        .to_path_buf()
}

fn manifest(dir: &Path) -> toml::Value {
    let text = std::fs::read_to_string(dir.join("Cargo.toml")).unwrap();
    text.parse().unwrap()
}

#[test]
fn members_match_workspace_list() {
    let root = manifest(&workspace_root());
    let members: Vec<&str> = root["workspace"]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap())
        .collect();

    for member in MEMBERS {
        assert!(members.contains(&member), "{} missing from workspace", member);
    }
    assert_eq!(members.len(), MEMBERS.len());
}

#[test]
fn members_inherit_workspace_version() {
    let root = workspace_root();
    for member in MEMBERS {
        let doc = manifest(&root.join(member));
        let inherited = doc["package"]["version"]
            .get("workspace")
            .and_then(|v| v.as_bool());
        assert_eq!(
            inherited,
            Some(true),
            "{} should use version.workspace = true",
            member
        );
    }
}

#[test]
fn workspace_version_matches_library() {
    let root = manifest(&workspace_root());
    let version = root["workspace"]["package"]["version"].as_str().unwrap();
    assert_eq!(version, nvm_shield_core::VERSION);
}

#[test]
fn lockfile_guard_is_a_workspace_dependency() {
    let root = workspace_root();
    let core = manifest(&root.join("crates/nvm-shield-core"));
    let dep = &core["dependencies"]["lockfile-guard"];
    assert_eq!(dep.get("workspace").and_then(|v| v.as_bool()), Some(true));

    let ws = manifest(&root);
    assert!(ws["workspace"]["dependencies"].get("lockfile-guard").is_some());
}
