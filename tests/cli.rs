//! End-to-end tests driving the binary against a fake editor executable

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stands in for the editor: records its arguments to the log and writes the
/// files listed in `DISTILL_TEST_FILES` as the manifest.
const FAKE_EDITOR: &str = r#"#!/bin/sh
out_dir=""
out_file=""
log=""
for arg in "$@"; do
  case "$arg" in
    -OutputFolder=*) out_dir="${arg#-OutputFolder=}" ;;
    -Output=*) out_file="${arg#-Output=}" ;;
    -abslog=*) log="${arg#-abslog=}" ;;
  esac
done
printf '%s\n' "$@" > "$log"
if [ -n "$DISTILL_TEST_EXIT" ]; then
  exit "$DISTILL_TEST_EXIT"
fi
printf '%s\n' "$DISTILL_TEST_FILES" > "$out_dir/$out_file"
"#;

const DISTILL_VARS: [&str; 7] = [
    "DISTILL_PROJECT_PATH",
    "DISTILL_MANIFEST_FILE",
    "DISTILL_UE4_EXE",
    "DISTILL_MAPS",
    "DISTILL_PARAMETERS",
    "DISTILL_FROM_DIR",
    "DISTILL_TO_DIR",
];

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("Game.uproject"), "{}").unwrap();

        let editor = root.path().join("UE4Editor-Cmd");
        fs::write(&editor, FAKE_EDITOR).unwrap();
        fs::set_permissions(&editor, fs::Permissions::from_mode(0o755)).unwrap();

        fs::create_dir_all(root.path().join("from")).unwrap();
        Self { root }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    fn add_source(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path("from").join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// The binary with the fake manifest listing and a clean environment
    fn base_command(&self, files: &[PathBuf]) -> Command {
        let listing = files
            .iter()
            .map(|f| f.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        let mut cmd = Command::cargo_bin("distill-copy").unwrap();
        cmd.env("DISTILL_TEST_FILES", listing)
            .env_remove("DISTILL_TEST_EXIT")
            .env_remove("IsBuildMachine");
        for var in DISTILL_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    fn command(&self, subcommand: &str, files: &[PathBuf]) -> Command {
        let mut cmd = self.base_command(files);
        cmd.arg(subcommand)
            .arg("--project-path")
            .arg(self.path("Game.uproject"))
            .arg("--manifest-file")
            .arg(self.path("Saved/Distill/Manifest.txt"))
            .arg("--ue4-exe")
            .arg(self.path("UE4Editor-Cmd"))
            .arg("--maps")
            .arg("Entry+Arena;");
        if subcommand == "copy" {
            cmd.arg("--from-dir").arg(self.path("from"));
        }
        cmd
    }

    fn copy_command(&self, files: &[PathBuf]) -> Command {
        let mut cmd = self.command("copy", files);
        cmd.arg("--to-dir").arg(self.path("to"));
        cmd
    }

    fn commandlet_log(&self) -> String {
        let logs = self.path("Saved/Distill/Logs");
        let entry = fs::read_dir(&logs).unwrap().next().unwrap().unwrap();
        fs::read_to_string(entry.path()).unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn copy_mirrors_relative_layout() {
    let ws = Workspace::new();
    let files = vec![
        ws.add_source("Content/Maps/Entry.umap", "entry"),
        ws.add_source("Content/Maps/Arena.umap", "arena"),
        ws.add_source("Content/Characters/Hero.uasset", "hero"),
    ];

    ws.copy_command(&files).assert().success();

    assert_eq!(read(&ws.path("to/Content/Maps/Entry.umap")), "entry");
    assert_eq!(read(&ws.path("to/Content/Maps/Arena.umap")), "arena");
    assert_eq!(read(&ws.path("to/Content/Characters/Hero.uasset")), "hero");

    let log = ws.commandlet_log();
    let args: Vec<&str> = log.lines().collect();
    assert!(args[0].ends_with("Game.uproject"));
    assert_eq!(&args[1..4], ["-run=GenerateDistillFileSets", "Entry", "Arena"]);
    assert!(args.contains(&"-Output=Manifest.txt"));
    assert!(args.contains(&"-unattended"));
    assert!(!args.contains(&"-buildmachine"));
}

#[test]
fn copy_dry_run_writes_nothing() {
    let ws = Workspace::new();
    let files = vec![ws.add_source("Content/Hero.uasset", "hero")];

    ws.copy_command(&files)
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Would copy"));

    assert!(!ws.path("to").exists());
}

#[test]
fn copy_passes_parameters_through() {
    let ws = Workspace::new();
    let files = vec![ws.add_source("Content/Hero.uasset", "hero")];

    ws.copy_command(&files)
        .arg("--parameters")
        .arg("-iterate -unversioned")
        .assert()
        .success();

    let log = ws.commandlet_log();
    assert!(log.lines().any(|l| l == "-iterate"));
    assert!(log.lines().any(|l| l == "-unversioned"));
}

#[test]
fn copy_rejects_files_outside_from_dir() {
    let ws = Workspace::new();
    let outsider = ws.path("Outside.uasset");
    fs::write(&outsider, "stray").unwrap();

    ws.copy_command(&[outsider])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not under"));

    assert!(!ws.path("to").exists());
}

#[test]
fn copy_fails_when_manifest_lists_missing_file() {
    let ws = Workspace::new();
    let missing = ws.path("from/Content/Gone.uasset");

    ws.copy_command(&[missing])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Gone.uasset"));
}

#[test]
fn commandlet_failure_is_reported() {
    let ws = Workspace::new();
    let files = vec![ws.add_source("Content/Hero.uasset", "hero")];

    ws.copy_command(&files)
        .env("DISTILL_TEST_EXIT", "3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GenerateDistillFileSets failed"));
}

#[test]
fn list_prints_file_set() {
    let ws = Workspace::new();
    let files = vec![
        ws.add_source("Content/Maps/Entry.umap", "entry"),
        ws.add_source("Content/Hero.uasset", "hero"),
    ];

    let output = ws.command("list", &files).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let listed: Vec<PathBuf> = stdout.lines().map(PathBuf::from).collect();
    assert_eq!(listed, files);
}

#[test]
fn missing_project_is_rejected() {
    let ws = Workspace::new();
    fs::remove_file(ws.path("Game.uproject")).unwrap();

    ws.command("list", &[])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project file not found"));
}

#[test]
fn parameters_read_from_environment() {
    let ws = Workspace::new();
    let files = vec![ws.add_source("Content/Maps/Entry.umap", "entry")];

    ws.base_command(&files)
        .arg("copy")
        .env("DISTILL_PROJECT_PATH", ws.path("Game.uproject"))
        .env("DISTILL_MANIFEST_FILE", ws.path("Saved/Distill/Manifest.txt"))
        .env("DISTILL_UE4_EXE", ws.path("UE4Editor-Cmd"))
        .env("DISTILL_MAPS", "Lobby;Arena")
        .env("DISTILL_PARAMETERS", "-iterate")
        .env("DISTILL_FROM_DIR", ws.path("from"))
        .env("DISTILL_TO_DIR", ws.path("to"))
        .assert()
        .success();

    assert_eq!(read(&ws.path("to/Content/Maps/Entry.umap")), "entry");

    let log = ws.commandlet_log();
    let args: Vec<&str> = log.lines().collect();
    assert_eq!(&args[1..4], ["-run=GenerateDistillFileSets", "Lobby", "Arena"]);
    assert!(args.contains(&"-iterate"));
}

#[test]
fn build_machine_flag_from_environment() {
    let ws = Workspace::new();
    let files = vec![ws.add_source("Content/Hero.uasset", "hero")];

    ws.copy_command(&files)
        .env("IsBuildMachine", "1")
        .assert()
        .success();

    assert!(ws.commandlet_log().lines().any(|l| l == "-buildmachine"));
}

#[test]
fn copy_into_source_directory_is_rejected() {
    let ws = Workspace::new();
    let source = ws.add_source("A.uasset", "precious");

    ws.command("copy", &[source.clone()])
        .arg("--to-dir")
        .arg(ws.path("from/Content/.."))
        .assert()
        .failure()
        .stderr(predicate::str::contains("are the same"));

    assert_eq!(read(&source), "precious");
}

#[test]
fn copy_into_linked_source_directory_is_rejected() {
    let ws = Workspace::new();
    let source = ws.add_source("A.uasset", "precious");
    std::os::unix::fs::symlink(ws.path("from"), ws.path("alias")).unwrap();

    ws.command("copy", &[source.clone()])
        .arg("--to-dir")
        .arg(ws.path("alias"))
        .assert()
        .failure();

    assert_eq!(read(&source), "precious");
}

#[test]
fn copy_keeps_file_link_location() {
    let ws = Workspace::new();
    let shared = ws.add_source("Shared/A.uasset", "shared");
    let linked = ws.path("from/Content/A.uasset");
    fs::create_dir_all(linked.parent().unwrap()).unwrap();
    std::os::unix::fs::symlink(&shared, &linked).unwrap();

    ws.copy_command(&[linked, shared]).assert().success();

    assert_eq!(read(&ws.path("to/Content/A.uasset")), "shared");
    assert_eq!(read(&ws.path("to/Shared/A.uasset")), "shared");
}

#[test]
fn copy_through_linked_content_directory() {
    let ws = Workspace::new();
    let real = ws.path("real");
    fs::create_dir_all(&real).unwrap();
    fs::write(real.join("B.uasset"), "b").unwrap();
    std::os::unix::fs::symlink(&real, ws.path("from/Content")).unwrap();

    ws.copy_command(&[ws.path("from/Content/B.uasset")])
        .assert()
        .success();

    assert_eq!(read(&ws.path("to/Content/B.uasset")), "b");
}
