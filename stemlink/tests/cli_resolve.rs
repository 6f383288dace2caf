use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    root: TempDir,
    reference: PathBuf,
    source: PathBuf,
    dest: PathBuf,
}

impl Workspace {
    fn new(reference: &[&str], source: &[&str]) -> Self {
        let root = tempfile::tempdir().unwrap();
        let reference_dir = root.path().join("labels");
        let source_dir = root.path().join("images");
        fs::create_dir(&reference_dir).unwrap();
        fs::create_dir(&source_dir).unwrap();
        for name in reference {
            fs::write(reference_dir.join(name), b"label").unwrap();
        }
        for name in source {
            fs::write(source_dir.join(name), format!("pixels of {name}")).unwrap();
        }
        let dest = root.path().join("resolved");
        Self {
            root,
            reference: reference_dir,
            source: source_dir,
            dest,
        }
    }

    fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("stemlink");
        cmd.env_remove("RUST_LOG")
            .arg("--reference-dir")
            .arg(&self.reference)
            .arg("--source-dir")
            .arg(&self.source)
            .arg("--dest-dir")
            .arg(&self.dest);
        cmd
    }
}

fn dest_names(dest: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dest)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn copies_matches_and_lists_missing_keys() {
    let ws = Workspace::new(&["cat.png", "dog.png"], &["cat.jpg", "bird.jpg"]);

    ws.command().assert().success().stdout(
        "Resolved assets: 1\nMissing assets: 1\nUnresolved keys:\n  - dog\n",
    );

    assert_eq!(dest_names(&ws.dest), ["cat.jpg"]);
    assert_eq!(
        fs::read(ws.dest.join("cat.jpg")).unwrap(),
        fs::read(ws.source.join("cat.jpg")).unwrap()
    );
}

#[test]
fn dry_run_prints_plans_and_copies_nothing() {
    let ws = Workspace::new(&["a.png", "b.png"], &["a.jpg", "b.jpeg"]);

    let output = ws
        .command()
        .arg("--dry-run")
        .arg("--sorted")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);

    let expected = format!(
        "[DRY RUN] {} -> {}\n[DRY RUN] {} -> {}\nResolved assets: 2\nMissing assets: 0\n",
        ws.source.join("a.jpg").display(),
        ws.dest.join("a.jpg").display(),
        ws.source.join("b.jpeg").display(),
        ws.dest.join("b.jpeg").display(),
    );
    assert_eq!(text, expected);
    assert!(ws.dest.is_dir(), "destination should still be created");
    assert!(dest_names(&ws.dest).is_empty());
}

#[test]
fn custom_extensions_are_case_insensitive() {
    let ws = Workspace::new(&["page.TXT", "page.png"], &["page.Tif", "page.jpg"]);

    ws.command()
        .args(["--reference-ext", "txt", "--source-ext", ".TIF"])
        .assert()
        .success()
        .stdout("Resolved assets: 1\nMissing assets: 0\n");

    assert_eq!(dest_names(&ws.dest), ["page.Tif"]);
}

#[test]
fn stem_collision_copies_exactly_one_asset() {
    let ws = Workspace::new(&["a.png"], &["a.jpg", "a.jpeg"]);

    ws.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved assets: 1"));

    let names = dest_names(&ws.dest);
    assert_eq!(names.len(), 1);
    assert!(names[0] == "a.jpg" || names[0] == "a.jpeg");
}

#[test]
fn unresolved_keys_do_not_fail_the_run() {
    let ws = Workspace::new(&["x.png", "y.png"], &[]);

    ws.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing assets: 2"))
        .stdout(predicate::str::contains("  - x"))
        .stdout(predicate::str::contains("  - y"));
}

#[test]
fn missing_reference_dir_exits_non_zero() {
    let ws = Workspace::new(&[], &["cat.jpg"]);
    fs::remove_dir(&ws.reference).unwrap();

    ws.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory does not exist"));
}

#[test]
fn source_dir_that_is_a_file_exits_non_zero() {
    let ws = Workspace::new(&["cat.png"], &[]);
    fs::remove_dir(&ws.source).unwrap();
    fs::write(&ws.source, b"not a directory").unwrap();

    ws.command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path is not a directory"));
    assert!(!ws.dest.exists());
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    let mut cmd = cargo_bin_cmd!("stemlink");
    cmd.arg("--reference-dir")
        .arg("labels")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--source-dir"));
}

#[test]
fn report_flag_writes_json() {
    let ws = Workspace::new(&["cat.png", "dog.png"], &["cat.jpg"]);
    let report = ws.root.path().join("report.json");

    ws.command().arg("--report").arg(&report).assert().success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(value["resolution"]["missing"][0], "dog");
    assert_eq!(value["copies"][0]["destination"], ws.dest.join("cat.jpg").to_str().unwrap());
}

#[test]
fn help_mentions_options() {
    let mut cmd = cargo_bin_cmd!("stemlink");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for flag in [
        "--reference-dir",
        "--source-dir",
        "--dest-dir",
        "--reference-ext",
        "--source-ext",
        "--dry-run",
    ] {
        assert!(text.contains(flag), "help missing {flag}");
    }
}
