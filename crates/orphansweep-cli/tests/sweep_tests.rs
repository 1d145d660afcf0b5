//! Integration tests for the sweep and catalog commands

use assert_cmd::Command;
use orphansweep_core::Database;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn orphansweep_cmd() -> Command {
    Command::cargo_bin("orphansweep").unwrap()
}

/// Temp workspace holding a media tree, a catalog and a config file
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fixture = Self { dir };

        for rel in ["a.jpg", "b.jpg", "kept/.keep"] {
            let path = fixture.media().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"media").unwrap();
        }
        fs::create_dir_all(fixture.media().join("empty")).unwrap();

        let db = Database::open(fixture.db_path()).unwrap();
        db.initialize().unwrap();
        db.connection()
            .execute_batch(
                "CREATE TABLE gallery_photo (id INTEGER PRIMARY KEY, image TEXT);
                 INSERT INTO gallery_photo (image) VALUES ('a.jpg');",
            )
            .unwrap();
        db.register_record_type("gallery", "photo", Some("gallery_photo"))
            .unwrap();
        db.register_field("gallery", "photo", "image", "image").unwrap();
        db.register_record_type("gallery", "album", None).unwrap();

        fs::write(
            fixture.config_path(),
            format!(
                "media_base: \"{m}\"\ndomains:\n  gallery:\n    root: \"{m}\"\n    exclude:\n      - [.keep]\n",
                m = fixture.media().display()
            ),
        )
        .unwrap();

        fixture
    }

    fn media(&self) -> PathBuf {
        self.dir.path().join("media")
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("catalog.sqlite")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.yml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = orphansweep_cmd();
        cmd.env("ORPHANSWEEP_DB", self.db_path())
            .env("ORPHANSWEEP_CONFIG", self.config_path());
        cmd
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_sweep_info_reports_without_deleting() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("sweep")
        .arg("--info")
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&fx.media().join("b.jpg"))))
        .stdout(predicate::str::contains(path_str(&fx.media().join("empty"))))
        .stdout(predicate::str::contains("Total files:     2"))
        .stdout(predicate::str::contains("Needed files:    1"))
        .stdout(predicate::str::contains("1 files will be deleted"));

    assert!(fx.media().join("b.jpg").exists());
    assert!(fx.media().join("empty").exists());
}

#[test]
fn test_sweep_info_json() {
    let fx = Fixture::new();

    let output = fx
        .cmd()
        .args(["--format", "json", "sweep", "--info"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["file_count"], 1);
    assert_eq!(report["dir_count"], 1);
    assert_eq!(report["freed_bytes"], 5);
    assert_eq!(report["total_files"], 2);
}

#[test]
fn test_catalog_is_not_written() {
    let fx = Fixture::new();
    Database::open(fx.db_path())
        .unwrap()
        .connection()
        .execute_batch("DELETE FROM schema_version;")
        .unwrap();

    fx.cmd().args(["sweep", "--info"]).assert().success();
    fx.cmd().arg("catalog").assert().success();
    fx.cmd().arg("sweep").assert().success();

    let db = Database::open(fx.db_path()).unwrap();
    assert_eq!(db.schema_version().unwrap(), None);
}

#[test]
fn test_sweep_deletes_silently() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(fx.media().join("a.jpg").exists());
    assert!(!fx.media().join("b.jpg").exists());
    assert!(!fx.media().join("empty").exists());
    assert!(fx.media().join("kept/.keep").exists());

    fx.cmd()
        .args(["sweep", "--info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No files to delete!"));
}

#[test]
fn test_sweep_missing_root_fails() {
    let fx = Fixture::new();
    fs::write(
        fx.config_path(),
        format!(
            "media_base: \"{m}\"\ndomains:\n  gallery:\n    root: \"{m}/nope\"\n",
            m = fx.media().display()
        ),
    )
    .unwrap();

    fx.cmd()
        .arg("sweep")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Cannot access media root"));

    assert!(fx.media().join("b.jpg").exists());
}

#[test]
fn test_sweep_invalid_config_fails() {
    let fx = Fixture::new();
    fs::write(fx.config_path(), "media_base: relative/path\n").unwrap();

    fx.cmd()
        .args(["sweep", "--info"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_catalog_refuses_to_run() {
    let fx = Fixture::new();
    let missing = fx.dir.path().join("absent.sqlite");

    fx.cmd()
        .env("ORPHANSWEEP_DB", &missing)
        .arg("sweep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog database not found"));

    assert!(fx.media().join("b.jpg").exists());
    assert!(!missing.exists());
}

#[test]
fn test_catalog_lists_record_types() {
    let fx = Fixture::new();

    fx.cmd()
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("gallery.album (unresolved): -"))
        .stdout(predicate::str::contains("gallery.photo: image"));
}
