use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

/// A throwaway pacman dbpath with a `local/` database.
struct FakeDb {
    dir: TempDir,
}

impl FakeDb {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("local");
        fs::create_dir_all(&local).unwrap();
        fs::write(local.join("ALPM_DB_VERSION"), "9\n").unwrap();
        Self { dir }
    }

    fn install(self, name: &str, version: &str, licenses: &[&str]) -> Self {
        let entry = self.dir.path().join("local").join(format!("{name}-{version}"));
        fs::create_dir_all(&entry).unwrap();

        let mut desc = format!("%NAME%\n{name}\n\n%VERSION%\n{version}\n\n");
        if !licenses.is_empty() {
            desc.push_str("%LICENSE%\n");
            for license in licenses {
                desc.push_str(license);
                desc.push('\n');
            }
            desc.push('\n');
        }
        fs::write(entry.join("desc"), desc).unwrap();
        self
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `vrms` pointed at this database, isolated from any user config.
    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("vrms");
        cmd.arg("--dbpath")
            .arg(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0");
        cmd
    }
}

/// foo is free, bar is ambiguous, baz is non-free.
fn mixed_db() -> FakeDb {
    FakeDb::new()
        .install("foo", "1.0-1", &["GPL"])
        .install("bar", "2.0-1", &["custom"])
        .install("baz", "3.0-1", &["Proprietary-X"])
}

#[test]
fn test_all_free_exits_zero() {
    let db = FakeDb::new()
        .install("foo", "1.0-1", &["GPL", "MIT"])
        .install("qux", "0.1-2", &["custom:Expat"]);

    db.cmd()
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(contains("Non-free packages: 0"))
        .stderr(contains("However, there are 0 ambiguously licensed packages"));
}

#[test]
fn test_nonfree_listing() {
    mixed_db()
        .cmd()
        .assert()
        .code(1)
        .stdout(contains(r#"baz: ["Proprietary-X"]"#))
        .stdout(contains("foo").not())
        .stderr(contains("Non-free packages: 1"))
        .stderr(contains(
            "However, there are 1 ambiguously licensed packages that vrms cannot certify.",
        ));
}

#[test]
fn test_list_unknowns() {
    mixed_db()
        .cmd()
        .arg("--list-unknowns")
        .assert()
        .code(1)
        .stdout(contains(r#"bar: ["custom"]"#))
        .stdout(contains("baz").not())
        .stderr(contains("Packages of unknown license on this system: 1"));
}

#[test]
fn test_list_licenses_as_toml() {
    let db = mixed_db().install("quux", "1-1", &["GPL"]);

    db.cmd()
        .args(["--list-licenses-as-toml", "--quiet"])
        .assert()
        .code(1)
        .stdout(contains(r#"    "GPL", # ["foo", "quux"]"#))
        .stdout(contains(r#"    "custom", # ["bar"]"#));
}

#[test]
fn test_obscure_cutoff_hides_package_names() {
    mixed_db()
        .cmd()
        .args(["--list-licenses-as-toml", "--obscure-cutoff", "1"])
        .assert()
        .stdout(contains("    \"GPL\",\n"))
        .stdout(contains("#").not());
}

#[test]
fn test_list_licenses_table() {
    mixed_db()
        .cmd()
        .arg("-g")
        .assert()
        .code(1)
        .stdout(contains("GPL"))
        .stdout(contains("non-free"))
        .stdout(contains("ambiguous"));
}

#[test]
fn test_show_license() {
    mixed_db()
        .cmd()
        .args(["--show-license", "custom"])
        .assert()
        .stdout(contains("bar 2.0-1"))
        .stderr(contains("custom: ambiguous (1 packages)"));
}

#[test]
fn test_json_report() {
    let output = mixed_db()
        .cmd()
        .args(["--report", "json", "--quiet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["totals"]["packages"], 3);
    assert_eq!(value["ambiguous"][0]["name"], "bar");
    assert_eq!(value["nonfree"][0]["name"], "baz");
}

#[test]
fn test_config_extends_free_licenses() {
    let db = mixed_db();
    let config = db.path().join("vrms.toml");
    fs::write(&config, "[licenses]\nfree = [\"Proprietary-X\", \"custom\"]\n").unwrap();

    db.cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stderr(contains("Non-free packages: 0"));
}

#[test]
fn test_missing_database_is_application_error() {
    let dir = TempDir::new().unwrap();

    cargo_bin_cmd!("vrms")
        .arg("--dbpath")
        .arg(dir.path().join("nope"))
        .env("XDG_CONFIG_HOME", dir.path())
        .assert()
        .code(3)
        .stderr(contains("package database not found"));
}

#[test]
fn test_malformed_entry_is_application_error() {
    let db = mixed_db();
    let broken = db.path().join("local").join("broken-1-1");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("desc"), "%VERSION%\n1-1\n").unwrap();

    db.cmd()
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(contains("missing %NAME%"));
}

#[test]
fn test_conflicting_modes_are_rejected() {
    mixed_db().cmd().args(["-g", "-u"]).assert().code(2);
}

#[test]
fn test_json_with_listing_mode_is_rejected() {
    mixed_db()
        .cmd()
        .args(["--report", "json", "--show-license", "GPL"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("--report json"));
}

#[test]
fn test_latin1_description_does_not_abort_scan() {
    let db = mixed_db();
    let entry = db.path().join("local").join("old-1-1");
    fs::create_dir_all(&entry).unwrap();
    fs::write(
        entry.join("desc"),
        b"%NAME%\nold\n\n%DESC%\ncaf\xE9\n\n%LICENSE%\nEULA\n",
    )
    .unwrap();

    db.cmd()
        .assert()
        .code(1)
        .stdout(contains(r#"old: ["EULA"]"#))
        .stderr(contains("Non-free packages: 2"));
}
