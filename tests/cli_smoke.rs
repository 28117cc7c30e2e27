use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use chrono::Local;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    // init and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "core.autocrlf", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "core.safecrlf", "false"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", "you@example.com"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn ensure_clean(dir: &Path) {
    assert!(Command::new("git")
        .args(["reset", "--hard"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("add {name}")])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    ensure_clean(dir);
}

/// Commit `name` with explicit author and committer dates (RFC 3339).
fn commit_dated(dir: &Path, name: &str, author_date: &str, committer_date: &str) {
    fs::write(dir.join(name), name).unwrap();
    assert!(Command::new("git")
        .args(["add", name])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["commit", "-m", &format!("add {name}")])
        .env("GIT_AUTHOR_DATE", author_date)
        .env("GIT_COMMITTER_DATE", committer_date)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn member_config(dir: &Path) -> std::path::PathBuf {
    let config = dir.join("team.json");
    Command::cargo_bin("teamgrass")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["member", "add", "Your Name", "--name", "You", "--color", "#216e39"])
        .assert()
        .success();
    config
}

fn month_total(dir: &Path, config: &Path, month: &str) -> u64 {
    let out = teamgrass(dir, config)
        .args(["calendar", "--json", "--month", month])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    v["members"][0]["stats"]["total_commits"].as_u64().unwrap()
}

fn current_month() -> String {
    Local::now().format("%Y-%m").to_string()
}

/// Repo with two commits by "Your Name" plus a config tracking that author.
fn team_fixture(dir: &Path) -> std::path::PathBuf {
    init_git_repo(dir);
    commit_file(dir, "src/a.rs", "fn a(){}\n");
    commit_file(dir, "src/b.rs", "fn b(){}\n");
    member_config(dir)
}

fn teamgrass(dir: &Path, config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("teamgrass").unwrap();
    cmd.current_dir(dir)
        .arg("--repo")
        .arg(dir)
        .arg("--cache")
        .arg(dir.join("cache"))
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn calendar_json_counts_member_commits() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let config = team_fixture(dir.path());

    let out = teamgrass(dir.path(), &config)
        .args(["calendar", "--json", "--month", &current_month()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let members = v.get("members").and_then(|m| m.as_array()).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["key"], "Your Name");
    assert_eq!(members[0]["stats"]["total_commits"], 2);
    assert!(members[0]["days"].as_array().map(|d| d.len() >= 28).unwrap_or(false));

    // Second run is served from the cache and must agree.
    let again = teamgrass(dir.path(), &config)
        .args(["calendar", "--ndjson", "--month", &current_month()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let line: serde_json::Value = serde_json::from_slice(again.split(|b| *b == b'\n').next().unwrap()).unwrap();
    assert_eq!(line["stats"]["total_commits"], 2);
}

#[test]
fn amended_commit_is_counted_once() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_dated(dir.path(), "a.txt", "2025-09-10T12:00:00+00:00", "2025-09-10T12:00:00+00:00");
    let config = member_config(dir.path());
    assert_eq!(month_total(dir.path(), &config, "2025-09"), 1);

    assert!(Command::new("git")
        .args(["commit", "--amend", "-m", "reworded"])
        .env("GIT_COMMITTER_DATE", "2025-09-11T12:00:00+00:00")
        .current_dir(dir.path())
        .status()
        .unwrap()
        .success());
    assert_eq!(month_total(dir.path(), &config, "2025-09"), 1);

    // A regular commit on top is still picked up incrementally.
    commit_dated(dir.path(), "b.txt", "2025-09-12T12:00:00+00:00", "2025-09-12T12:00:00+00:00");
    assert_eq!(month_total(dir.path(), &config, "2025-09"), 2);
}

#[test]
fn author_date_decides_the_month() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    commit_dated(dir.path(), "a.txt", "2025-08-20T12:00:00+00:00", "2025-09-10T12:00:00+00:00");
    let config = member_config(dir.path());

    assert_eq!(month_total(dir.path(), &config, "2025-08"), 1);
    assert_eq!(month_total(dir.path(), &config, "2025-09"), 0);
}

#[test]
fn rust_log_controls_logging() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let quiet = Command::cargo_bin("teamgrass")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&missing)
        .args(["member", "list"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    assert!(!String::from_utf8_lossy(&quiet).contains("no config file"));

    let debug = Command::cargo_bin("teamgrass")
        .unwrap()
        .env("RUST_LOG", "debug")
        .arg("--config")
        .arg(&missing)
        .args(["member", "list"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    assert!(String::from_utf8_lossy(&debug).contains("no config file, using defaults"));
}

#[test]
fn attendance_marks_todays_committer_present() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let config = team_fixture(dir.path());

    let out = teamgrass(dir.path(), &config)
        .args(["attendance", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries[0]["present"], true);
    assert_eq!(entries[0]["commits"], 2);
}

#[test]
fn svg_and_readme_are_written() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let config = team_fixture(dir.path());
    let month = current_month();

    let svg = teamgrass(dir.path(), &config)
        .args(["svg", "--month", &month])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(svg).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("2 commits"));

    let readme = dir.path().join("TEAM.md");
    teamgrass(dir.path(), &config)
        .args(["readme", "--month", &month, "--path"])
        .arg(&readme)
        .assert()
        .success();
    let content = fs::read_to_string(&readme).unwrap();
    assert!(content.contains("<!-- GRASS_START_Your_Name -->"));
    assert!(content.contains("<!-- GRASS_END_Your_Name -->"));
    assert!(content.contains("### You"));
}

#[test]
fn calendar_from_log_file() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("dates.txt");
    fs::write(&log, "2025-09-01\n2025-09-01\n\n2025-09-03\n2025-10-01\n").unwrap();

    let out = Command::cargo_bin("teamgrass")
        .unwrap()
        .current_dir(dir.path())
        .arg("--config")
        .arg(dir.path().join("none.json"))
        .args(["calendar", "--json", "--month", "2025-09", "--log"])
        .arg(&log)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let member = &v["members"][0];
    assert_eq!(member["stats"]["total_commits"], 3);
    assert_eq!(member["stats"]["best_day"], 2);
    assert_eq!(member["days"].as_array().unwrap().len(), 30);
    assert_eq!(member["days"][0]["intensity"], 1.0);
    assert!(member["days"][0]["color"].as_str().unwrap().starts_with('#'));
    assert_ne!(member["days"][0]["color"], member["days"][1]["color"]);
}

#[test]
fn color_command_substitutes_background() {
    Command::cargo_bin("teamgrass")
        .unwrap()
        .args(["color", "#00FF00", "0", "--background", "#ebedf0"])
        .assert()
        .success()
        .stdout("#ebedf0 rgb(235,237,240)\n");
}

#[test]
fn color_command_rejects_garbage() {
    Command::cargo_bin("teamgrass")
        .unwrap()
        .args(["color", "not-a-color", "0.5"])
        .assert()
        .failure();
}

#[test]
fn member_list_round_trips_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("team.json");

    for args in [
        vec!["member", "add", "kim@example.com", "--name", "Kim"],
        vec!["member", "add", "park"],
        vec!["member", "color", "park", "hue(200)"],
        vec!["member", "remove", "kim@example.com"],
    ] {
        Command::cargo_bin("teamgrass")
            .unwrap()
            .arg("--config")
            .arg(&config)
            .args(args)
            .assert()
            .success();
    }

    let out = Command::cargo_bin("teamgrass")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["member", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(out).unwrap(), "park\tpark\thue(200)\n");
}
