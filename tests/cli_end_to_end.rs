//! End-to-end runs of the inspector binary against a temp archive.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::{NamedTempFile, TempDir};

const ARCHIVE: &str = r#"
[profile]
brand_title = "0jo's dev blog"
brand_href = "/"
meta_description = "notes on systems and tooling"
public_url = "https://blog.example.dev"

[[profile.links]]
label = "GitHub"
href = "https://github.com/0jo-gil"

[[posts]]
title = "Reading Gatsby Query Plans"
date = "2024-03-03"
summary = "What the content layer actually hands a page."
categories = ["go"]

[[posts]]
title = "Borrowed Feeds"
date = "2024-03-02"
summary = "Filtering without cloning the world."
categories = ["rust", "go"]

[[posts]]
title = "Archive-first Publishing"
date = "2024-03-01"
summary = "Why the archive is the API."
categories = ["rust"]
"#;

fn archive_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(ARCHIVE.as_bytes()).expect("write archive");
    file
}

fn foglio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("foglio"));
    cmd.env_remove("FOGLIO_CONFIG_FILE");
    cmd
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    serde_json::from_str(&output).expect("stdout is JSON")
}

#[test]
fn feed_prints_the_home_document() {
    let archive = archive_file();

    let assert = foglio()
        .arg("feed")
        .arg("--archive")
        .arg(archive.path())
        .assert()
        .success();

    let home = stdout_json(&assert);
    assert_eq!(home["chrome"]["brand"]["title"], "0jo's dev blog");
    assert_eq!(home["chrome"]["links"][0]["target"], "_blank");

    let labels: Vec<&str> = home["feed"]["categories"]
        .as_array()
        .expect("categories")
        .iter()
        .map(|summary| summary["label"].as_str().expect("label"))
        .collect();
    assert_eq!(labels, ["ALL", "go", "rust"]);

    assert_eq!(home["feed"]["post_count"], 3);
    assert_eq!(home["feed"]["recent"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        home["feed"]["posts"][0]["slug"],
        "reading-gatsby-query-plans"
    );
}

#[test]
fn feed_honors_a_category_selection() {
    let archive = archive_file();

    let assert = foglio()
        .arg("feed")
        .arg("--archive")
        .arg(archive.path())
        .arg("--category")
        .arg("rust")
        .assert()
        .success();

    let home = stdout_json(&assert);
    let slugs: Vec<&str> = home["feed"]["posts"]
        .as_array()
        .expect("posts")
        .iter()
        .map(|card| card["slug"].as_str().expect("slug"))
        .collect();
    assert_eq!(slugs, ["borrowed-feeds", "archive-first-publishing"]);

    // The recent strip stays unfiltered.
    assert_eq!(
        home["feed"]["recent"][0]["slug"],
        "reading-gatsby-query-plans"
    );
}

#[test]
fn feed_with_unknown_category_is_empty_but_successful() {
    let archive = archive_file();

    let assert = foglio()
        .arg("feed")
        .arg("--archive")
        .arg(archive.path())
        .arg("--category")
        .arg("zig")
        .assert()
        .success();

    let home = stdout_json(&assert);
    assert_eq!(home["feed"]["post_count"], 0);
    assert_eq!(home["feed"]["has_results"], false);
}

#[test]
fn recent_limit_override_applies() {
    let archive = archive_file();

    let assert = foglio()
        .arg("feed")
        .arg("--archive")
        .arg(archive.path())
        .arg("--recent-limit")
        .arg("1")
        .assert()
        .success();

    let home = stdout_json(&assert);
    assert_eq!(home["feed"]["recent"].as_array().map(Vec::len), Some(1));
}

#[test]
fn categories_prints_the_filter_bar() {
    let archive = archive_file();

    let assert = foglio()
        .arg("categories")
        .arg("--archive")
        .arg(archive.path())
        .assert()
        .success();

    let bar = stdout_json(&assert);
    assert_eq!(bar[0]["label"], "ALL");
    assert_eq!(bar[0]["path"], "/");
    assert_eq!(bar[0]["count"], 3);
    assert_eq!(bar[1]["path"], "/categories/go");
}

#[test]
fn check_reports_ingestion_counts() {
    let mut file = NamedTempFile::new().expect("tmp file");
    let archive = format!(
        "{ARCHIVE}\n[[posts]]\ndate = \"2024-01-01\"\nsummary = \"no title\"\n"
    );
    file.write_all(archive.as_bytes()).expect("write archive");

    let assert = foglio()
        .arg("check")
        .arg("--archive")
        .arg(file.path())
        .assert()
        .success();

    let report = stdout_json(&assert);
    assert_eq!(report["accepted"], 3);
    assert_eq!(report["rejected"], 1);
    assert_eq!(report["distinct_categories"], 2);
}

#[test]
fn missing_archive_fails_with_a_logged_error() {
    foglio()
        .arg("check")
        .arg("--archive")
        .arg("/nonexistent/site.toml")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("application error"));
}

#[test]
fn default_command_reads_the_default_archive_path() {
    let dir = TempDir::new().expect("tmp dir");
    std::fs::create_dir(dir.path().join("content")).expect("content dir");
    std::fs::write(dir.path().join("content/site.toml"), ARCHIVE).expect("archive");

    let assert = foglio().current_dir(dir.path()).assert().success();

    let home = stdout_json(&assert);
    assert_eq!(home["feed"]["total_count"], 3);
}
