//! The `qxs` binary.

use crate::common::QxsFixture;
use assert_cmd::Command;
use predicates::prelude::*;

fn qxs(fixture: &QxsFixture) -> Command {
    let mut cmd = Command::cargo_bin("qxs").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("QXS_CONFIG").arg("--config").arg(fixture.config_path());
    cmd
}

#[test]
fn test_output_prints_url() {
    let fixture = QxsFixture::new("");

    qxs(&fixture)
        .args(["--output", "bvg", "Alexanderplatz,", "Hermannplatz"])
        .assert()
        .success()
        .stdout(
            "https://www.bvg.de/de/verbindungen/verbindungssuche?S=Alexanderplatz&Z=Hermannplatz&start=1\n",
        );
}

#[test]
fn test_config_from_environment_variable() {
    let fixture = QxsFixture::new("");

    Command::cargo_bin("qxs")
        .unwrap()
        .env_remove("RUST_LOG")
        .env("QXS_CONFIG", fixture.config_path())
        .args(["-o", "g", "rust"])
        .assert()
        .success()
        .stdout("https://mine.example/?q=rust&lang=de\n");
}

#[test]
fn test_output_and_fetch_are_exclusive() {
    let fixture = QxsFixture::new("");

    qxs(&fixture)
        .args(["--output", "--fetch", "g", "rust"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_unknown_keyword_exits_with_failure() {
    let fixture = QxsFixture::new("");

    qxs(&fixture)
        .args(["-o", "nothing", "here"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Shortcut not found."));
}

#[test]
fn test_deprecated_shortcut_prints_replacement() {
    let fixture = QxsFixture::new("");

    qxs(&fixture)
        .args(["-o", "behvaugeh", "Alexanderplatz,", "Hermannplatz"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "This shortcut is deprecated since 2024-03-31. Try the following query as replacement: \"bvg Alexanderplatz, Hermannplatz\".",
        ));
}

#[test]
fn test_search_lists_matches() {
    let fixture = QxsFixture::new("");

    qxs(&fixture)
        .args(["--search", "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("g 1\t<query>\tGoogle Web Search\t"))
        .stdout(predicate::str::contains("wiki 1\t<query>\tWiki search\thttps://mine.example/"));
}

#[test]
fn test_missing_default_keyword_reports_error() {
    let fixture = QxsFixture::new("default_keyword = \"nonexistent\"");

    qxs(&fixture)
        .args(["-o", "nothing", "here"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("nonexistent"));
}

#[test]
fn test_invalid_config_reports_error() {
    let fixture = QxsFixture::new("unexpected = true");

    qxs(&fixture)
        .args(["-o", "g", "rust"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_missing_browser_reports_error() {
    let fixture = QxsFixture::new("browser = \"qxs-no-such-browser\"");

    qxs(&fixture)
        .args(["g", "rust"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("qxs-no-such-browser"));
}
