//! Integration tests for the theme-sync binary

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn theme_sync() -> Command {
    let mut cmd = Command::cargo_bin("theme-sync").expect("Failed to find theme-sync binary");
    cmd.env_remove("THEME_SYNC_CONFIG")
        .env_remove("THEME_SYNC_ACTION")
        .env_remove("THEME_SYNC_THEMES_DIR")
        .env_remove("THEME_SYNC_SUPPORT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

const PAYLOAD: &str = r#"{
    "id": 31,
    "commit": 1,
    "name": "North Star",
    "domain": "northstar",
    "version": "2.1.0",
    "author": "North Studio",
    "parts": [{ "id": 3, "name": "card", "viewRaw": "<div class=\"card\"></div>" }],
    "scssPartials": [{ "id": 8, "name": "base", "scss": "body {}" }]
}"#;

#[test]
fn no_command_prints_hint() {
    theme_sync()
        .assert()
        .success()
        .stdout(predicate::str::contains("theme-sync --help"));
}

#[test]
fn full_sync_creates_theme_directory() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();
    let themes = temp.child("themes");
    themes.create_dir_all().unwrap();

    theme_sync()
        .args(["sync"])
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(themes.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Built: style.css"))
        .stdout(predicate::str::contains("Theme at commit 1"));

    let theme = themes.child("northstar");
    theme
        .child("style.css")
        .assert(predicate::str::contains("Theme Name: North Star"))
        .assert(predicate::str::contains("TWID: 31"));
    theme
        .child("views/parts/card.php")
        .assert("<div class=\"card\"></div>");
    theme
        .child("assets/scss/styles.scss")
        .assert("@import \"partials/base\"; // 1000-8\n");
}

#[test]
fn second_sync_finds_theme_by_id_after_rename() {
    let temp = TempDir::new().unwrap();
    let themes = temp.child("themes");
    themes.create_dir_all().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(themes.path())
        .assert()
        .success();

    let renamed = PAYLOAD
        .replace("\"North Star\"", "\"Polaris\"")
        .replace("\"commit\": 1", "\"commit\": 2");
    payload.write_str(&renamed).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(themes.path())
        .assert()
        .success();

    themes
        .child("northstar/style.css")
        .assert(predicate::str::contains("Theme Name: Polaris"));
    themes.child("polaris").assert(predicate::path::missing());
}

#[test]
fn config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    temp.child("payload.json").write_str(PAYLOAD).unwrap();
    temp.child("themes").create_dir_all().unwrap();
    temp.child("support/class-part.php")
        .write_str("<?php class TW_Part {}")
        .unwrap();
    temp.child("theme-sync.toml")
        .write_str("themes_dir = \"themes\"\nsupport_dir = \"support\"\n")
        .unwrap();

    theme_sync()
        .current_dir(temp.path())
        .args(["sync", "payload.json"])
        .assert()
        .success();

    let theme = temp.child("themes/northstar");
    theme
        .child("includes/tw/class-part.php")
        .assert("<?php class TW_Part {}");
    theme
        .child("tw-functions.php")
        .assert(predicate::str::contains("/includes/tw/class-part.php"));
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Would build: style.css"));

    temp.child("northstar").assert(predicate::path::missing());
}

#[test]
fn json_report_for_scripting() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(temp.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"themeId\": 31"))
        .stdout(predicate::str::contains("\"commit\": 1"));
}

#[test]
fn skipped_incremental_sync_fails() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(temp.path())
        .env("THEME_SYNC_ACTION", "part")
        .assert()
        .failure()
        .stdout(predicate::str::contains("a full sync is required"))
        .stderr(predicate::str::contains("Sync finished with 1 error(s)"));
}

#[test]
fn unknown_action_is_rejected() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload.write_str(PAYLOAD).unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .args(["--action", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid sync action: everything"));
}

#[test]
fn missing_version_is_rejected() {
    let temp = TempDir::new().unwrap();
    let payload = temp.child("payload.json");
    payload
        .write_str(r#"{ "id": 1, "commit": 1, "name": "Bare" }"#)
        .unwrap();

    theme_sync()
        .arg("sync")
        .arg(payload.path())
        .arg("--themes-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("The 'version' parameter is required"));
}

#[test]
fn view_compiles_element_tree() {
    let temp = TempDir::new().unwrap();
    let element = temp.child("element.json");
    element
        .write_str(r#"{ "node": "section", "type": "html", "children": [] }"#)
        .unwrap();

    theme_sync()
        .arg("view")
        .arg(element.path())
        .assert()
        .success()
        .stdout("<section>\n</section>\n");
}

#[test]
fn fields_compiles_group() {
    let temp = TempDir::new().unwrap();
    let group = temp.child("group.json");
    group
        .write_str(
            r#"{
                "id": "hero",
                "title": "Hero",
                "fields": [{ "type": "text", "name": "title", "label": "Title" }],
                "location": [[{ "param": "block", "value": "acf/hero" }]]
            }"#,
        )
        .unwrap();

    theme_sync()
        .arg("fields")
        .arg(group.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "if ( function_exists( 'acf_add_local_field_group' ) ) {",
        ))
        .stdout(predicate::str::contains("'field_hero_title'"));
}
