//! CLI integration tests for the NovelHub command-line interface.
//!
//! These tests verify:
//! - Help text is displayed correctly
//! - Argument parsing works as expected
//! - The route guard runs before commands that need a session
//!
//! Note: These tests do not require a running server. Each test gets its
//! own config directory so no real session is read or written.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the novelhub binary, isolated in `dir`.
fn novelhub(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("novelhub").unwrap();
    cmd.current_dir(dir.path())
        .env("NOVELHUB_CONFIG_DIR", dir.path())
        .env_remove("NOVELHUB_SERVER_URL")
        .env_remove("NOVELHUB_ENV")
        .env_remove("NOVELHUB_BASE_URL_DEV")
        .env_remove("NOVELHUB_BASE_URL_PRO")
        .env_remove("NOVELHUB_PASSWORD");
    cmd
}

/// Write a stored session into the config directory.
fn store_session(dir: &TempDir, roles: &[&str]) {
    let roles = roles_json(roles);
    let session = format!(
        r#"{{"refreshToken": "refresh-1", "roles": {}, "token": "access-1"}}"#,
        roles
    );
    std::fs::write(dir.path().join("session.json"), session).unwrap();
}

fn roles_json(roles: &[&str]) -> String {
    let quoted: Vec<String> = roles.iter().map(|r| format!(r#"\"{}\""#, r)).collect();
    format!("\"[{}]\"", quoted.join(","))
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NovelHub"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("novelhub"));
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("refresh"))
        .stdout(predicate::str::contains("routes"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("novels"))
        .stdout(predicate::str::contains("translations"))
        .stdout(predicate::str::contains("audio-styles"))
        .stdout(predicate::str::contains("sd-params"))
        .stdout(predicate::str::contains("choices"));
}

#[test]
fn test_novels_help_lists_extra_subcommands() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["novels", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("fields"))
        .stdout(predicate::str::contains("chapters"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Flag Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_global_flags_accepted() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args([
            "--verbose",
            "--json",
            "--server",
            "http://localhost:9999/api/v1/",
            "--env",
            "production",
            "--help",
        ])
        .assert()
        .success();
}

#[test]
fn test_unknown_environment_rejected() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["--env", "staging", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown environment"));
}

#[test]
fn test_invalid_choice_list_rejected() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["choices", "colors"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline Behavior
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_status_logged_out() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated": false"#))
        .stdout(predicate::str::contains("http://127.0.0.1:17788/api/v1/"));
}

#[test]
fn test_status_uses_production_url() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["--json", "--env", "production", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://novelsapi.sanaoll.com/api/v1/"));
}

#[test]
fn test_status_reads_project_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("novelhub.toml"),
        "[api]\nbase_url_dev = \"http://project.test/api/v1/\"\n",
    )
    .unwrap();

    novelhub(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://project.test/api/v1/"));
}

#[test]
fn test_status_with_stored_session() {
    let dir = TempDir::new().unwrap();
    store_session(&dir, &["admin"]);

    novelhub(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated": true"#))
        .stdout(predicate::str::contains(r#""admin": true"#));
}

#[test]
fn test_routes_lists_table() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("/index/usermgm"))
        .stdout(predicate::str::contains("/login"));
}

#[test]
fn test_open_redirects_anonymous_to_login() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["--json", "open", "/index/novelmgm"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""path": "/login""#));
}

#[test]
fn test_open_admin_screen_as_editor_goes_home() {
    let dir = TempDir::new().unwrap();
    store_session(&dir, &["editor"]);

    novelhub(&dir)
        .args(["open", "usermgm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/index/usermgm → / → /index"));
}

#[test]
fn test_open_unknown_route_fails() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["open", "/nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nowhere"));
}

#[test]
fn test_resource_command_requires_login() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .args(["novels", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_admin_command_requires_admin_role() {
    let dir = TempDir::new().unwrap();
    store_session(&dir, &["editor"]);

    novelhub(&dir)
        .args(["users", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("admin role"));
}

#[test]
fn test_logout_when_logged_out() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_refresh_without_session_fails() {
    let dir = TempDir::new().unwrap();
    novelhub(&dir)
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No refresh token"));
}

#[test]
fn test_create_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    store_session(&dir, &[]);

    novelhub(&dir)
        .args(["styles", "create", "--data", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid JSON"));
}
