//! CLI integration tests for the plugmin binary.
//!
//! Each test gets its own config directory and backend, so tests can run in
//! parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

mod common;

use assert_cmd::Command;
use assert_fs::TempDir;
use plugmin::store::Store;
use predicates::prelude::*;
use serde_json::Value;

use common::TestServer;

struct TestContext {
    config_dir: TempDir,
    server: TestServer,
}

impl TestContext {
    fn new() -> Self {
        Self {
            config_dir: TempDir::new().expect("failed to create temp dir"),
            server: TestServer::start(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("plugmin").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd.env("HOME", self.config_dir.path());
        cmd.env("PLUGMIN_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("PLUGMIN_SERVER");
        cmd
    }

    fn register(&self, email: &str) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "--server",
                &self.server.base_url,
                "auth",
                "register",
                "--name",
                "Ada",
                "--email",
                email,
                "--password",
                "hunter22",
                "--purpose",
                "business",
                "--organization",
                "Analytical Engines",
                "--non-interactive",
            ])
            .assert()
    }

    fn create_shop(&self) -> String {
        let output = self
            .cmd()
            .args([
                "project",
                "create",
                "--name",
                "Shop",
                "--driver",
                "postgres",
                "--db-name",
                "shop_db",
                "--user-name",
                "admin",
                "--password",
                "x",
                "--host",
                "localhost",
                "--non-interactive",
                "--json",
            ])
            .output()
            .expect("run project create");
        assert!(
            output.status.success(),
            "project create failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let project: Value = serde_json::from_slice(&output.stdout).expect("project json");
        assert_eq!(project["schemaGenStatus"], "pending");
        assert!(project.get("password").is_none());
        project["id"].as_str().expect("project id").to_string()
    }
}

#[test]
fn register_requires_flags_in_non_interactive_mode() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["--server", &ctx.server.base_url, "auth", "register", "--non-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name is required in non-interactive mode"));
}

#[test]
fn register_rejects_mismatched_confirmation() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args([
            "--server",
            &ctx.server.base_url,
            "auth",
            "register",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--password",
            "hunter22",
            "--confirm-password",
            "hunter23",
            "--purpose",
            "business",
            "--organization",
            "Analytical Engines",
            "--non-interactive",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confirm_password"));

    assert!(!ctx.config_dir.path().join("credentials.toml").exists());
}

#[test]
fn list_without_login_shows_unauthenticated_state() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["--server", &ctx.server.base_url, "project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn logout_without_credentials() {
    let ctx = TestContext::new();

    ctx.cmd()
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No credentials found."));
}

#[test]
fn register_saves_credentials() {
    let ctx = TestContext::new();

    ctx.register("ada@example.com")
        .success()
        .stdout(predicate::str::contains("Registered and logged in as Ada <ada@example.com>"));

    let path = ctx.config_dir.path().join("credentials.toml");
    let content = std::fs::read_to_string(&path).expect("read credentials");
    assert!(content.contains("[default]"));
    assert!(content.contains(&ctx.server.base_url));
    assert!(content.contains("plugmin.sid="));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    // Saved server is used when --server is omitted.
    ctx.cmd()
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada@example.com"));
}

#[test]
fn project_lifecycle() {
    let ctx = TestContext::new();
    ctx.register("ada@example.com").success();

    ctx.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));

    let id = ctx.create_shop();

    ctx.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop"))
        .stdout(predicate::str::contains("[pending]"))
        .stdout(predicate::str::contains("1 project(s)"));

    ctx.cmd()
        .args(["project", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema generation is in progress..."))
        .stdout(predicate::str::contains("Tables:").not());

    ctx.server.complete_schema(&id, &["customers", "orders"]);

    ctx.cmd()
        .args(["project", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema [completed]"))
        .stdout(predicate::str::contains("customers  (table)"))
        .stdout(predicate::str::contains("orders  (table)"));

    ctx.cmd()
        .args(["project", "members", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"));

    ctx.cmd()
        .args(["project", "delete", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted project {id}")));

    ctx.cmd()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}

#[test]
fn delete_requires_yes_in_non_interactive_mode() {
    let ctx = TestContext::new();
    ctx.register("ada@example.com").success();
    let id = ctx.create_shop();

    ctx.cmd()
        .args(["project", "delete", &id, "--non-interactive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes is required"));

    ctx.cmd()
        .args(["project", "show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projectName\": \"Shop\""));
}

#[test]
fn delete_missing_project_shows_status() {
    let ctx = TestContext::new();
    ctx.register("ada@example.com").success();

    ctx.cmd()
        .args(["project", "delete", "does-not-exist", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("404: "));
}

#[test]
fn create_with_invalid_port_fails_before_sending() {
    let ctx = TestContext::new();
    ctx.register("ada@example.com").success();

    ctx.cmd()
        .args([
            "project",
            "create",
            "--name",
            "Shop",
            "--driver",
            "postgres",
            "--db-name",
            "shop_db",
            "--user-name",
            "admin",
            "--password",
            "x",
            "--host",
            "localhost",
            "--port",
            "not-a-port",
            "--non-interactive",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));

    let user = ctx
        .server
        .store
        .get_user_by_email("ada@example.com")
        .unwrap()
        .unwrap();
    assert!(ctx.server.store.list_user_projects(&user.id).unwrap().is_empty());
}

#[test]
fn preferences_and_logout() {
    let ctx = TestContext::new();
    ctx.register("ada@example.com").success();

    ctx.cmd()
        .args(["preferences", "set", "--single-project", "true", "--initial"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a single project"));

    ctx.cmd()
        .args(["auth", "whoami", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prefersSingleProject\": true"));

    ctx.cmd()
        .args(["preferences", "set", "--single-project", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a project list"));

    ctx.cmd()
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out successfully."));

    assert!(!ctx.config_dir.path().join("credentials.toml").exists());

    ctx.cmd()
        .args(["--server", &ctx.server.base_url, "auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}
