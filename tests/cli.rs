use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn future_timestamp() -> String {
    (Utc::now() + chrono::Duration::hours(1)).to_rfc3339()
}

/// Write a config file with a valid cached token plus the credentials file
/// it points at, returning both paths.
fn write_config(temp: &Path) -> (PathBuf, PathBuf) {
    let credentials_path = temp.join("credentials.json");
    fs::write(
        &credentials_path,
        r#"{
            "installed": {
                "client_id": "client.apps.googleusercontent.com",
                "client_secret": "secret",
                "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob"]
            }
        }"#,
    )
    .expect("failed to write credentials");

    let config_path = temp.join("config.yaml");
    let contents = format!(
        "customer_id: my_customer\ncredentials_path: {}\ntoken:\n  access_token: at\n  refresh_token: rt\n  expires_at: {}\n",
        credentials_path.display(),
        future_timestamp()
    );
    fs::write(&config_path, contents).expect("failed to write config");

    (config_path, credentials_path)
}

fn oubridge() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("oubridge"));
    cmd.env_remove("OUBRIDGE_CONFIG")
        .env_remove("OUBRIDGE_CREDENTIALS")
        .env_remove("OUBRIDGE_CUSTOMER")
        .env_remove("OUBRIDGE_API_HOST")
        .env_remove("OUBRIDGE_FORMAT")
        .env_remove("OUBRIDGE_DEBUG");
    cmd
}

#[test]
fn version_prints_package_version() {
    oubridge()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_lists_commands() {
    oubridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn completion_emits_script() {
    oubridge()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oubridge"));
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());

    let assert = oubridge()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Customer scope: my_customer"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_without_config_suggests_init() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing.yaml");

    oubridge()
        .arg("status")
        .arg("--config")
        .arg(&missing)
        .assert()
        .success()
        .stdout(predicate::str::contains("oubridge init"));

    Ok(())
}

#[test]
fn generate_without_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let missing = temp.path().join("missing.yaml");

    oubridge()
        .args(["generate", "--root-dn", "CN=example,CN=com"])
        .arg("--config")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));

    Ok(())
}

#[test]
fn generate_writes_ordered_script() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "organizationUnits": [
                    { "name": "EMEA", "orgUnitPath": "/Sales/EMEA" },
                    { "name": "Sales", "orgUnitPath": "/Sales" }
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());
    let script_path = temp.path().join("createOrgUnits.ps1");

    oubridge()
        .args(["generate", "--root-dn", "CN=example,CN=com"])
        .arg("--output")
        .arg(&script_path)
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("PowerShell script generated"));

    let script = fs::read_to_string(&script_path)?;
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(
        lines,
        vec![
            "New-ADOrganizationalUnit -Name \"Sales\" -Path \"CN=example,CN=com\"",
            "New-ADOrganizationalUnit -Name \"EMEA\" -Path \"OU=Sales,CN=example,CN=com\"",
            "Read-Host -Prompt \"Press Enter to exit\"",
        ]
    );

    Ok(())
}

#[test]
fn generate_rejects_short_root_dn() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"organizationUnits": [{"name": "Sales", "orgUnitPath": "/Sales"}]}"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());
    let script_path = temp.path().join("createOrgUnits.ps1");

    oubridge()
        .args(["generate", "--root-dn", "CN"])
        .arg("--output")
        .arg(&script_path)
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid root DN"));

    // Nothing may be written for a rejected DN
    assert!(!script_path.exists());

    Ok(())
}

#[test]
fn generate_empty_tenant_reports_diagnostic() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"kind": "admin#directory#orgUnits"}"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());
    let script_path = temp.path().join("createOrgUnits.ps1");

    oubridge()
        .args(["generate", "--root-dn", "CN=example,CN=com"])
        .arg("--output")
        .arg(&script_path)
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("script is empty"));

    // The file is still truncated/created, with no commands in it
    assert_eq!(fs::read_to_string(&script_path)?, "");

    Ok(())
}

#[test]
fn ou_list_renders_table() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{
                "organizationUnits": [
                    { "name": "EMEA", "orgUnitPath": "/Sales/EMEA", "parentOrgUnitPath": "/Sales" },
                    { "name": "Sales", "orgUnitPath": "/Sales" }
                ]
            }"#,
        )
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());

    oubridge()
        .args(["ou", "list"])
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("/Sales/EMEA"))
        .stdout(predicate::str::contains("NAME"));

    Ok(())
}

#[test]
fn ou_list_honors_config_format_preference() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"organizationUnits": [{"name": "Sales", "orgUnitPath": "/Sales"}]}"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());

    // Configure a json default format; no --format flag on the command line
    let mut contents = fs::read_to_string(&config_path)?;
    contents.push_str("preferences:\n  format: json\n");
    fs::write(&config_path, contents)?;

    oubridge()
        .args(["ou", "list"])
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\""))
        .stdout(predicate::str::contains("\"orgUnitPath\": \"/Sales\""));

    Ok(())
}

#[test]
fn ou_list_json_format() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _ous = server
        .mock("GET", "/admin/directory/v1/customer/my_customer/orgunits")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(r#"{"organizationUnits": [{"name": "Sales", "orgUnitPath": "/Sales"}]}"#)
        .create();

    let temp = tempdir()?;
    let (config_path, _) = write_config(temp.path());

    oubridge()
        .args(["ou", "list", "--format", "json"])
        .arg("--config")
        .arg(&config_path)
        .env("OUBRIDGE_API_HOST", server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\""))
        .stdout(predicate::str::contains("\"orgUnitPath\": \"/Sales\""));

    Ok(())
}
