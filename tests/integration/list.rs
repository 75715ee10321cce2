use anyhow::Result;
use predicates::prelude::*;

use crate::common::{RegistryServer, TestProject, motion_registry};

#[test]
fn test_list_table() -> Result<()> {
    let registry = RegistryServer::start(&motion_registry())?;
    let project = TestProject::new()?;

    let output = project.run(registry.url(), &["list"])?;

    output
        .assert_success()
        .assert_stdout_contains("pixel-motion Components")
        .assert_stdout_contains("Animated terminal window")
        .assert_stdout_contains("deps: remotion, @remotion/paths")
        .assert_stdout_contains("3 component(s) available");
    assert_eq!(registry.requests(), vec!["registry.json"]);
    Ok(())
}

#[test]
fn test_list_json() -> Result<()> {
    let registry = RegistryServer::start(&motion_registry())?;
    let project = TestProject::new()?;

    let output = project.run(registry.url(), &["list", "--json"])?;
    output.assert_success();

    let items: serde_json::Value = serde_json::from_str(&output.stdout)?;
    let items = items.as_array().expect("items array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "terminal");
    assert_eq!(items[0]["type"], "registry:ui");
    assert_eq!(items[0]["registryDependencies"][0], "code-block");
    assert_eq!(items[2]["type"], "registry:lib");
    Ok(())
}

#[test]
fn test_list_registry_override_flag() -> Result<()> {
    let registry = RegistryServer::start(&motion_registry())?;
    let project = TestProject::new()?;

    // The flag takes precedence over the environment variable
    project
        .command("http://127.0.0.1:9/r")
        .args(["list", "--registry", registry.url()])
        .assert()
        .success()
        .stdout(predicate::str::contains("terminal"));
    Ok(())
}

#[test]
fn test_list_with_unreachable_registry() -> Result<()> {
    let project = TestProject::new()?;

    project
        .command("http://127.0.0.1:9/r")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to fetch registry"));
    Ok(())
}

#[test]
fn test_list_with_broken_index() -> Result<()> {
    let documents = std::collections::HashMap::from([(
        "registry.json".to_string(),
        "<html>maintenance</html>".to_string(),
    )]);
    let registry = RegistryServer::start_with_documents(documents)?;
    let project = TestProject::new()?;

    project.run(registry.url(), &["list"])?.assert_failure().assert_stderr_contains("invalid JSON");
    Ok(())
}

#[test]
fn test_list_json_keeps_items_as_served() -> Result<()> {
    let documents = std::collections::HashMap::from([(
        "registry.json".to_string(),
        r#"{
            "name": "pixel-motion",
            "homepage": "https://motion.pixeldeveloper.io",
            "items": [{ "name": "particles", "type": "registry:hook", "title": "Particles" }]
        }"#
        .to_string(),
    )]);
    let registry = RegistryServer::start_with_documents(documents)?;
    let project = TestProject::new()?;

    let output = project.run(registry.url(), &["list", "--json"])?;
    output.assert_success();

    let items: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(items[0]["title"], "Particles");
    assert_eq!(items[0]["type"], "registry:hook");
    assert!(items[0].get("registryDependencies").is_none());
    Ok(())
}

#[test]
fn test_list_with_missing_index_document() -> Result<()> {
    let registry = RegistryServer::start_with_documents(std::collections::HashMap::new())?;
    let project = TestProject::new()?;

    project
        .run(registry.url(), &["list"])?
        .assert_failure()
        .assert_stderr_contains("Failed to fetch registry")
        .assert_stderr_contains("HTTP 404");
    Ok(())
}
