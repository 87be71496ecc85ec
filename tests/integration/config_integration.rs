//! Integration tests for layered configuration loading

use super::test_utils::with_env;
use scoped_with::config::{ConfigLoader, DEFAULT_STORE_PATH};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_workspace_config(workspace: &std::path::Path, name: &str, contents: &str) {
    let config_dir = workspace.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join(name), contents).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    let temp_dir = TempDir::new().unwrap();
    let config = with_env(&[("SCOPED_ENV", "test-defaults")], || {
        ConfigLoader::load(temp_dir.path()).unwrap()
    });
    assert_eq!(config.settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_env_specific_file_overrides_base() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        "config.toml",
        r#"
[settings]
store_path = "base/store"

[logging]
level = "warn"
"#,
    );
    write_workspace_config(
        temp_dir.path(),
        "staging.toml",
        r#"
[settings]
store_path = "staging/store"
"#,
    );

    let config = with_env(&[("SCOPED_ENV", "staging")], || {
        ConfigLoader::load(temp_dir.path()).unwrap()
    });
    assert_eq!(config.settings.store_path, PathBuf::from("staging/store"));
    assert_eq!(config.logging.level, "warn");
    assert_eq!(
        config.settings.resolve_store_path(temp_dir.path()),
        temp_dir.path().join("staging/store")
    );
}

#[test]
fn test_environment_overrides_files() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        "config.toml",
        r#"
[settings]
store_path = "from/file"
"#,
    );

    let config = with_env(
        &[
            ("SCOPED_ENV", "test-env-override"),
            ("SCOPED__SETTINGS__STORE_PATH", "from/env"),
        ],
        || ConfigLoader::load(temp_dir.path()).unwrap(),
    );
    assert_eq!(config.settings.store_path, PathBuf::from("from/env"));
}

#[test]
fn test_invalid_workspace_config_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(
        temp_dir.path(),
        "config.toml",
        r#"
[logging]
format = "yaml"
"#,
    );

    let config = with_env(&[("SCOPED_ENV", "test-invalid")], || {
        ConfigLoader::load(temp_dir.path()).unwrap()
    });
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("yaml"));
}
