//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Configuration loading and saving
//! - Default glob groups when no groups file exists
//! - Partial settings files falling back to defaults
//! - Conversion of groups into a validated registry

use camino::Utf8PathBuf;
use globscope::models::{GroupsConfig, IgnoreConfig, UserConfig};
use globscope::{ConfigManager, DefaultIgnores, GlobGroupId};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
}

#[test]
fn test_config_dir_created_when_missing() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("nested").join("Globscope Data");

    ConfigManager::new(&nested).unwrap();
    assert!(nested.exists());
}

#[test]
fn test_load_default_groups() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let groups = manager.load_groups_config().unwrap();
    let registry = groups.to_registry().unwrap();

    let cpp = GlobGroupId::new("_c_pp").unwrap();
    assert!(registry.contains(&cpp));
    assert_eq!(registry.iter().next().unwrap().0, &cpp);
}

#[test]
fn test_groups_round_trip_preserves_order() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut groups = GroupsConfig::default();
    for (id, patterns) in [
        ("_z_ig", vec!["*.zig"]),
        ("_a_da", vec!["*.adb", "*.ads"]),
        ("_m_isc", vec!["*.cfg"]),
    ] {
        groups
            .glob_groups
            .insert(id.to_string(), patterns.into_iter().map(String::from).collect());
    }
    manager.save_groups_config(&groups).unwrap();

    let loaded = manager.load_groups_config().unwrap();
    assert_eq!(loaded, groups);

    let order: Vec<&str> = loaded.glob_groups.keys().map(String::as_str).collect();
    assert_eq!(order, vec!["_z_ig", "_a_da", "_m_isc"]);
}

#[test]
fn test_invalid_groups_file_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.groups_config_path(), "Glob_Groups: [not, a, map]\n").unwrap();
    assert!(manager.load_groups_config().is_err());
}

#[test]
fn test_ambiguous_identifier_rejected_at_registration() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.groups_config_path(),
        "Glob_Groups:\n  _a_b_c_: ['*.x']\n",
    )
    .unwrap();

    let groups = manager.load_groups_config().unwrap();
    assert!(groups.to_registry().is_err());
}

#[test]
fn test_load_default_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let config = manager.load_user_config().unwrap();

    assert_eq!(config.search_settings.ripgrep_exe, "rg");
    assert!(config.search_settings.literal_by_default);
    assert_eq!(config.ignore, IgnoreConfig::default());
}

#[test]
fn test_partial_user_config_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.user_config_path(),
        "search_settings:\n  literal_by_default: false\nignore:\n  directories: [dist]\n",
    )
    .unwrap();

    let config = manager.load_user_config().unwrap();
    assert!(!config.search_settings.literal_by_default);
    assert_eq!(config.search_settings.search_timeout, 60);
    assert!(config.ignore.files.is_empty());

    let ignores = DefaultIgnores::from(&config.ignore);
    assert_eq!(ignores.to_globs(), vec!["dist/"]);
}

#[test]
fn test_save_and_reload_user_config() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = UserConfig::default();
    config.search_settings.ripgrep_exe = "/opt/bin/rg".to_string();
    config.search_settings.debug_mode = true;
    manager.save_user_config(&config).unwrap();

    let loaded = manager.load_user_config().unwrap();
    assert_eq!(loaded.search_settings.ripgrep_exe, "/opt/bin/rg");
    assert!(loaded.search_settings.debug_mode);
}
