//! Integration tests for layered Settings loading.
//!
//! Layers (lowest to highest): defaults, global file, project-local
//! `.lineage.toml`, `LINEAGE_*` environment variables.
//!
//! Note: These tests pass an explicit global path (or none), so a user's real
//! global config never leaks in. Env var overrides live in `config_env_test.rs`,
//! a separate binary, since env vars are process-wide.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use lineage::application::ApplicationError;
use lineage::config::{local_config_path, Settings};

#[test]
fn given_no_config_files_when_load_then_uses_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();

    // Act
    let settings = Settings::load_layers(None, Some(project.path())).unwrap();

    // Assert
    assert_eq!(settings.range.min, 10);
    assert_eq!(settings.range.max, 50);
    assert!(settings.declarations.is_none());
}

#[test]
fn given_local_config_when_load_then_overrides_defaults_and_anchors_paths() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "declarations = \"hierarchy.toml\"\n[range]\nmin = 1\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load_layers(None, Some(project.path())).unwrap();

    // Assert
    assert_eq!(settings.range.min, 1);
    assert_eq!(settings.range.max, 50);
    assert_eq!(
        settings.declarations,
        Some(project.path().join("hierarchy.toml"))
    );
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    // Arrange
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("lineage.toml");
    fs::write(&global_path, "[range]\nmin = 0\nmax = 1000\n").unwrap();

    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "[range]\nmax = 99\n").unwrap();

    // Act
    let settings = Settings::load_layers(Some(&global_path), Some(project.path())).unwrap();

    // Assert
    assert_eq!(settings.range.min, 0);
    assert_eq!(settings.range.max, 99);
}

#[test]
fn given_absolute_declarations_in_global_config_when_load_then_kept_as_is() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("lineage.toml");
    fs::write(&global_path, "declarations = \"/srv/hierarchy.toml\"\n").unwrap();

    let settings = Settings::load_layers(Some(&global_path), None).unwrap();

    assert_eq!(
        settings.declarations,
        Some(PathBuf::from("/srv/hierarchy.toml"))
    );
}

#[test]
fn given_inverted_range_in_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "[range]\nmin = 60\nmax = 50\n",
    )
    .unwrap();

    let result = Settings::load_layers(None, Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let project = TempDir::new().unwrap();
    fs::write(local_config_path(project.path()), "[range\nmin = ").unwrap();

    let result = Settings::load_layers(None, Some(project.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_settings_when_rendering_toml_then_contains_sections() {
    let settings = Settings::default();

    let text = settings.to_toml().unwrap();

    assert!(text.contains("[range]"));
    assert!(text.contains("[interest]"));
    assert!(!text.contains("declarations"));
}
