//! Env var layer of Settings loading.
//!
//! Env vars are process-wide, so this binary holds a single test that sets and
//! clears its variables in sequence.

use std::fs;

use tempfile::TempDir;

use lineage::config::{local_config_path, Settings};

#[test]
fn given_lineage_env_vars_when_load_then_override_files() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "[range]\nmin = 20\n[interest]\nmax_rate = 50.0\n",
    )
    .unwrap();
    std::env::set_var("LINEAGE_RANGE__MIN", "5");
    std::env::set_var("LINEAGE_INTEREST__MAX_RATE", "7.5");

    // Act
    let overridden = Settings::load_layers(None, Some(project.path()));
    std::env::remove_var("LINEAGE_RANGE__MIN");
    std::env::remove_var("LINEAGE_INTEREST__MAX_RATE");
    let from_files = Settings::load_layers(None, Some(project.path()));

    // Assert
    let overridden = overridden.unwrap();
    assert_eq!(overridden.range.min, 5);
    assert_eq!(overridden.range.max, 50);
    assert_eq!(overridden.interest.max_rate, 7.5);

    let from_files = from_files.unwrap();
    assert_eq!(from_files.range.min, 20);
    assert_eq!(from_files.interest.max_rate, 50.0);
}
