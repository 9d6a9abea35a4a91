//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/lineage/lineage.toml`
//! 3. Local config: `<project_dir>/.lineage.toml`
//! 4. Environment variables: `LINEAGE_*` prefix (`LINEAGE_RANGE__MIN=5`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Bounds of the range prompt (inclusive).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RangeConfig {
    pub min: i64,
    pub max: i64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { min: 10, max: 50 }
    }
}

/// Simple interest settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InterestConfig {
    /// Highest accepted rate in percent
    pub max_rate: f64,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self { max_rate: 100.0 }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub declarations: Option<PathBuf>,
    pub range: RawRangeConfig,
    pub interest: RawInterestConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRangeConfig {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawInterestConfig {
    pub max_rate: Option<f64>,
}

/// Unified configuration for lineage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Declaration file used when a command omits one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declarations: Option<PathBuf>,
    pub range: RangeConfig,
    pub interest: InterestConfig,
}

/// Get the XDG config directory for lineage.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lineage").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("lineage.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".lineage.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(path) = &self.declarations {
            self.declarations = Some(expand_path(path));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    ///
    /// A relative `declarations` path is anchored at `base_dir`, the directory
    /// holding the config file it came from.
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let declarations = match (&overlay.declarations, base_dir) {
            (Some(path), Some(dir)) if path.is_relative() && !path.starts_with("~") => {
                Some(dir.join(path))
            }
            (Some(path), _) => Some(path.clone()),
            (None, _) => self.declarations.clone(),
        };
        Self {
            declarations,
            range: RangeConfig {
                min: overlay.range.min.unwrap_or(self.range.min),
                max: overlay.range.max.unwrap_or(self.range.max),
            },
            interest: InterestConfig {
                max_rate: overlay.interest.max_rate.unwrap_or(self.interest.max_rate),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory holding `.lineage.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), project_dir)
    }

    /// Same as [`load`](Self::load) with an explicit global config path.
    pub fn load_layers(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Project-local config
        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(project));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply LINEAGE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("LINEAGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("declarations") {
            settings.declarations = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_int("range.min") {
            settings.range.min = val;
        }
        if let Ok(val) = config.get_int("range.max") {
            settings.range.max = val;
        }
        if let Ok(val) = config.get_float("interest.max_rate") {
            settings.interest.max_rate = val;
        }

        Ok(settings)
    }

    /// Reject settings the services cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.range.min > self.range.max {
            return Err(ApplicationError::Config {
                message: format!(
                    "range.min ({}) is greater than range.max ({})",
                    self.range.min, self.range.max
                ),
            });
        }
        if self.interest.max_rate.is_nan() || self.interest.max_rate < 0.0 {
            return Err(ApplicationError::Config {
                message: format!(
                    "interest.max_rate must be a non-negative number, got {}",
                    self.interest.max_rate
                ),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# lineage configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/lineage/lineage.toml
#   Local:  <project>/.lineage.toml
#   Env:    LINEAGE_* environment variables (LINEAGE_RANGE__MIN=5)

# Declaration file used when a command omits --file
# (relative paths are resolved against the config file's directory)
# declarations = "hierarchy.toml"

[range]
# Inclusive bounds for `lineage range`
# min = 10
# max = 50

[interest]
# Rates above this are rejected by `lineage interest`
# max_rate = 100.0
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
