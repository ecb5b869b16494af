//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/mlselect/mlselect.toml`
//! 3. Explicit config file (`--config <FILE>`)
//! 4. Environment variables: `MLSELECT_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::component::{DEFAULT_CHIP_SEPARATOR, DEFAULT_PLACEHOLDER};
use crate::application::ApplicationError;

/// How the CLI prints a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented tree with chips and rows
    #[default]
    Tree,
    /// Selection collection as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "json" => Ok(Self::Json),
            other => Err(ApplicationError::Config {
                message: format!("unknown output format '{other}', expected tree or json"),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree => f.write_str("tree"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub placeholder: Option<String>,
    pub back_label: Option<String>,
    pub output: Option<OutputFormat>,
    pub chip_separator: Option<String>,
}

/// Unified configuration for mlselect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Text shown while nothing is selected
    pub placeholder: String,
    /// Label of the row leading back from a nested level
    pub back_label: String,
    /// Default CLI output format
    pub output: OutputFormat,
    /// Separator between chip labels in the closed widget text
    pub chip_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            back_label: "Go Back".to_string(),
            output: OutputFormat::Tree,
            chip_separator: DEFAULT_CHIP_SEPARATOR.to_string(),
        }
    }
}

/// Get the XDG config directory for mlselect.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mlselect").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("mlselect.toml"))
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
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            placeholder: overlay
                .placeholder
                .clone()
                .unwrap_or_else(|| self.placeholder.clone()),
            back_label: overlay
                .back_label
                .clone()
                .unwrap_or_else(|| self.back_label.clone()),
            output: overlay.output.unwrap_or(self.output),
            chip_separator: overlay
                .chip_separator
                .clone()
                .unwrap_or_else(|| self.chip_separator.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, applied over the global one
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config file must exist when given
        if let Some(path) = config_file {
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Defaults overlaid with a single config file, no global config or env vars.
    pub fn load_from(path: &Path) -> Result<Self, ApplicationError> {
        Ok(Self::default().merge_with(&load_raw_settings(path)?))
    }

    /// Apply MLSELECT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("MLSELECT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("placeholder") {
            settings.placeholder = val;
        }
        if let Ok(val) = config.get_string("back_label") {
            settings.back_label = val;
        }
        if let Ok(val) = config.get_string("output") {
            settings.output = val.parse()?;
        }
        if let Ok(val) = config.get_string("chip_separator") {
            settings.chip_separator = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# mlselect configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/mlselect/mlselect.toml
#   Explicit: --config <FILE>
#   Env:      MLSELECT_* environment variables (e.g. MLSELECT_OUTPUT=json)

# Text shown while nothing is selected
# placeholder = "Multi Level Selector"

# Label of the row leading back from a nested level
# back_label = "Go Back"

# Output format of `mlselect select`: "tree" or "json"
# output = "tree"

# Separator between chip labels
# chip_separator = ", "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_defaults_when_created_then_match_widget_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.placeholder, "Multi Level Selector");
        assert_eq!(settings.back_label, "Go Back");
        assert_eq!(settings.output, OutputFormat::Tree);
        assert_eq!(settings.chip_separator, ", ");
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_inherit() {
        let overlay = RawSettings {
            placeholder: Some("Filter".into()),
            output: Some(OutputFormat::Json),
            ..RawSettings::default()
        };

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.placeholder, "Filter");
        assert_eq!(merged.output, OutputFormat::Json);
        assert_eq!(merged.back_label, "Go Back");
    }

    #[rstest]
    #[case("tree", OutputFormat::Tree)]
    #[case("JSON", OutputFormat::Json)]
    #[case(" json ", OutputFormat::Json)]
    fn given_format_name_when_parsing_then_resolves(#[case] text: &str, #[case] expected: OutputFormat) {
        assert_eq!(text.parse::<OutputFormat>().unwrap(), expected);
    }

    #[test]
    fn given_unknown_format_when_parsing_then_config_error() {
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_settings_when_rendering_toml_then_contains_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("placeholder = \"Multi Level Selector\""));
        assert!(toml.contains("output = \"tree\""));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.placeholder.is_none());
    }
}
