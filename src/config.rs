use crate::constants;
use crate::error::{InventoryError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub parsing: ParsingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub manufacturers: PathBuf,
    pub prices: PathBuf,
    pub service_dates: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Fourth manufacturer column value (case-insensitive) that flags an item as damaged
    pub damaged_marker: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, JSON logs are also written to a daily rolling file in this directory
    pub dir: Option<PathBuf>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            manufacturers: PathBuf::from(constants::MANUFACTURER_SOURCE),
            prices: PathBuf::from(constants::PRICE_SOURCE),
            service_dates: PathBuf::from(constants::SERVICE_DATE_SOURCE),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            damaged_marker: constants::DEFAULT_DAMAGED_MARKER.to_string(),
        }
    }
}

/// Values given on the command line; each one that is set wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub manufacturers: Option<PathBuf>,
    pub prices: Option<PathBuf>,
    pub service_dates: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub damaged_marker: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            InventoryError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicitly requested file, or fall back to `inventory.toml` when it exists,
    /// or to built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(constants::DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(path) = overrides.manufacturers {
            self.sources.manufacturers = path;
        }
        if let Some(path) = overrides.prices {
            self.sources.prices = path;
        }
        if let Some(path) = overrides.service_dates {
            self.sources.service_dates = path;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if let Some(marker) = overrides.damaged_marker {
            self.parsing.damaged_marker = marker;
        }
        if let Some(dir) = overrides.log_dir {
            self.logging.dir = Some(dir);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.parsing.damaged_marker.trim().is_empty() {
            return Err(InventoryError::Config(
                "damaged_marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_layout() {
        let config = Config::default();
        assert_eq!(config.sources.manufacturers, PathBuf::from("ManufacturerList.csv"));
        assert_eq!(config.sources.prices, PathBuf::from("PriceList.csv"));
        assert_eq!(config.sources.service_dates, PathBuf::from("ServiceDatesList.csv"));
        assert_eq!(config.output.dir, PathBuf::from("output"));
        assert_eq!(config.parsing.damaged_marker, "damaged");
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [output]
            dir = "reports"

            [parsing]
            damaged_marker = "BROKEN"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.dir, PathBuf::from("reports"));
        assert_eq!(config.parsing.damaged_marker, "BROKEN");
        assert_eq!(config.sources.prices, PathBuf::from("PriceList.csv"));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let err = Config::from_toml_str("[parsing]\ndamaged_marker = \"  \"\n").unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)));
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default()
            .apply_overrides(ConfigOverrides {
                prices: Some(PathBuf::from("data/prices.csv")),
                output_dir: Some(PathBuf::from("out")),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.sources.prices, PathBuf::from("data/prices.csv"));
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.sources.manufacturers, PathBuf::from("ManufacturerList.csv"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::resolve(Some(Path::new("/nonexistent/inventory.toml"))).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)));
    }
}
