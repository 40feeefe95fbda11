use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use emi_core::bounds::InputBounds;

use crate::OutputFormat;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "emi.toml";

/// Settings read from `emi.toml`. Every key is optional.
///
/// ```toml
/// output = "table"
///
/// [bounds.annual_rate_percent]
/// min = 6.0
/// max = 12.0
/// step = 0.05
/// default = 8.75
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub output: Option<OutputFormat>,
    pub bounds: InputBounds,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid bounds in config {path}: {source}")]
    Bounds {
        path: PathBuf,
        source: emi_core::EmiError,
    },
}

/// Load `explicit` if given (it must exist), else `emi.toml` if present,
/// else defaults.
pub fn load(explicit: Option<&str>) -> Result<CliConfig, ConfigError> {
    let path = match explicit {
        Some(p) => PathBuf::from(p),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                log::debug!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                return Ok(CliConfig::default());
            }
            fallback.to_path_buf()
        }
    };

    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config
        .bounds
        .validate()
        .map_err(|source| ConfigError::Bounds {
            path: path.clone(),
            source,
        })?;

    log::info!("loaded config from {}", path.display());
    Ok(config)
}

pub fn parse(text: &str) -> Result<CliConfig, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_config_is_default() {
        let cfg = parse("").unwrap();
        assert!(cfg.output.is_none());
        assert_eq!(cfg.bounds, InputBounds::default());
    }

    #[test]
    fn test_partial_bounds_override() {
        let cfg = parse(
            r#"
output = "table"

[bounds.annual_rate_percent]
min = "6.0"
max = "12.0"
step = "0.05"
default = "8.75"
"#,
        )
        .unwrap();
        assert!(matches!(cfg.output, Some(OutputFormat::Table)));
        assert_eq!(cfg.bounds.annual_rate_percent.min, dec!(6.0));
        assert_eq!(cfg.bounds.annual_rate_percent.default, Some(dec!(8.75)));
        assert_eq!(cfg.bounds.house_price, InputBounds::default().house_price);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse("colour = true").is_err());
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        assert!(matches!(
            load(Some("/nonexistent/emi.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
