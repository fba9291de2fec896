use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    codec::DEFAULT_QUALITY,
    error::{ConfigError, Error, Result},
};

/// Settings read from an optional TOML file. Command line flags take
/// precedence over anything set here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|text| Config::from_toml(&text))
            .map_err(|source| Error::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_toml(text: &str) -> std::result::Result<Config, ConfigError> {
        let config: Config = toml::from_str(text)?;
        if !(1..=100).contains(&config.quality) {
            return Err(ConfigError::Quality(config.quality));
        }
        Ok(config)
    }
}
