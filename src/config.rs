use serde::Deserialize;
use std::{fs, path::Path};

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::error::ConfigError;

/// Provider credentials and endpoint, read from the `WEATHER` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// PEM-encoded Ed25519 private key
    #[serde(rename = "privateKey")]
    pub private_key: String,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// JWT `sub` claim
    pub sub: String,
    /// JWT `kid` header
    pub kid: String,
    #[serde(rename = "timeoutSecs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct RootConfig {
    #[serde(rename = "WEATHER")]
    weather: WeatherConfig,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl WeatherConfig {
    /// Reads and validates the YAML config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents, path)
    }

    /// Parses config from an in-memory YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new("<inline>"))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let root: RootConfig =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = root.weather;
        config.validate()?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("privateKey", &self.private_key),
            ("baseURL", &self.base_url),
            ("sub", &self.sub),
            ("kid", &self.kid),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField(name));
            }
        }
        Ok(())
    }
}
