use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the YAML configuration. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config field WEATHER.{0} is missing or empty")]
    MissingField(&'static str),
}

/// Errors raised while talking to the weather provider.
///
/// Display strings are user-facing: they end up appended to the tool's
/// explanatory message.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("无法签名token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("请求失败: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP错误，状态码: {0}")]
    HttpStatus(u16),

    #[error("读取响应失败: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("解析响应失败: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("未找到城市: {0}")]
    NotFound(String),
}

impl WeatherError {
    /// Signing failures mean the configured key is unusable; nothing at
    /// runtime can fix that.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WeatherError::Signing(_))
    }
}
