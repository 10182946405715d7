//! MCP server exposing current weather from a QWeather-style provider.
//!
//! Requests are authenticated with short-lived EdDSA JWTs, a free-text
//! location is geocoded to a city id, and current conditions are rendered
//! into a short report.

pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;

pub use auth::TokenSigner;
pub use config::WeatherConfig;
pub use error::{ConfigError, WeatherError};
pub use service::Weather;
