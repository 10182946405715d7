use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenSigner;
use crate::config::WeatherConfig;
use crate::constants::USER_AGENT;
use crate::error::WeatherError;

/// Authenticated GET client for the weather provider
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    signer: Arc<TokenSigner>,
}

impl ApiClient {
    /// Builds a client whose requests are bounded by the configured timeout.
    pub fn new(config: &WeatherConfig, signer: Arc<TokenSigner>) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(WeatherError::Transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            signer,
        })
    }

    /// Issues a single GET to `base_url + path` and returns the raw body.
    ///
    /// Anything but HTTP 200 is an error. There is no retry.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, WeatherError> {
        let token = self.signer.token()?;
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed: {}", path, e);
                WeatherError::Transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("Request to {} returned status {}", path, status);
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(WeatherError::BodyRead)?;
        Ok(body.to_vec())
    }

    /// Like [`ApiClient::get`], then decodes the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let body = self.get(path, query).await?;
        let data = serde_json::from_slice(&body)?;
        Ok(data)
    }
}
