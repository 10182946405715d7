use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;
use tokio::sync::Notify;

use crate::auth::TokenSigner;
use crate::client::ApiClient;
use crate::config::WeatherConfig;
use crate::constants::{CITY_LOOKUP_PATH, SUCCESS_CODE, WEATHER_NOW_PATH};
use crate::error::WeatherError;
use crate::formatters::format_weather_now;
use crate::models::{CityLookupResponse, GetWeatherNowRequest, WeatherNowResponse};

const LOCATION_NOT_FOUND: &str = "输入的地区不存在，无法提供天气预报";

/// Main weather service that handles MCP requests
#[derive(Clone)]
pub struct Weather {
    api: Arc<ApiClient>,
    fatal: Arc<Notify>,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a service with a fresh token signer for `config`
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let signer = Arc::new(TokenSigner::new(config)?);
        Self::with_signer(config, signer)
    }

    /// Creates a service that signs requests with an existing signer
    pub fn with_signer(
        config: &WeatherConfig,
        signer: Arc<TokenSigner>,
    ) -> Result<Self, WeatherError> {
        let api = ApiClient::new(config, signer)?;

        Ok(Self {
            api: Arc::new(api),
            fatal: Arc::new(Notify::new()),
            tool_router: Self::tool_router(),
        })
    }

    /// Notified once a request hits an error the server cannot recover from.
    /// Shared by every clone of this service.
    pub fn fatal_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.fatal)
    }

    fn fatal_error(&self, err: WeatherError) -> McpError {
        tracing::error!("Unrecoverable error, requesting shutdown: {}", err);
        self.fatal.notify_one();
        McpError::internal_error(err.to_string(), None)
    }

    /// Resolves free-text location to the provider's city id.
    ///
    /// The provider ranks candidates by relevance; the first one is taken as-is.
    pub async fn resolve_location(&self, location: &str) -> Result<String, WeatherError> {
        let response = self
            .api
            .get_json::<CityLookupResponse>(CITY_LOOKUP_PATH, &[("location", location)])
            .await?;

        if response.code != SUCCESS_CODE {
            return Err(WeatherError::NotFound(location.to_string()));
        }

        let city = response
            .location
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(location.to_string()))?;

        tracing::debug!(
            "Resolved '{}' to {} ({}, {}, {}, {})",
            location,
            city.id,
            city.name,
            city.adm2,
            city.adm1,
            city.country
        );

        Ok(city.id)
    }

    /// Fetches current conditions for a city id and renders the report
    pub async fn fetch_weather_report(
        &self,
        city_id: &str,
        display_name: &str,
    ) -> Result<String, WeatherError> {
        let weather = self
            .api
            .get_json::<WeatherNowResponse>(WEATHER_NOW_PATH, &[("location", city_id)])
            .await?;

        // The provider reports semantic errors in-band with HTTP 200.
        if weather.code != SUCCESS_CODE {
            return Err(WeatherError::NotFound(city_id.to_string()));
        }

        Ok(format_weather_now(display_name, &weather))
    }

    /// Resolve then fetch. Non-fatal failures become an explanatory message.
    async fn weather_now_text(&self, location: &str) -> Result<String, WeatherError> {
        let city_id = match self.resolve_location(location).await {
            Ok(id) => id,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::warn!("Location lookup for '{}' failed: {}", location, e);
                return Ok(format!("{}: {}", LOCATION_NOT_FOUND, e));
            }
        };

        match self.fetch_weather_report(&city_id, location).await {
            Ok(report) => Ok(report),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::warn!("Weather fetch for '{}' ({}) failed: {}", location, city_id, e);
                Ok(fetch_failure_message(&e))
            }
        }
    }
}

fn fetch_failure_message(err: &WeatherError) -> String {
    match err {
        WeatherError::NotFound(_) => LOCATION_NOT_FOUND.to_string(),
        WeatherError::Decode(e) => format!("解析天气数据失败: {}", e),
        other => format!("获取天气信息失败: {}", other),
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A current-weather service for Chinese cities and districts. \
                Call getWeatherNow with a location such as \"广州 天河\" or \"广州\"."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets current conditions for a named location
    #[tool(name = "getWeatherNow", description = "获取指定地区实时天气")]
    pub async fn get_weather_now(
        &self,
        Parameters(request): Parameters<GetWeatherNowRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting current weather for: {}", request.location);

        let text = self
            .weather_now_text(&request.location)
            .await
            .map_err(|e| self.fatal_error(e))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
