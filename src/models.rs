use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Geocoding API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CityLookupResponse {
    pub code: String,
    #[serde(default)]
    pub location: Vec<CityLocation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CityLocation {
    pub name: String,
    pub id: String,
    pub lat: String,
    pub lon: String,
    /// District / prefecture
    pub adm2: String,
    /// Province / region
    pub adm1: String,
    pub country: String,
}

// ============================================================================
// Current Conditions API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct WeatherNowResponse {
    pub code: String,
    #[serde(rename = "updateTime", default)]
    pub update_time: String,
    #[serde(default)]
    pub now: WeatherNow,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WeatherNow {
    #[serde(rename = "obsTime")]
    pub obs_time: String,
    pub temp: String,
    #[serde(rename = "feelsLike")]
    pub feels_like: String,
    pub icon: String,
    pub text: String,
    #[serde(rename = "windDir")]
    pub wind_dir: String,
    #[serde(rename = "windScale")]
    pub wind_scale: String,
    #[serde(rename = "windSpeed")]
    pub wind_speed: String,
    pub humidity: String,
    pub precip: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetWeatherNowRequest {
    /// 查询的地区，格式为"城市 区域"，如"广州 天河"或仅"广州"
    pub location: String,
}
