/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mcp-qweather-server/0.1.0";

/// Geocoding endpoint, relative to the configured base URL
pub const CITY_LOOKUP_PATH: &str = "/geo/v2/city/lookup";

/// Current conditions endpoint, relative to the configured base URL
pub const WEATHER_NOW_PATH: &str = "/v7/weather/now";

/// In-band `code` value the provider uses for a successful response
pub const SUCCESS_CODE: &str = "200";

/// Nominal token lifetime (24h)
pub const TOKEN_LIFETIME_SECS: i64 = 86_400;

/// Tokens are considered expired this long before the provider would reject them
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 100;

/// `iat` is backdated by this much to tolerate clock skew with the provider
pub const ISSUED_AT_SKEW_SECS: i64 = 30;

/// Upstream request timeout when the config does not set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "conf.yaml";

/// Listen address for the HTTP transport
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8013";
