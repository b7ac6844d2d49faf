use std::env;
use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_GEOCODING_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const DEFAULT_USER_AGENT: &str = "TourismAgent/1.0 (Educational Project)";

#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub geocoding_url: String,
    pub weather_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    /// Minimum spacing between geocoding requests, shared by all responders.
    pub geocode_interval: Duration,
    pub http_timeout: Duration,
    pub overpass_timeout: Duration,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocode_interval: Duration::from_millis(1_000),
            http_timeout: Duration::from_secs(10),
            overpass_timeout: Duration::from_secs(30),
        }
    }
}

impl ResponderConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            geocoding_url: env_string("TOURISM_GEOCODING_URL").unwrap_or(defaults.geocoding_url),
            weather_url: env_string("TOURISM_WEATHER_URL").unwrap_or(defaults.weather_url),
            overpass_url: env_string("TOURISM_OVERPASS_URL").unwrap_or(defaults.overpass_url),
            user_agent: env_string("TOURISM_USER_AGENT").unwrap_or(defaults.user_agent),
            geocode_interval: env_u64("TOURISM_GEOCODE_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.geocode_interval),
            http_timeout: env_u64("TOURISM_HTTP_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            overpass_timeout: env_u64("TOURISM_OVERPASS_TIMEOUT_SECONDS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.overpass_timeout),
        }
    }

    pub fn http_client(&self) -> reqwest::Result<Client> {
        Client::builder()
            .user_agent(self.user_agent.as_str())
            .connect_timeout(Duration::from_secs(6))
            .timeout(self.http_timeout)
            .build()
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.trim().parse::<u64>().ok())
}
