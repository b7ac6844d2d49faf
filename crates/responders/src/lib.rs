pub mod config;
pub mod error;
pub mod geocoding;
pub mod places;
pub mod weather;

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use config::ResponderConfig;
pub use error::ResponderError;
pub use geocoding::{NominatimClient, RequestThrottle};
pub use places::OverpassClient;
pub use weather::{CurrentWeather, OpenMeteoClient};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

pub trait Geocoder: Send + Sync {
    /// `None` when the place is unknown or the lookup failed.
    fn coordinates(&self, place: &str) -> impl Future<Output = Option<Coordinates>> + Send;
}

/// Turns a place name into a sentence about its current weather.
/// Failures come back as apology text, never as errors.
pub trait WeatherResponder: Send + Sync {
    fn get_weather(&self, place: &str) -> impl Future<Output = String> + Send;
}

/// Turns a place name into a short list of attractions.
/// Failures come back as apology text, never as errors.
pub trait PlacesResponder: Send + Sync {
    fn get_attractions(&self, place: &str) -> impl Future<Output = String> + Send;
}

pub fn unknown_place_message(place: &str) -> String {
    format!(
        "I don't know if this place '{place}' exists. Please check the spelling or try a different location."
    )
}

/// Both production responders, sharing one HTTP client and one geocoder.
pub struct Responders {
    pub weather: OpenMeteoClient,
    pub places: OverpassClient,
}

impl Responders {
    pub fn from_config(config: &ResponderConfig) -> Result<Self, ResponderError> {
        let http = config.http_client()?;
        let geocoder = Arc::new(NominatimClient::new(http.clone(), config));

        Ok(Self {
            weather: OpenMeteoClient::new(http.clone(), config, geocoder.clone()),
            places: OverpassClient::new(http, config, geocoder),
        })
    }
}
