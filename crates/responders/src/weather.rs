use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::ResponderConfig;
use crate::error::{check_status, ResponderError};
use crate::geocoding::NominatimClient;
use crate::{unknown_place_message, Coordinates, Geocoder, WeatherResponder};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub precipitation_probability: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: Option<f64>,
    precipitation_probability: Option<f64>,
}

impl ForecastResponse {
    fn into_current(self) -> Result<CurrentWeather, ResponderError> {
        let current = self
            .current
            .ok_or(ResponderError::MissingData("current weather"))?;
        let temperature_c = current
            .temperature_2m
            .ok_or(ResponderError::MissingData("temperature"))?;

        Ok(CurrentWeather {
            temperature_c,
            precipitation_probability: current.precipitation_probability.unwrap_or(0.0),
        })
    }
}

/// Current conditions from an Open-Meteo forecast endpoint.
#[derive(Debug)]
pub struct OpenMeteoClient<G = NominatimClient> {
    http: Client,
    base_url: String,
    geocoder: Arc<G>,
}

impl<G: Geocoder> OpenMeteoClient<G> {
    pub fn new(http: Client, config: &ResponderConfig, geocoder: Arc<G>) -> Self {
        Self {
            http,
            base_url: config.weather_url.clone(),
            geocoder,
        }
    }

    pub async fn fetch_current(&self, at: Coordinates) -> Result<CurrentWeather, ResponderError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", at.lat.to_string()),
                ("longitude", at.lon.to_string()),
                (
                    "current",
                    "temperature_2m,precipitation_probability".to_string(),
                ),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;
        let forecast: ForecastResponse = check_status(response, "open-meteo")?.json().await?;

        forecast.into_current()
    }
}

impl<G: Geocoder> WeatherResponder for OpenMeteoClient<G> {
    async fn get_weather(&self, place: &str) -> String {
        let Some(at) = self.geocoder.coordinates(place).await else {
            return unknown_place_message(place);
        };

        weather_reply(place, self.fetch_current(at).await)
    }
}

/// Renders a lookup outcome as the text handed back to the agent.
pub fn weather_reply(place: &str, outcome: Result<CurrentWeather, ResponderError>) -> String {
    match outcome {
        Ok(current) => format_weather_report(place, &current),
        Err(error) if error.is_missing_data() => {
            warn!(place, error = %error, "weather payload incomplete");
            format!("Unable to get weather data for {place}.")
        }
        Err(error) => {
            warn!(place, error = %error, "weather lookup failed");
            format!("Error getting weather for {place}: {error}")
        }
    }
}

/// Temperatures always keep a decimal ("21.0"); the rain chance is a whole percentage.
pub fn format_weather_report(place: &str, current: &CurrentWeather) -> String {
    format!(
        "In {place} it's currently {:?}°C with a chance of {}% to rain.",
        current.temperature_c, current.precipitation_probability
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<CurrentWeather, ResponderError> {
        serde_json::from_str::<ForecastResponse>(body)
            .unwrap()
            .into_current()
    }

    #[test]
    fn reads_current_conditions() {
        let current = parse(
            r#"{"latitude": 12.98, "current": {"time": "2024-05-01T12:00",
                "temperature_2m": 24.3, "precipitation_probability": 35}}"#,
        )
        .unwrap();

        assert_eq!(current.temperature_c, 24.3);
        assert_eq!(current.precipitation_probability, 35.0);
    }

    #[test]
    fn missing_precipitation_defaults_to_zero() {
        let current = parse(r#"{"current": {"temperature_2m": 18.5}}"#).unwrap();
        assert_eq!(current.precipitation_probability, 0.0);
    }

    #[test]
    fn missing_current_block_is_reported() {
        let err = parse(r#"{"latitude": 1.0}"#).unwrap_err();
        assert!(err.is_missing_data());
    }

    #[test]
    fn report_carries_the_composer_marker() {
        let report = format_weather_report(
            "Bangalore",
            &CurrentWeather {
                temperature_c: 24.3,
                precipitation_probability: 35.0,
            },
        );
        assert_eq!(
            report,
            "In Bangalore it's currently 24.3°C with a chance of 35% to rain."
        );
    }

    #[test]
    fn whole_temperatures_keep_one_decimal() {
        let report = format_weather_report(
            "Oslo",
            &CurrentWeather {
                temperature_c: 21.0,
                precipitation_probability: 0.0,
            },
        );
        assert_eq!(
            report,
            "In Oslo it's currently 21.0°C with a chance of 0% to rain."
        );
    }

    #[test]
    fn incomplete_payload_is_reported_as_unavailable() {
        let reply = weather_reply("Rome", Err(ResponderError::MissingData("temperature")));
        assert_eq!(reply, "Unable to get weather data for Rome.");
    }

    #[test]
    fn upstream_failure_is_rendered_with_its_cause() {
        let reply = weather_reply(
            "Rome",
            Err(ResponderError::Status {
                upstream: "open-meteo",
                status: 503,
            }),
        );
        assert_eq!(
            reply,
            "Error getting weather for Rome: open-meteo returned HTTP 503"
        );
    }

    #[test]
    fn successful_lookup_becomes_the_report() {
        let reply = weather_reply(
            "Rome",
            Ok(CurrentWeather {
                temperature_c: -3.5,
                precipitation_probability: 80.0,
            }),
        );
        assert_eq!(
            reply,
            "In Rome it's currently -3.5°C with a chance of 80% to rain."
        );
    }
}
