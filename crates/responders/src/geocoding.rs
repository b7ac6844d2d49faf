use std::time::{Duration, Instant};

use parking_lot::Mutex;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ResponderConfig;
use crate::error::{check_status, ResponderError};
use crate::{Coordinates, Geocoder};

/// Spaces out requests so that no two start closer than `min_interval`,
/// regardless of how many tasks share the client.
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Claims the next free slot and returns how long the caller must wait for it.
    pub fn reserve(&self) -> Duration {
        let now = Instant::now();
        let mut next_slot = self.next_slot.lock();
        let slot = match *next_slot {
            Some(at) if at > now => at,
            _ => now,
        };
        *next_slot = Some(slot + self.min_interval);
        slot.saturating_duration_since(now)
    }

    pub async fn wait(&self) {
        let delay = self.reserve();
        if !delay.is_zero() {
            debug!(delay_ms = delay.as_millis() as u64, "throttling geocoding request");
            tokio::time::sleep(delay).await;
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

impl NominatimHit {
    fn coordinates(&self) -> Result<Coordinates, ResponderError> {
        let lat = self.lat.trim().parse::<f64>().map_err(|_| {
            ResponderError::InvalidResponse(format!("latitude {:?} is not a number", self.lat))
        })?;
        let lon = self.lon.trim().parse::<f64>().map_err(|_| {
            ResponderError::InvalidResponse(format!("longitude {:?} is not a number", self.lon))
        })?;
        Ok(Coordinates { lat, lon })
    }
}

/// Resolves place names against a Nominatim search endpoint.
#[derive(Debug)]
pub struct NominatimClient {
    http: Client,
    base_url: String,
    throttle: RequestThrottle,
}

impl NominatimClient {
    pub fn new(http: Client, config: &ResponderConfig) -> Self {
        Self {
            http,
            base_url: config.geocoding_url.clone(),
            throttle: RequestThrottle::new(config.geocode_interval),
        }
    }

    pub async fn lookup(&self, place: &str) -> Result<Option<Coordinates>, ResponderError> {
        self.throttle.wait().await;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", place), ("format", "json"), ("limit", "1")])
            .send()
            .await?;
        let hits: Vec<NominatimHit> = check_status(response, "nominatim")?.json().await?;

        parse_first_hit(&hits)
    }
}

fn parse_first_hit(hits: &[NominatimHit]) -> Result<Option<Coordinates>, ResponderError> {
    hits.first().map(NominatimHit::coordinates).transpose()
}

impl Geocoder for NominatimClient {
    async fn coordinates(&self, place: &str) -> Option<Coordinates> {
        match self.lookup(place).await {
            Ok(Some(found)) => {
                debug!(place, lat = found.lat, lon = found.lon, "place resolved");
                Some(found)
            }
            Ok(None) => {
                debug!(place, "place not found");
                None
            }
            Err(error) => {
                warn!(place, error = %error, "geocoding failed");
                None
            }
        }
    }
}
