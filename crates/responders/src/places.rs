use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ResponderConfig;
use crate::error::{check_status, ResponderError};
use crate::geocoding::NominatimClient;
use crate::{unknown_place_message, Coordinates, Geocoder, PlacesResponder};

pub const MAX_ATTRACTIONS: usize = 5;

/// Half-width of the search box in degrees, roughly 20 km.
pub const SEARCH_BOX_DEGREES: f64 = 0.18;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Points of interest from an Overpass API interpreter.
#[derive(Debug)]
pub struct OverpassClient<G = NominatimClient> {
    http: Client,
    api_url: String,
    timeout: Duration,
    geocoder: Arc<G>,
}

impl<G: Geocoder> OverpassClient<G> {
    pub fn new(http: Client, config: &ResponderConfig, geocoder: Arc<G>) -> Self {
        Self {
            http,
            api_url: config.overpass_url.clone(),
            timeout: config.overpass_timeout,
            geocoder,
        }
    }

    pub async fn fetch_attractions(&self, at: Coordinates) -> Result<Vec<String>, ResponderError> {
        let response = self
            .http
            .post(&self.api_url)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .timeout(self.timeout)
            .body(attractions_query(at))
            .send()
            .await?;
        let body: OverpassResponse = check_status(response, "overpass")?.json().await?;

        Ok(collect_attraction_names(body.elements))
    }
}

impl<G: Geocoder> PlacesResponder for OverpassClient<G> {
    async fn get_attractions(&self, place: &str) -> String {
        let Some(at) = self.geocoder.coordinates(place).await else {
            return unknown_place_message(place);
        };

        attractions_reply(place, self.fetch_attractions(at).await)
    }
}

/// Renders a lookup outcome as the text handed back to the agent.
pub fn attractions_reply(place: &str, outcome: Result<Vec<String>, ResponderError>) -> String {
    match outcome {
        Ok(names) if names.is_empty() => format!(
            "I couldn't find specific tourist attractions for {place}, but it's still worth exploring!"
        ),
        Ok(names) => {
            debug!(place, found = names.len(), "attractions found");
            format_attractions(place, &names)
        }
        Err(error) => {
            warn!(place, error = %error, "attractions lookup failed");
            format!("Error getting attractions for {place}: {error}")
        }
    }
}

pub fn attractions_query(at: Coordinates) -> String {
    let south = at.lat - SEARCH_BOX_DEGREES;
    let north = at.lat + SEARCH_BOX_DEGREES;
    let west = at.lon - SEARCH_BOX_DEGREES;
    let east = at.lon + SEARCH_BOX_DEGREES;
    let bbox = format!("({south},{west},{north},{east})");

    let tourism = r#"["tourism"~"attraction|museum|gallery|zoo|theme_park|viewpoint"]"#;
    let historic = r#"["historic"~"castle|palace|monument|ruins"]"#;
    let leisure = r#"["leisure"~"park|garden"]"#;

    let selectors = [
        format!("node{tourism}{bbox};"),
        format!("way{tourism}{bbox};"),
        format!("rel{tourism}{bbox};"),
        format!("node{historic}{bbox};"),
        format!("way{historic}{bbox};"),
        format!("node{leisure}{bbox};"),
        format!("way{leisure}{bbox};"),
    ];

    format!(
        "[out:json][timeout:25];\n(\n  {}\n);\nout center meta;\n",
        selectors.join("\n  ")
    )
}

/// Named elements only, first occurrence wins, capped at [`MAX_ATTRACTIONS`].
fn collect_attraction_names(elements: Vec<OverpassElement>) -> Vec<String> {
    let mut seen = HashSet::new();
    elements
        .into_iter()
        .filter_map(|element| element.tags.get("name").map(|name| name.trim().to_string()))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .take(MAX_ATTRACTIONS)
        .collect()
}

pub fn format_attractions(place: &str, names: &[String]) -> String {
    format!(
        "In {place} these are the places you can go,\n{}",
        names.join("\n")
    )
}
