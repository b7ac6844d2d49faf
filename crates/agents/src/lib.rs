use std::env;
use std::sync::Arc;
use std::time::Instant;

use tourism_core::{
    analyze_query, compose_reply, matching_rule, IntentFlags, QueryAnalysis, NO_PLACE_MESSAGE,
};
use tourism_observability::AppMetrics;
use tourism_responders::{PlacesResponder, WeatherResponder};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Run the weather and places lookups concurrently when both are wanted.
    pub parallel_responders: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            parallel_responders: true,
        }
    }
}

impl AgentConfig {
    pub fn from_env() -> Self {
        let parallel_responders = env::var("TOURISM_PARALLEL_RESPONDERS")
            .ok()
            .map(|value| !matches!(value.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        Self {
            parallel_responders,
        }
    }
}

/// Answers one travel question per call by extracting the place and intent,
/// asking the responders that are needed, and merging their text.
pub struct TourismAgent<W, P> {
    weather: W,
    places: P,
    metrics: Arc<AppMetrics>,
    config: AgentConfig,
}

impl<W, P> TourismAgent<W, P>
where
    W: WeatherResponder,
    P: PlacesResponder,
{
    pub fn new(weather: W, places: P, metrics: Arc<AppMetrics>, config: AgentConfig) -> Self {
        Self {
            weather,
            places,
            metrics,
            config,
        }
    }

    pub fn metrics(&self) -> &Arc<AppMetrics> {
        &self.metrics
    }

    #[instrument(skip(self, query))]
    pub async fn process(&self, query: &str) -> String {
        let started = Instant::now();
        self.metrics.inc_request();

        let QueryAnalysis { place, flags } = self.analyze(query);
        if place.is_empty() {
            self.metrics.inc_extraction_failure();
            self.metrics.observe_latency(started.elapsed());
            info!("no place name in query");
            return NO_PLACE_MESSAGE.to_string();
        }

        let reply = self.respond(&place, flags).await;

        self.metrics.observe_latency(started.elapsed());
        info!(
            place = %place,
            wants_weather = flags.wants_weather,
            wants_places = flags.wants_places,
            "query handled"
        );

        reply
    }

    /// Calls the responders selected by `flags` and composes their output,
    /// weather first regardless of which call finishes first.
    pub async fn respond(&self, place: &str, flags: IntentFlags) -> String {
        if flags.is_empty() {
            debug!(place, "no intent flags set, defaulting to places");
            return self.places_reply(place).await;
        }

        let (weather, places) = if self.config.parallel_responders {
            tokio::join!(
                self.weather_if(place, flags.wants_weather),
                self.places_if(place, flags.wants_places)
            )
        } else {
            let weather = self.weather_if(place, flags.wants_weather).await;
            let places = self.places_if(place, flags.wants_places).await;
            (weather, places)
        };

        compose_reply(place, weather.as_deref(), places.as_deref())
    }

    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let analysis = analyze_query(query);
        if analysis.has_place() {
            debug!(
                place = %analysis.place,
                rule = matching_rule(query).unwrap_or("capitalized_word"),
                "place extracted"
            );
        }
        analysis
    }

    async fn weather_if(&self, place: &str, wanted: bool) -> Option<String> {
        if !wanted {
            return None;
        }
        self.metrics.inc_weather_call();
        Some(self.weather.get_weather(place).await)
    }

    async fn places_if(&self, place: &str, wanted: bool) -> Option<String> {
        if !wanted {
            return None;
        }
        Some(self.places_reply(place).await)
    }

    async fn places_reply(&self, place: &str) -> String {
        self.metrics.inc_places_call();
        self.places.get_attractions(place).await
    }
}
