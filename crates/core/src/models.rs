use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntentFlags {
    pub wants_weather: bool,
    pub wants_places: bool,
}

impl IntentFlags {
    pub fn new(wants_weather: bool, wants_places: bool) -> Self {
        Self {
            wants_weather,
            wants_places,
        }
    }

    pub fn weather_only() -> Self {
        Self::new(true, false)
    }

    pub fn places_only() -> Self {
        Self::new(false, true)
    }

    pub fn both() -> Self {
        Self::new(true, true)
    }

    pub fn is_empty(self) -> bool {
        !self.wants_weather && !self.wants_places
    }
}

/// Place and intent pulled out of one user utterance, before any responder runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub place: String,
    #[serde(flatten)]
    pub flags: IntentFlags,
}

impl QueryAnalysis {
    pub fn has_place(&self) -> bool {
        !self.place.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatInput {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub status: String,
}

impl ChatReply {
    pub fn success(response: String) -> Self {
        Self {
            response,
            status: "success".to_string(),
        }
    }
}
