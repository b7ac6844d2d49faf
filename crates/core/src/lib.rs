pub mod composer;
pub mod intent;
pub mod models;
pub mod place;
pub mod samples;

pub use composer::{compose_reply, CLARIFICATION_MESSAGE, NO_PLACE_MESSAGE};
pub use intent::classify_intent;
pub use models::*;
pub use place::{extract_place_name, matching_rule};
pub use samples::{Scenario, SAMPLE_QUERIES, SCENARIOS};

/// Runs extraction and classification without touching any responder.
pub fn analyze_query(text: &str) -> QueryAnalysis {
    QueryAnalysis {
        place: extract_place_name(text),
        flags: classify_intent(text),
    }
}
