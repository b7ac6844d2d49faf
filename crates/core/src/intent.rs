use crate::models::IntentFlags;

pub const WEATHER_KEYWORDS: &[&str] = &["weather", "temperature", "temp", "rain", "sunny", "climate"];

pub const PLACES_KEYWORDS: &[&str] = &["places", "attractions", "tourist", "sights", "plan my trip"];

/// Decides which responders a query needs.
///
/// Keywords are plain substring checks on the lower-cased text. A query with
/// weather signals and no places signals stays weather-only; a query with
/// neither defaults to places.
pub fn classify_intent(text: &str) -> IntentFlags {
    let lower = text.to_lowercase();

    let wants_weather = contains_any(&lower, WEATHER_KEYWORDS);
    let mut wants_places = contains_any(&lower, PLACES_KEYWORDS);

    // "visit" only signals places when it is not part of a weather question,
    // unless "places" is spelled out.
    if lower.contains("visit") && (lower.contains("places") || !wants_weather) {
        wants_places = true;
    }

    if lower.contains("plan") && lower.contains("trip") {
        wants_places = true;
    }

    if wants_weather && !wants_places {
        return IntentFlags::weather_only();
    }

    if !wants_weather && !wants_places {
        wants_places = true;
    }

    IntentFlags::new(wants_weather, wants_places)
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
