/// Weather responders phrase current conditions as "In X it's currently ...".
pub const WEATHER_MARKER: &str = "it's currently";

/// Places responders introduce their list with this line.
pub const PLACES_MARKER: &str = "these are the places you can go,\n";

pub const NO_PLACE_MESSAGE: &str = "I couldn't identify a place name in your request. Please mention a specific location you'd like to visit.";

pub const CLARIFICATION_MESSAGE: &str =
    "I'm not sure what you'd like to know. Ask me about the weather, places to visit, or both!";

/// Merges responder output into one reply.
///
/// The merge splices on literal markers in the responder text, so it is
/// coupled to the exact phrasing the responders use. When the weather text
/// has no marker (an apology, for example) both outputs are joined as-is.
pub fn compose_reply(place: &str, weather: Option<&str>, places: Option<&str>) -> String {
    match (weather, places) {
        (Some(weather), None) => weather.to_string(),
        (None, Some(places)) => places.to_string(),
        (Some(weather), Some(places)) => merge(place, weather, places),
        (None, None) => CLARIFICATION_MESSAGE.to_string(),
    }
}

fn merge(place: &str, weather: &str, places: &str) -> String {
    let Some(weather_clause) = weather.split(WEATHER_MARKER).nth(1) else {
        return format!("{weather} {places}");
    };
    let places_clause = places.split(PLACES_MARKER).nth(1).unwrap_or(places);

    format!(
        "In {place} {WEATHER_MARKER}{weather_clause} And these are the places you can go:\n{places_clause}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = "In Bangalore it's currently 24.3°C with a chance of 35% to rain.";
    const PLACES: &str =
        "In Bangalore these are the places you can go,\nLalbagh\nCubbon Park\nBangalore Palace";

    #[test]
    fn single_output_is_returned_unchanged() {
        assert_eq!(compose_reply("Bangalore", Some(WEATHER), None), WEATHER);
        assert_eq!(compose_reply("Bangalore", None, Some(PLACES)), PLACES);
    }

    #[test]
    fn merges_marked_outputs_into_one_paragraph() {
        let reply = compose_reply("Bangalore", Some(WEATHER), Some(PLACES));
        assert_eq!(
            reply,
            "In Bangalore it's currently 24.3°C with a chance of 35% to rain. And these are the places you can go:\nLalbagh\nCubbon Park\nBangalore Palace"
        );
    }

    #[test]
    fn places_without_marker_are_used_verbatim() {
        let places = "I couldn't find specific tourist attractions for Bangalore, but it's still worth exploring!";
        let reply = compose_reply("Bangalore", Some(WEATHER), Some(places));
        assert!(reply.starts_with("In Bangalore it's currently 24.3°C"));
        assert!(reply.ends_with(&format!("you can go:\n{places}")));
    }

    #[test]
    fn weather_without_marker_falls_back_to_join() {
        let weather = "Error getting weather for Bangalore: timed out";
        let reply = compose_reply("Bangalore", Some(weather), Some(PLACES));
        assert_eq!(reply, format!("{weather} {PLACES}"));
    }

    #[test]
    fn clause_stops_at_a_repeated_marker() {
        let weather = "it's currently warm, it's currently windy";
        let reply = compose_reply("Oslo", Some(weather), Some(PLACES));
        assert!(reply.starts_with("In Oslo it's currently warm,  And these"));
    }

    #[test]
    fn nothing_to_compose_asks_for_clarification() {
        assert_eq!(compose_reply("Oslo", None, None), CLARIFICATION_MESSAGE);
    }
}
