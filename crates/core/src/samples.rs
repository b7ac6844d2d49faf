/// Suggestions offered to new users of the chat surfaces.
pub const SAMPLE_QUERIES: &[&str] = &[
    "What's the weather in Paris?",
    "I want to visit London, show me places to go",
    "I'm going to Tokyo, what's the temperature and places to visit?",
    "Tourist attractions in Rome",
    "Weather in New York",
    "I'm planning to visit Dubai, what should I expect?",
];

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub title: &'static str,
    pub query: &'static str,
    pub description: &'static str,
}

/// One query per intent combination: places only, weather only, both.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Trip Planning",
        query: "I'm going to go to Bangalore, let's plan my trip.",
        description: "User wants to plan a trip - should return tourist attractions",
    },
    Scenario {
        title: "Weather Query",
        query: "I'm going to go to Bangalore, what is the temperature there?",
        description: "User wants weather information only",
    },
    Scenario {
        title: "Combined Query",
        query: "I'm going to go to Bangalore, what is the temperature there? And what are the places I can visit?",
        description: "User wants both weather and places information",
    },
];
