use once_cell::sync::Lazy;
use regex::Regex;

/// Words dropped from a pattern capture before it is returned as a place.
pub const STOP_WORDS: &[&str] = &[
    "let's",
    "plan",
    "my",
    "trip",
    "what",
    "is",
    "the",
    "temperature",
    "there",
    "and",
    "are",
    "places",
    "can",
    "i",
];

/// Capitalized tokens the fallback scan never treats as a place.
pub const FALLBACK_STOP_TOKENS: &[&str] = &["I'm", "And", "What"];

#[derive(Debug)]
struct PlacePattern {
    name: &'static str,
    regex: Regex,
}

impl PlacePattern {
    fn new(name: &'static str, lead: &str) -> Self {
        let regex = Regex::new(&format!(r"(?i){lead}([^,?.!]+)"))
            .expect("place pattern must be a valid regex");
        Self { name, regex }
    }

    /// Raw capture for this rule, before stop-word cleanup.
    fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

// Order matters: the doubled "going to go to" phrasing must win over "going to".
static PLACE_PATTERNS: Lazy<Vec<PlacePattern>> = Lazy::new(|| {
    vec![
        PlacePattern::new("going_to_go_to", r"going?\s+to\s+go\s+to\s+"),
        PlacePattern::new("go_to", r"going?\s+to\s+"),
        PlacePattern::new("visit", r"visit\s+"),
        PlacePattern::new("trip_to", r"trip\s+to\s+"),
        PlacePattern::new("in", r"in\s+"),
    ]
});

static STOP_WORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = STOP_WORDS
        .iter()
        .map(|word| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("stop-word regex must compile")
});

static TRAILING_SEPARATORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\s]+$").expect("trailing separator regex must compile"));

fn first_match(text: &str) -> Option<(&'static PlacePattern, &str)> {
    PLACE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.capture(text).map(|captured| (pattern, captured)))
}

/// Name of the pattern rule that decides the place for `text`, if any.
/// `None` means extraction falls through to the capitalized-word scan.
pub fn matching_rule(text: &str) -> Option<&'static str> {
    first_match(text).map(|(pattern, _)| pattern.name)
}

/// Returns the place mentioned in `text`, or an empty string when none is found.
///
/// The first matching pattern decides the answer even if cleanup leaves it
/// empty. Only when no pattern matches does the capitalized-word fallback
/// run, and its token is returned as-is without stop-word stripping.
pub fn extract_place_name(text: &str) -> String {
    if let Some((_, captured)) = first_match(text) {
        return clean_capture(captured);
    }

    capitalized_fallback(text).unwrap_or_default().to_string()
}

fn clean_capture(captured: &str) -> String {
    let stripped = STOP_WORD_RE.replace_all(captured.trim(), "");
    let stripped = TRAILING_SEPARATORS_RE.replace(&stripped, "");
    stripped.trim().to_string()
}

fn capitalized_fallback(text: &str) -> Option<&str> {
    text.split_whitespace().find(|word| {
        word.chars().next().is_some_and(char::is_uppercase)
            && word.chars().count() > 2
            && !FALLBACK_STOP_TOKENS.contains(word)
    })
}
