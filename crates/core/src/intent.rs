use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::{Intent, IntentKind};

// Keywords fold ASCII case only and word boundaries are ASCII word boundaries.
static ADDITION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?-u:\b)(?i-u:add)\s+(-?[0-9]+(?:\.[0-9]+)?)\s+(?i-u:and)\s+(-?[0-9]+(?:\.[0-9]+)?)",
    )
    .expect("valid addition regex")
});
static WHO_IS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i-u:who)\s+(?i-u:is)(?-u:\b)").expect("valid who-is regex")
});
static WHO_IS_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?i-u:who)\s+(?i-u:is)(?:\s+|$)").expect("valid who-is prefix regex")
});
static WIKIPEDIA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u:wikipedia)").expect("valid wikipedia regex"));

// Opening and closing quotes are drawn from the same class but need not match.
static QUOTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"`]([^'"`]+)['"`]"#).expect("valid quoted span regex"));

/// One entry of the ordered classification table.
#[derive(Clone, Copy)]
pub struct IntentRule {
    pub kind: IntentKind,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&str) -> Intent,
}

impl IntentRule {
    pub fn apply(&self, query: &str) -> Option<Intent> {
        if (self.matches)(query) {
            Some((self.extract)(query))
        } else {
            None
        }
    }
}

/// Evaluated top to bottom; the first matching rule decides the intent.
pub static INTENT_RULES: [IntentRule; 3] = [
    IntentRule {
        kind: IntentKind::Arithmetic,
        matches: is_addition,
        extract: extract_addition,
    },
    IntentRule {
        kind: IntentKind::PersonLookup,
        matches: is_person_lookup,
        extract: extract_person_lookup,
    },
    IntentRule {
        kind: IntentKind::DirectUrl,
        matches: is_http_url,
        extract: extract_direct_url,
    },
];

pub fn classify(query: &str) -> Intent {
    INTENT_RULES
        .iter()
        .find_map(|rule| rule.apply(query))
        .unwrap_or(Intent::Unresolved)
}

/// True when `candidate` parses as an absolute URL with an `http` or `https`
/// scheme.
pub fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn is_addition(query: &str) -> bool {
    ADDITION_PATTERN.is_match(query)
}

fn extract_addition(query: &str) -> Intent {
    match ADDITION_PATTERN.captures(query) {
        Some(caps) => Intent::Arithmetic {
            a: caps[1].to_string(),
            b: caps[2].to_string(),
        },
        None => Intent::Unresolved,
    }
}

fn is_person_lookup(query: &str) -> bool {
    WHO_IS_PATTERN.is_match(query) || WIKIPEDIA_PATTERN.is_match(query)
}

fn extract_person_lookup(query: &str) -> Intent {
    Intent::PersonLookup {
        subject_title: extract_subject(query),
    }
}

fn extract_direct_url(query: &str) -> Intent {
    Intent::DirectUrl {
        address: query.to_string(),
    }
}

fn extract_subject(query: &str) -> Option<String> {
    let raw = match QUOTED_SPAN.captures(query) {
        Some(caps) => caps[1].to_string(),
        None => WHO_IS_PREFIX.replace(query, "").trim().to_string(),
    };

    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}
