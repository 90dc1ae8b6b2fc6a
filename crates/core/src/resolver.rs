use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{render_addition_document, HELP_DOCUMENT};
use crate::encoding::pct_encode_component;
use crate::intent::{classify, is_http_url};
use crate::models::{Intent, Resolution, ResolveRequest};

const WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Entry point: an explicit http(s) `url` wins outright, otherwise the query
/// is classified and resolved.
pub fn resolve_request(request: &ResolveRequest) -> Resolution {
    if let Some(url) = request.explicit_url().filter(|url| is_http_url(url)) {
        return Resolution::external(url);
    }

    resolve(&classify(&request.query), None)
}

/// Maps an intent to what should be displayed. Never fails: anything that
/// cannot be resolved more specifically ends up on the help document.
pub fn resolve(intent: &Intent, explicit_url: Option<&str>) -> Resolution {
    if let Some(url) = explicit_url.filter(|url| is_http_url(url)) {
        return Resolution::external(url);
    }

    match intent {
        Intent::Arithmetic { a, b } => {
            let a = parse_numeric_or_zero(a);
            let b = parse_numeric_or_zero(b);
            Resolution::html(render_addition_document(a, b, a + b))
        }
        Intent::PersonLookup {
            subject_title: Some(subject),
        } => match wikipedia_url(subject) {
            Some(url) => Resolution::external(url),
            None => help(),
        },
        Intent::DirectUrl { address } => Resolution::external(address.as_str()),
        Intent::PersonLookup {
            subject_title: None,
        }
        | Intent::Unresolved => help(),
    }
}

/// Parses an operand, treating anything unparsable or non-finite as `0`.
pub fn parse_numeric_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Article address for a subject, or `None` when nothing but whitespace
/// remains.
pub fn wikipedia_url(subject: &str) -> Option<String> {
    if subject.trim().is_empty() {
        return None;
    }
    let title = WHITESPACE_RUN.replace_all(subject, "_");
    Some(format!(
        "{}{}",
        WIKIPEDIA_ARTICLE_BASE,
        pct_encode_component(&title)
    ))
}

fn help() -> Resolution {
    Resolution::html(HELP_DOCUMENT)
}
