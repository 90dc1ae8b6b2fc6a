use serde::{Deserialize, Serialize};

use crate::encoding::data_url;

pub const MIME_TEXT_HTML: &str = "text/html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Arithmetic,
    PersonLookup,
    DirectUrl,
    Unresolved,
}

impl IntentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::PersonLookup => "person_lookup",
            Self::DirectUrl => "direct_url",
            Self::Unresolved => "unresolved",
        }
    }
}

/// Classified meaning of a query. Operands and subjects are kept exactly as
/// they appeared in the query; normalisation happens during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Arithmetic { a: String, b: String },
    PersonLookup { subject_title: Option<String> },
    DirectUrl { address: String },
    Unresolved,
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::Arithmetic { .. } => IntentKind::Arithmetic,
            Self::PersonLookup { .. } => IntentKind::PersonLookup,
            Self::DirectUrl { .. } => IntentKind::DirectUrl,
            Self::Unresolved => IntentKind::Unresolved,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    ExternalAddress,
    InlineDocument,
}

impl ResolutionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExternalAddress => "external_address",
            Self::InlineDocument => "inline_document",
        }
    }
}

/// What the display sink should show for one query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    ExternalAddress { url: String },
    InlineDocument { mime_type: String, body: String },
}

impl Resolution {
    pub fn external(url: impl Into<String>) -> Self {
        Self::ExternalAddress { url: url.into() }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self::InlineDocument {
            mime_type: MIME_TEXT_HTML.to_string(),
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ResolutionKind {
        match self {
            Self::ExternalAddress { .. } => ResolutionKind::ExternalAddress,
            Self::InlineDocument { .. } => ResolutionKind::InlineDocument,
        }
    }

    /// Single addressable reference for either variant. Inline documents are
    /// packed into a `data:` URL so the sink can load both the same way.
    pub fn href(&self) -> String {
        match self {
            Self::ExternalAddress { url } => url.clone(),
            Self::InlineDocument { mime_type, body } => data_url(mime_type, body),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub url: String,
}

impl ResolveRequest {
    pub fn new(query: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            url: url.into(),
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self::new(query, "")
    }

    /// The explicit override address, if one was supplied at all.
    pub fn explicit_url(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(self.url.as_str())
        }
    }
}
