pub mod document;
pub mod encoding;
pub mod intent;
pub mod models;
pub mod resolver;

pub use document::{format_number, render_addition_document, HELP_DOCUMENT};
pub use encoding::{data_url, pct_encode_component};
pub use intent::{classify, is_http_url, IntentRule, INTENT_RULES};
pub use models::*;
pub use resolver::{parse_numeric_or_zero, resolve, resolve_request, wikipedia_url};
