use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};
use viewport_core::{classify, is_http_url, resolve, Intent, Resolution, ResolveRequest};
use viewport_observability::ResolverMetrics;

/// Outcome of one request, ready to hand to a display sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// `None` when an explicit URL skipped classification.
    pub intent: Option<Intent>,
    pub resolution: Resolution,
    pub href: String,
}

#[derive(Debug, Clone)]
pub struct ViewService {
    metrics: Arc<ResolverMetrics>,
}

impl ViewService {
    pub fn new(metrics: Arc<ResolverMetrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<ResolverMetrics> {
        &self.metrics
    }

    pub fn classify(&self, query: &str) -> Intent {
        let intent = classify(query);
        debug!(query = %query, intent = intent.kind().as_str(), "query classified");
        intent
    }

    #[instrument(skip(self, request))]
    pub fn resolve(&self, request: &ResolveRequest) -> Resolved {
        let explicit = request.explicit_url().filter(|url| is_http_url(url));

        let (intent, resolution) = match explicit {
            Some(url) => {
                self.metrics.inc_explicit_url();
                (None, resolve(&Intent::Unresolved, Some(url)))
            }
            None => {
                let intent = self.classify(&request.query);
                self.metrics.inc_intent(intent.kind());
                let resolution = resolve(&intent, None);
                (Some(intent), resolution)
            }
        };

        self.metrics.observe_resolution(resolution.kind());
        info!(
            intent = intent.as_ref().map(|i| i.kind().as_str()).unwrap_or("explicit_url"),
            kind = resolution.kind().as_str(),
            explicit_url = explicit.is_some(),
            "request resolved"
        );

        let href = resolution.href();
        Resolved {
            intent,
            resolution,
            href,
        }
    }
}

impl Default for ViewService {
    fn default() -> Self {
        Self::new(ResolverMetrics::shared())
    }
}
