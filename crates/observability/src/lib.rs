use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use viewport_core::{IntentKind, ResolutionKind};

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct ResolverMetrics {
    resolutions_total: AtomicU64,
    explicit_url_total: AtomicU64,
    arithmetic_total: AtomicU64,
    person_lookup_total: AtomicU64,
    direct_url_total: AtomicU64,
    unresolved_total: AtomicU64,
    inline_documents_total: AtomicU64,
    external_addresses_total: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub resolutions_total: u64,
    pub explicit_url_total: u64,
    pub arithmetic_total: u64,
    pub person_lookup_total: u64,
    pub direct_url_total: u64,
    pub unresolved_total: u64,
    pub inline_documents_total: u64,
    pub external_addresses_total: u64,
}

impl ResolverMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_explicit_url(&self) {
        self.explicit_url_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_intent(&self, kind: IntentKind) {
        let counter = match kind {
            IntentKind::Arithmetic => &self.arithmetic_total,
            IntentKind::PersonLookup => &self.person_lookup_total,
            IntentKind::DirectUrl => &self.direct_url_total,
            IntentKind::Unresolved => &self.unresolved_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one finished resolution by the variant handed to the sink.
    pub fn observe_resolution(&self, kind: ResolutionKind) {
        self.resolutions_total.fetch_add(1, Ordering::Relaxed);
        let counter = match kind {
            ResolutionKind::InlineDocument => &self.inline_documents_total,
            ResolutionKind::ExternalAddress => &self.external_addresses_total,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            resolutions_total: self.resolutions_total.load(Ordering::Relaxed),
            explicit_url_total: self.explicit_url_total.load(Ordering::Relaxed),
            arithmetic_total: self.arithmetic_total.load(Ordering::Relaxed),
            person_lookup_total: self.person_lookup_total.load(Ordering::Relaxed),
            direct_url_total: self.direct_url_total.load(Ordering::Relaxed),
            unresolved_total: self.unresolved_total.load(Ordering::Relaxed),
            inline_documents_total: self.inline_documents_total.load(Ordering::Relaxed),
            external_addresses_total: self.external_addresses_total.load(Ordering::Relaxed),
        }
    }
}

/// Installs the JSON subscriber once per process. `RUST_LOG` overrides the
/// default filter. Output goes to stderr so stdout stays free for results.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,viewport_service=info,viewport_api=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
