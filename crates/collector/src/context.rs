use arrgauge_core::AppDescriptor;
use chrono::{DateTime, Utc};
use tracing::Span;

/// Per-call context handed to every collect.
///
/// Carries the logging span keyed by collector name and the instant the
/// scrape started, so derived values such as backup age are computed against
/// one clock for the whole scrape.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    collector: String,
    span: Span,
    now: DateTime<Utc>,
}

impl ScrapeContext {
    pub fn new(collector: &str, app: &AppDescriptor, now: DateTime<Utc>) -> Self {
        let span = tracing::info_span!(
            "collect",
            collector = collector,
            app = %app.family,
            url = %app.base_url,
        );

        Self {
            collector: collector.to_string(),
            span,
            now,
        }
    }

    pub fn collector(&self) -> &str {
        &self.collector
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
