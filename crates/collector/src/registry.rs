use crate::collector::{Collection, Collector};
use crate::context::ScrapeContext;
use crate::resources::collectors_for;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};

/// Owns every registered collector and drives one scrape across them.
#[derive(Default)]
pub struct CollectorRegistry {
    collectors: Vec<Arc<dyn Collector>>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, collector: Arc<dyn Collector>) {
        self.collectors.push(collector);
    }

    /// Register the family's collector set for one app. Returns how many
    /// collectors were added.
    pub fn register_app(&mut self, app: Arc<AppDescriptor>) -> usize {
        let collectors = collectors_for(&app);
        let added = collectors.len();
        info!(
            app = %app.family,
            url = %app.base_url,
            collectors = added,
            "registered application"
        );
        self.collectors.extend(collectors);
        added
    }

    pub fn len(&self) -> usize {
        self.collectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collectors.is_empty()
    }

    pub fn collectors(&self) -> &[Arc<dyn Collector>] {
        &self.collectors
    }

    /// Every descriptor of every collector, error sentinels included.
    pub fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
        self.collectors.iter().flat_map(|c| c.describe()).collect()
    }

    /// Run all collectors concurrently.
    ///
    /// All collectors share one scrape instant. Results come back in
    /// registration order.
    pub async fn scrape(&self) -> Vec<Collection> {
        let now = Utc::now();
        let collections = join_all(self.collectors.iter().map(|collector| async move {
            let ctx = ScrapeContext::new(collector.name(), collector.app(), now);
            collector.collect(&ctx).await
        }))
        .await;

        let failed = collections.iter().filter(|c| c.is_failure()).count();
        debug!(collectors = collections.len(), failed, "scrape finished");
        collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::Collected;
    use crate::resources::testing::app;
    use arrgauge_core::{AppFamily, Reading};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Collector that records the scrape instant it was handed.
    struct Clock {
        app: Arc<AppDescriptor>,
        descriptor: Arc<MetricDescriptor>,
        error_descriptor: Arc<MetricDescriptor>,
    }

    impl Clock {
        fn new(name: &str) -> Self {
            Self {
                app: app(AppFamily::Radarr, "http://radarr:7878"),
                descriptor: Arc::new(MetricDescriptor::new(format!("radarr_{name}_now"), "Scrape instant", &[])),
                error_descriptor: Arc::new(MetricDescriptor::collector_error("radarr", name, "http://radarr:7878")),
            }
        }
    }

    #[async_trait::async_trait]
    impl Collector for Clock {
        fn name(&self) -> &str {
            "clock"
        }

        fn app(&self) -> &Arc<AppDescriptor> {
            &self.app
        }

        fn describe(&self) -> Vec<Arc<MetricDescriptor>> {
            vec![self.descriptor.clone(), self.error_descriptor.clone()]
        }

        fn error_descriptor(&self) -> &Arc<MetricDescriptor> {
            &self.error_descriptor
        }

        async fn collect(&self, ctx: &ScrapeContext) -> Collection {
            let mut collected = Collected::new();
            let result = collected
                .push(&self.descriptor, Reading::scalar(ctx.now().timestamp() as f64))
                .map(|_| collected);
            Collection::new(self.name(), self.error_descriptor.clone(), result)
        }
    }

    #[tokio::test]
    async fn test_collectors_share_scrape_instant() {
        let mut registry = CollectorRegistry::new();
        registry.register(Arc::new(Clock::new("a")));
        registry.register(Arc::new(Clock::new("b")));

        let collections = registry.scrape().await;
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].samples()[0].value, collections[1].samples()[0].value);
    }

    #[test]
    fn test_register_app_counts() {
        let mut registry = CollectorRegistry::new();
        assert!(registry.is_empty());

        assert_eq!(registry.register_app(app(AppFamily::Sonarr, "http://sonarr:8989")), 13);
        assert_eq!(registry.register_app(app(AppFamily::Prowlarr, "http://prowlarr:9696")), 8);
        assert_eq!(registry.register_app(app(AppFamily::Bazarr, "http://bazarr:6767")), 0);
        assert_eq!(registry.len(), 21);
    }

    #[test]
    fn test_describe_includes_sentinels() {
        let mut registry = CollectorRegistry::new();
        registry.register_app(app(AppFamily::Prowlarr, "http://prowlarr:9696"));

        let sentinels = registry
            .describe()
            .iter()
            .filter(|d| d.fq_name.ends_with("_collector_error"))
            .count();
        assert_eq!(sentinels, registry.len());
    }

    #[tokio::test]
    async fn test_one_failing_collector_does_not_affect_others() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/update"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        for resource in ["system/backup", "health", "downloadclient", "indexer"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/{resource}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
                .mount(&server)
                .await;
        }
        for resource in ["log", "history"] {
            Mock::given(method("GET"))
                .and(path(format!("/api/v1/{resource}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"totalRecords": 3})))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/api/v1/system/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "1.14.0"})))
            .mount(&server)
            .await;

        let mut registry = CollectorRegistry::new();
        registry.register_app(app(AppFamily::Prowlarr, &server.uri()));

        let collections = registry.scrape().await;
        let failed: Vec<&str> = collections
            .iter()
            .filter(|c| c.is_failure())
            .map(|c| c.collector.as_str())
            .collect();

        assert_eq!(failed, vec!["update"]);
        assert_eq!(collections.len(), 8);
    }
}
