use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::indexer_status;
use arrgauge_core::model::Indexer;
use arrgauge_core::{AppDescriptor, AppFamily, MetricDescriptor, Reading};
use std::sync::Arc;

pub struct IndexerResource {
    family: AppFamily,
    status: Arc<MetricDescriptor>,
}

impl IndexerResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            family: app.family,
            status: descriptor(
                app,
                "",
                "indexer",
                "Indexer status. 0 = Disabled, 1 = RSS, 2 = Automatic search, 3 = Interactive search; enabled features are summed",
                &["protocol", "name", "priority", "implementation"],
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for IndexerResource {
    type Payload = Vec<Indexer>;

    fn name(&self) -> &'static str {
        "indexer"
    }

    fn subsystem(&self) -> &'static str {
        "indexer"
    }

    fn path(&self) -> &'static str {
        "indexer"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.status.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, indexers: Vec<Indexer>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for indexer in &indexers {
            let status = indexer_status(self.family, indexer);
            collected.push(
                &self.status,
                Reading::new(
                    f64::from(status),
                    vec![
                        indexer.protocol.clone(),
                        indexer.name.clone(),
                        indexer.priority.to_string(),
                        indexer.implementation.clone(),
                    ],
                ),
            )?;
        }
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceCollector;
    use crate::resources::testing::{app, collect};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(family: AppFamily, expected_path: &str, body: serde_json::Value) -> crate::collector::Collection {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(expected_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(family, &server.uri());
        let collector = ResourceCollector::new(app.clone(), IndexerResource::new(&app));
        collect(&collector).await
    }

    #[tokio::test]
    async fn test_status_sum_per_indexer() {
        let collection = serve(
            AppFamily::Radarr,
            "/api/v3/indexer",
            serde_json::json!([
                {"name": "rss-only", "protocol": "torrent", "priority": 25, "implementation": "Torznab",
                 "enableRss": true},
                {"name": "auto-only", "protocol": "usenet", "priority": 10, "implementation": "Newznab",
                 "enableAutomaticSearch": true},
                {"name": "interactive-only", "protocol": "usenet", "priority": 10, "implementation": "Newznab",
                 "enableInteractiveSearch": true},
                {"name": "all", "protocol": "torrent", "priority": 1, "implementation": "Torznab",
                 "enableRss": true, "enableAutomaticSearch": true, "enableInteractiveSearch": true}
            ]),
        )
        .await;

        let values: Vec<f64> = collection.samples().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 6.0]);

        let first = &collection.samples()[0];
        assert_eq!(first.descriptor.fq_name, "radarr_indexer");
        assert_eq!(first.label("name"), Some("rss-only"));
        assert_eq!(first.label("priority"), Some("25"));
        assert_eq!(first.label("implementation"), Some("Torznab"));
    }

    #[tokio::test]
    async fn test_prowlarr_capability_fallback() {
        let collection = serve(
            AppFamily::Prowlarr,
            "/api/v1/indexer",
            serde_json::json!([
                {"name": "nyaa", "protocol": "torrent", "enable": true, "supportsRss": false, "supportsSearch": true},
                {"name": "off", "protocol": "torrent", "enable": false, "supportsRss": true, "supportsSearch": true}
            ]),
        )
        .await;

        let values: Vec<f64> = collection.samples().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![5.0, 0.0]);
    }

    #[tokio::test]
    async fn test_fallback_not_applied_outside_prowlarr() {
        let collection = serve(
            AppFamily::Sonarr,
            "/api/v3/indexer",
            serde_json::json!([
                {"name": "nyaa", "enable": true, "supportsRss": true, "supportsSearch": true}
            ]),
        )
        .await;

        assert_eq!(collection.samples()[0].value, 0.0);
    }

    #[tokio::test]
    async fn test_no_indexers_no_samples() {
        let collection = serve(AppFamily::Prowlarr, "/api/v1/indexer", serde_json::json!([])).await;

        assert!(!collection.is_failure());
        assert!(collection.emissions().is_empty());
    }
}
