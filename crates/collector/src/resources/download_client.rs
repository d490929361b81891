use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::download_client::{download_client_reading, DOWNLOAD_CLIENT_LABELS};
use arrgauge_core::model::DownloadClient;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

pub struct DownloadClientResource {
    status: Arc<MetricDescriptor>,
}

impl DownloadClientResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            status: descriptor(
                app,
                "",
                "downloadclient",
                "Download client status. 0 = Disabled, 1 = Enabled",
                &DOWNLOAD_CLIENT_LABELS,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for DownloadClientResource {
    type Payload = Vec<DownloadClient>;

    fn name(&self) -> &'static str {
        "downloadclient"
    }

    fn subsystem(&self) -> &'static str {
        "downloadclient"
    }

    fn path(&self) -> &'static str {
        "downloadclient"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.status.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, clients: Vec<DownloadClient>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for client in &clients {
            collected.push(&self.status, download_client_reading(client))?;
        }
        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceCollector;
    use crate::resources::testing::{app, collect};
    use arrgauge_core::AppFamily;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_client_status_per_family() {
        let cases = [
            (AppFamily::Radarr, "/api/v3/downloadclient"),
            (AppFamily::Sonarr, "/api/v3/downloadclient"),
            (AppFamily::Lidarr, "/api/v1/downloadclient"),
            (AppFamily::Prowlarr, "/api/v1/downloadclient"),
            (AppFamily::Readarr, "/api/v1/downloadclient"),
            (AppFamily::Whisparr, "/api/v3/downloadclient"),
        ];

        for (family, expected_path) in cases {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(expected_path))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    {
                        "name": "sabnzbd", "protocol": "usenet", "enable": true, "priority": 1,
                        "removeCompletedDownloads": true, "removeFailedDownloads": true,
                        "implementation": "Sabnzbd"
                    },
                    {
                        "name": "transmission", "protocol": "torrent", "enable": false, "priority": 2,
                        "removeCompletedDownloads": false, "removeFailedDownloads": true,
                        "implementation": "Transmission"
                    }
                ])))
                .expect(1)
                .mount(&server)
                .await;

            let app = app(family, &server.uri());
            let collector = ResourceCollector::new(app.clone(), DownloadClientResource::new(&app));
            let collection = collect(&collector).await;

            let samples = collection.samples();
            assert_eq!(samples.len(), 2, "{family}");
            assert_eq!(samples[0].descriptor.fq_name, format!("{family}_downloadclient"));
            assert_eq!(samples[0].value, 1.0);
            assert_eq!(samples[0].label("removeCompletedDownloads"), Some("true"));
            assert_eq!(samples[1].value, 0.0);
            assert_eq!(samples[1].label("name"), Some("transmission"));
            assert_eq!(samples[1].label("priority"), Some("2"));
            assert_eq!(samples[1].label("removeCompletedDownloads"), Some("false"));
        }
    }

    #[tokio::test]
    async fn test_failure_does_not_panic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app(AppFamily::Sonarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), DownloadClientResource::new(&app));
        let collection = collect(&collector).await;

        assert!(collection.is_failure());
        assert_eq!(collection.emissions().len(), 1);
        assert_eq!(collection.error_descriptor.fq_name, "sonarr_downloadclient_collector_error");
    }

    #[tokio::test]
    async fn test_no_download_clients_no_samples() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/downloadclient"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(AppFamily::Lidarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), DownloadClientResource::new(&app));
        let collection = collect(&collector).await;

        assert!(!collection.is_failure());
        assert!(collection.emissions().is_empty());
    }
}
