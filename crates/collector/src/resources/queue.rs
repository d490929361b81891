use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::encode::queue::{queue_counts, QUEUE_LABELS};
use arrgauge_core::model::{QueuePage, QueueRecord};
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;
use tracing::trace;

/// Records requested per queue page.
pub const QUEUE_PAGE_SIZE: usize = 250;

/// Download queue, counted per status, tracked download status and tracked
/// download state.
///
/// The queue is paged; pages are requested in order until `totalRecords`
/// records were read or a page comes back empty.
pub struct QueueResource {
    total: Arc<MetricDescriptor>,
}

impl QueueResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            total: descriptor(
                app,
                "queue",
                "total",
                "Total number of queued items by status",
                &QUEUE_LABELS,
            ),
        }
    }

    fn page_params(page: usize) -> QueryParams {
        QueryParams::new()
            .with("page", page.to_string())
            .with("pageSize", QUEUE_PAGE_SIZE.to_string())
    }
}

#[async_trait::async_trait]
impl Resource for QueueResource {
    type Payload = Vec<QueueRecord>;

    fn name(&self) -> &'static str {
        "queue"
    }

    fn subsystem(&self) -> &'static str {
        "queue"
    }

    fn path(&self) -> &'static str {
        "queue"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let body: QueuePage = client.do_request(self.path(), &Self::page_params(page)).await?;
            let fetched = body.records.len();
            records.extend(body.records);
            trace!(page, fetched, total = body.total_records, "fetched queue page");

            if fetched == 0 || records.len() as i64 >= body.total_records {
                return Ok(records);
            }
            page += 1;
        }
    }

    fn encode(&self, records: Vec<QueueRecord>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for ((status, download_status, download_state), count) in queue_counts(&records) {
            collected.push(
                &self.total,
                Reading::new(count as f64, vec![status, download_status, download_state]),
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
    use arrgauge_core::AppFamily;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(status: &str, download_status: &str, download_state: &str) -> serde_json::Value {
        serde_json::json!({
            "title": "Some.Release",
            "size": 1.0e9,
            "status": status,
            "trackedDownloadStatus": download_status,
            "trackedDownloadState": download_state
        })
    }

    async fn mount_page(server: &MockServer, page: usize, total: usize, records: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(query_param("page", page.to_string()))
            .and(query_param("pageSize", QUEUE_PAGE_SIZE.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "page": page,
                "pageSize": QUEUE_PAGE_SIZE,
                "totalRecords": total,
                "records": records
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_records_grouped_by_status() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            1,
            4,
            vec![
                record("downloading", "ok", "downloading"),
                record("downloading", "ok", "downloading"),
                record("completed", "warning", "importPending"),
                record("queued", "ok", "downloading"),
            ],
        )
        .await;

        let app = app(AppFamily::Radarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), QueueResource::new(&app));
        let collection = collect(&collector).await;

        let samples = collection.samples();
        assert_eq!(samples.len(), 3);
        assert!(samples.iter().all(|s| s.descriptor.fq_name == "radarr_queue_total"));

        let downloading = samples
            .iter()
            .find(|s| s.label("status") == Some("downloading"))
            .unwrap();
        assert_eq!(downloading.value, 2.0);
        assert_eq!(downloading.label("download_status"), Some("ok"));
        assert_eq!(downloading.label("download_state"), Some("downloading"));

        let total: f64 = samples.iter().map(|s| s.value).sum();
        assert_eq!(total, 4.0);
    }

    #[tokio::test]
    async fn test_every_page_is_read() {
        let server = MockServer::start().await;
        let first: Vec<_> = (0..QUEUE_PAGE_SIZE).map(|_| record("downloading", "ok", "downloading")).collect();
        mount_page(&server, 1, QUEUE_PAGE_SIZE + 1, first).await;
        mount_page(&server, 2, QUEUE_PAGE_SIZE + 1, vec![record("delay", "ok", "downloading")]).await;

        let app = app(AppFamily::Sonarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), QueueResource::new(&app));
        let collection = collect(&collector).await;

        let samples = collection.samples();
        assert_eq!(samples.len(), 2);
        let total: f64 = samples.iter().map(|s| s.value).sum();
        assert_eq!(total, (QUEUE_PAGE_SIZE + 1) as f64);
    }

    #[tokio::test]
    async fn test_empty_queue_has_no_samples() {
        let server = MockServer::start().await;
        mount_page(&server, 1, 0, Vec::new()).await;

        let app = app(AppFamily::Whisparr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), QueueResource::new(&app));
        let collection = collect(&collector).await;

        assert!(!collection.is_failure());
        assert!(collection.emissions().is_empty());
    }

    #[tokio::test]
    async fn test_failing_second_page_fails_collection() {
        let server = MockServer::start().await;
        let first: Vec<_> = (0..QUEUE_PAGE_SIZE).map(|_| record("downloading", "ok", "downloading")).collect();
        mount_page(&server, 1, QUEUE_PAGE_SIZE * 2, first).await;
        Mock::given(method("GET"))
            .and(path("/api/v3/queue"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let app = app(AppFamily::Sonarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), QueueResource::new(&app));
        let collection = collect(&collector).await;

        assert!(collection.is_failure());
        assert_eq!(collection.emissions().len(), 1);
    }
}
