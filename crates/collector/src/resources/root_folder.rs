use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::model::RootFolder;
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;

pub struct RootFolderResource {
    free: Arc<MetricDescriptor>,
    total: Arc<MetricDescriptor>,
}

impl RootFolderResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            free: descriptor(
                app,
                "rootfolder",
                "free_bytes",
                "Root folder free space in bytes by path",
                &["path"],
            ),
            total: descriptor(
                app,
                "rootfolder",
                "total_bytes",
                "Root folder total space in bytes by path",
                &["path"],
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for RootFolderResource {
    type Payload = Vec<RootFolder>;

    fn name(&self) -> &'static str {
        "rootfolder"
    }

    fn subsystem(&self) -> &'static str {
        "rootfolder"
    }

    fn path(&self) -> &'static str {
        "rootfolder"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.free.clone(), self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, folders: Vec<RootFolder>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for folder in folders {
            collected.push(&self.free, Reading::new(folder.free_space as f64, vec![folder.path.clone()]))?;
            collected.push(&self.total, Reading::new(folder.total_space as f64, vec![folder.path]))?;
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
    async fn test_root_folders_not_aggregated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rootfolder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"path": "/books", "freeSpace": 10, "totalSpace": 100},
                {"path": "/audiobooks", "freeSpace": 20}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(AppFamily::Readarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), RootFolderResource::new(&app));
        let collection = collect(&collector).await;

        let samples = collection.samples();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].descriptor.fq_name, "readarr_rootfolder_free_bytes");
        assert_eq!(samples[0].label("path"), Some("/books"));
        assert_eq!(samples[2].value, 20.0);
        // totalSpace missing from the payload defaults to 0
        assert_eq!(samples[3].value, 0.0);
    }

    #[tokio::test]
    async fn test_no_root_folders_no_samples() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/rootfolder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let app = app(AppFamily::Sonarr, &server.uri());
        let collector = ResourceCollector::new(app.clone(), RootFolderResource::new(&app));
        let collection = collect(&collector).await;

        assert!(!collection.is_failure());
        assert!(collection.emissions().is_empty());
    }
}
