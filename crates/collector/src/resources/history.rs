use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::model::History;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

/// Size of the activity history, read from the total of a single-record page.
pub struct HistoryResource {
    total: Arc<MetricDescriptor>,
}

impl HistoryResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            total: descriptor(app, "history", "total", "Total number of history records", &[]),
        }
    }
}

#[async_trait::async_trait]
impl Resource for HistoryResource {
    type Payload = History;

    fn name(&self) -> &'static str {
        "history"
    }

    fn subsystem(&self) -> &'static str {
        "history"
    }

    fn path(&self) -> &'static str {
        "history"
    }

    fn params(&self) -> QueryParams {
        QueryParams::new().with("page", "1").with("pageSize", "1")
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, history: History, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        collected.push_scalar(&self.total, history.total_records as f64)?;
        Ok(collected)
    }
}
