use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::model::BlockList;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

/// Block list size, read from the total of the first page.
pub struct BlockListResource {
    total: Arc<MetricDescriptor>,
}

impl BlockListResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            total: descriptor(app, "blocklist", "total", "Number of blocked items", &[]),
        }
    }
}

#[async_trait::async_trait]
impl Resource for BlockListResource {
    type Payload = BlockList;

    fn name(&self) -> &'static str {
        "blocklist"
    }

    fn subsystem(&self) -> &'static str {
        "blocklist"
    }

    fn path(&self) -> &'static str {
        "blocklist"
    }

    fn params(&self) -> QueryParams {
        QueryParams::new().with("page", "1")
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, page: BlockList, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        collected.push_scalar(&self.total, page.total_records as f64)?;
        Ok(collected)
    }
}
