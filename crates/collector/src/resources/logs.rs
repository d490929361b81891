use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::model::LogPage;
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;
use tracing::trace;

/// Log levels queried, in request order.
pub const LOG_LEVELS: [&str; 4] = ["info", "warn", "error", "fatal"];

/// Log record counts per level.
///
/// Each level is its own request for a single-record page; only the page's
/// `totalRecords` is read. The first failing level aborts the rest.
pub struct LogsResource {
    total: Arc<MetricDescriptor>,
}

impl LogsResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            total: descriptor(app, "logs", "total", "Total number of log records by level", &["level"]),
        }
    }

    fn level_params(level: &str) -> QueryParams {
        QueryParams::new()
            .with("page", "1")
            .with("pageSize", "1")
            .with("sortKey", "time")
            .with("sortDirection", "descending")
            .with("level", level)
    }
}

#[async_trait::async_trait]
impl Resource for LogsResource {
    type Payload = Vec<(&'static str, LogPage)>;

    fn name(&self) -> &'static str {
        "logs"
    }

    fn subsystem(&self) -> &'static str {
        "logs"
    }

    fn path(&self) -> &'static str {
        "log"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        let mut pages = Vec::with_capacity(LOG_LEVELS.len());
        for level in LOG_LEVELS {
            let page: LogPage = client.do_request(self.path(), &Self::level_params(level)).await?;
            trace!(level, total = page.total_records, "fetched log page");
            pages.push((level, page));
        }
        Ok(pages)
    }

    fn encode(&self, pages: Self::Payload, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for (level, page) in pages {
            collected.push(&self.total, Reading::new(page.total_records as f64, vec![level.to_string()]))?;
        }
        Ok(collected)
    }
}
