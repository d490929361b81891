use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::system::{system_status_reading, SYSTEM_STATUS_LABELS};
use arrgauge_core::model::SystemStatus;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

/// Running version of the application as reported by `system/status`.
pub struct SystemStatusResource {
    status: Arc<MetricDescriptor>,
}

impl SystemStatusResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            status: descriptor(
                app,
                "system",
                "status",
                "System status of the application",
                &SYSTEM_STATUS_LABELS,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for SystemStatusResource {
    type Payload = SystemStatus;

    fn name(&self) -> &'static str {
        "status"
    }

    fn subsystem(&self) -> &'static str {
        "system_status"
    }

    fn path(&self) -> &'static str {
        "system/status"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.status.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, status: SystemStatus, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        collected.push(&self.status, system_status_reading(&status))?;
        Ok(collected)
    }
}
