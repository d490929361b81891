use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::update::{update_reading, UPDATE_LABELS};
use arrgauge_core::model::Update;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

pub struct UpdateResource {
    available: Arc<MetricDescriptor>,
}

impl UpdateResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            available: descriptor(
                app,
                "",
                "update",
                "Latest release. 1 = Update available, 0 = Installed",
                &UPDATE_LABELS,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for UpdateResource {
    type Payload = Vec<Update>;

    fn name(&self) -> &'static str {
        "update"
    }

    fn subsystem(&self) -> &'static str {
        "update"
    }

    fn path(&self) -> &'static str {
        "update"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.available.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, updates: Vec<Update>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for reading in updates.iter().filter_map(update_reading) {
            collected.push(&self.available, reading)?;
        }
        Ok(collected)
    }
}
