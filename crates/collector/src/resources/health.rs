use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::system::{health_reading, HEALTH_LABELS};
use arrgauge_core::model::HealthMessage;
use arrgauge_core::{AppDescriptor, MetricDescriptor};
use std::sync::Arc;

/// Health checks currently failing, one sample per message.
pub struct HealthResource {
    issues: Arc<MetricDescriptor>,
}

impl HealthResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            issues: descriptor(
                app,
                "system_health",
                "issues",
                "Health issues reported by the application",
                &HEALTH_LABELS,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Resource for HealthResource {
    type Payload = Vec<HealthMessage>;

    fn name(&self) -> &'static str {
        "health"
    }

    fn subsystem(&self) -> &'static str {
        "system_health"
    }

    fn path(&self) -> &'static str {
        "health"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.issues.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, messages: Vec<HealthMessage>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for message in &messages {
            collected.push(&self.issues, health_reading(message))?;
        }
        Ok(collected)
    }
}
