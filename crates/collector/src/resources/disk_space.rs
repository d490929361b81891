use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::model::DiskSpace;
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;

pub struct DiskSpaceResource {
    free: Arc<MetricDescriptor>,
    total: Arc<MetricDescriptor>,
}

impl DiskSpaceResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            free: descriptor(app, "diskspace", "free_bytes", "Free space in bytes", &["path", "label"]),
            total: descriptor(app, "diskspace", "total_bytes", "Total space in bytes", &["path", "label"]),
        }
    }
}

#[async_trait::async_trait]
impl Resource for DiskSpaceResource {
    type Payload = Vec<DiskSpace>;

    fn name(&self) -> &'static str {
        "diskspace"
    }

    fn subsystem(&self) -> &'static str {
        "diskspace"
    }

    fn path(&self) -> &'static str {
        "diskspace"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.free.clone(), self.total.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, disks: Vec<DiskSpace>, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        for disk in disks {
            let labels = vec![disk.path, disk.label];
            collected.push(&self.free, Reading::new(disk.free_space as f64, labels.clone()))?;
            collected.push(&self.total, Reading::new(disk.total_space as f64, labels))?;
        }
        Ok(collected)
    }
}
