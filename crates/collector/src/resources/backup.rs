use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult};
use arrgauge_core::encode::{backup_age, freshest};
use arrgauge_core::model::Backup;
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;

pub const BACKUP_LABELS: [&str; 3] = ["name", "type", "time"];

/// Backups listed by `system/backup`, with their age and the freshest one.
pub struct BackupResource {
    size: Arc<MetricDescriptor>,
    age: Arc<MetricDescriptor>,
    latest_age: Arc<MetricDescriptor>,
}

impl BackupResource {
    pub fn new(app: &AppDescriptor) -> Self {
        Self {
            size: descriptor(app, "system_backup", "bytes", "Size of each backup in bytes", &BACKUP_LABELS),
            age: descriptor(
                app,
                "system_backup",
                "age_seconds",
                "Seconds since each backup was taken",
                &BACKUP_LABELS,
            ),
            latest_age: descriptor(
                app,
                "system_backup",
                "latest_age_seconds",
                "Seconds since the most recent backup was taken",
                &BACKUP_LABELS,
            ),
        }
    }
}

fn backup_labels(backup: &Backup) -> Vec<String> {
    vec![backup.name.clone(), backup.backup_type.clone(), backup.time.clone()]
}

#[async_trait::async_trait]
impl Resource for BackupResource {
    type Payload = Vec<Backup>;

    fn name(&self) -> &'static str {
        "backup"
    }

    fn subsystem(&self) -> &'static str {
        "system_backup"
    }

    fn path(&self) -> &'static str {
        "system/backup"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        vec![self.size.clone(), self.age.clone(), self.latest_age.clone()]
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<Self::Payload> {
        client.do_request(self.path(), &self.params()).await
    }

    fn encode(&self, backups: Vec<Backup>, ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut collected = Collected::new();
        let mut ages = Vec::with_capacity(backups.len());

        for (idx, backup) in backups.iter().enumerate() {
            let labels = backup_labels(backup);
            collected.push(&self.size, Reading::new(backup.size as f64, labels.clone()))?;

            match backup_age(backup, ctx.now()) {
                Ok(age) => {
                    collected.push(&self.age, Reading::new(age as f64, labels))?;
                    ages.push((idx, age));
                }
                Err(e) => collected.record_error(e),
            }
        }

        if let Some((idx, age)) = freshest(ages) {
            let backup = &backups[idx];
            collected.push(
                &self.latest_age,
                Reading::new(age as f64, backup_labels(backup)),
            )?;
        }

        Ok(collected)
    }
}
