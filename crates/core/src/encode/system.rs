use crate::metrics::Reading;
use crate::model::{HealthMessage, SystemStatus};

pub const SYSTEM_STATUS_LABELS: [&str; 3] = ["version", "branch", "app_data"];

pub const HEALTH_LABELS: [&str; 4] = ["source", "type", "message", "wiki_url"];

/// Always 1; the interesting part is the label set.
pub fn system_status_reading(status: &SystemStatus) -> Reading {
    Reading::new(
        1.0,
        vec![status.version.clone(), status.branch.clone(), status.app_data.clone()],
    )
}

/// One reading per reported health issue, valued 1.
pub fn health_reading(message: &HealthMessage) -> Reading {
    Reading::new(
        1.0,
        vec![
            message.source.clone(),
            message.health_type.clone(),
            message.message.clone(),
            message.wiki_url.clone(),
        ],
    )
}
