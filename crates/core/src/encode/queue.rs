use crate::model::QueueRecord;
use std::collections::BTreeMap;

pub const QUEUE_LABELS: [&str; 3] = ["status", "download_status", "download_state"];

/// Grouping key of a queue record: status, tracked download status and
/// tracked download state.
pub type QueueKey = (String, String, String);

/// Count queue records per [`QueueKey`], sorted by key.
pub fn queue_counts<'a>(records: impl IntoIterator<Item = &'a QueueRecord>) -> BTreeMap<QueueKey, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        let key = (
            record.status.clone(),
            record.tracked_download_status.clone(),
            record.tracked_download_state.clone(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
