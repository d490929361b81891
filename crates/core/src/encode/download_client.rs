use crate::metrics::Reading;
use crate::model::DownloadClient;

/// Label names matching [`download_client_reading`].
pub const DOWNLOAD_CLIENT_LABELS: [&str; 6] = [
    "protocol",
    "name",
    "priority",
    "implementation",
    "removeCompletedDownloads",
    "removeFailedDownloads",
];

/// 1 when the client is enabled, 0 otherwise. The removal policies are
/// reported as labels and do not affect the value.
pub fn download_client_reading(client: &DownloadClient) -> Reading {
    let value = if client.enable { 1.0 } else { 0.0 };
    Reading::new(
        value,
        vec![
            client.protocol.clone(),
            client.name.clone(),
            client.priority.to_string(),
            client.implementation.clone(),
            client.remove_completed_downloads.to_string(),
            client.remove_failed_downloads.to_string(),
        ],
    )
}
