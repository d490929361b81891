//! JSON shapes returned by the monitored applications.
//!
//! Only the fields the collectors read are declared; anything else in the
//! payload is ignored and missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Entry of `system/backup`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Backup {
    pub id: i64,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub backup_type: String,
    pub size: i64,
    pub time: String,
}

/// Entry of `diskspace`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiskSpace {
    pub path: String,
    pub label: String,
    pub free_space: i64,
    pub total_space: i64,
}

/// Entry of `rootfolder`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RootFolder {
    pub path: String,
    pub free_space: i64,
    pub total_space: i64,
}

/// First page of `blocklist`; items are not read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockList {
    pub total_records: i64,
}

/// Entry of `downloadclient`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DownloadClient {
    pub name: String,
    pub protocol: String,
    pub enable: bool,
    pub priority: i64,
    pub remove_completed_downloads: bool,
    pub remove_failed_downloads: bool,
    pub implementation: String,
}

/// Entry of `indexer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Indexer {
    pub name: String,
    pub enable: bool,
    pub enable_rss: bool,
    pub enable_automatic_search: bool,
    pub enable_interactive_search: bool,
    pub supports_rss: bool,
    pub supports_search: bool,
    pub protocol: String,
    pub implementation: String,
    pub priority: i64,
}

/// One page of `log`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogPage {
    pub total_records: i64,
    pub records: Vec<LogRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogRecord {
    pub level: String,
    pub message: String,
    pub time: String,
    pub logger: String,
}

/// Entry of `update`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Update {
    pub version: String,
    pub branch: String,
    pub release_date: String,
    pub installed: bool,
    pub latest: bool,
    pub hash: String,
}

/// Entry of `series`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub monitored: bool,
    pub seasons: Vec<Season>,
    pub statistics: SeriesStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesStatistics {
    pub season_count: i64,
    pub episode_file_count: i64,
    pub episode_count: i64,
    pub total_episode_count: i64,
    pub size_on_disk: i64,
    pub percent_of_episodes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Season {
    pub season_number: i64,
    pub monitored: bool,
    pub statistics: SeasonStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeasonStatistics {
    pub episode_file_count: i64,
    pub episode_count: i64,
    pub total_episode_count: i64,
    pub size_on_disk: i64,
    pub percent_of_episodes: f64,
}

/// Entry of `episodefile?seriesId=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeFile {
    pub id: i64,
    pub size: i64,
    pub quality: EpisodeQuality,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeQuality {
    pub quality: QualityDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityDefinition {
    pub id: i64,
    pub name: String,
}

/// Entry of `episode?seriesId=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Episode {
    pub id: i64,
    pub monitored: bool,
    pub has_file: bool,
}

/// First page of `wanted/missing`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WantedMissing {
    pub total_records: i64,
}

/// `system/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemStatus {
    pub app_name: String,
    pub version: String,
    pub branch: String,
    pub app_data: String,
}

/// Entry of `health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HealthMessage {
    pub source: String,
    #[serde(rename = "type")]
    pub health_type: String,
    pub message: String,
    pub wiki_url: String,
}

/// One page of `queue`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueuePage {
    pub page: i64,
    pub page_size: i64,
    pub total_records: i64,
    pub records: Vec<QueueRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueRecord {
    pub title: String,
    pub size: f64,
    pub status: String,
    pub tracked_download_status: String,
    pub tracked_download_state: String,
    pub error_message: String,
}

/// First page of `history`; items are not read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct History {
    pub total_records: i64,
}
