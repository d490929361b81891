use crate::model::{Episode, EpisodeFile, Series};
use std::collections::BTreeMap;

/// Percentage at which a series or season counts as fully downloaded.
pub const DOWNLOADED_THRESHOLD: f64 = 100.0;

/// Scalar totals folded over a whole series library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryTotals {
    pub series: u64,
    pub series_downloaded: u64,
    pub series_monitored: u64,
    pub series_unmonitored: u64,
    pub series_file_size: i64,
    pub seasons: i64,
    pub seasons_downloaded: u64,
    pub seasons_monitored: u64,
    pub seasons_unmonitored: u64,
    pub episodes: i64,
    pub episodes_downloaded: i64,
    pub episodes_missing: i64,
    pub episodes_monitored: u64,
    pub episodes_unmonitored: u64,
    /// Episode file count per quality name, sorted by name.
    pub episode_qualities: BTreeMap<String, u64>,
}

impl LibraryTotals {
    /// Fold the per-series statistics of a `series` payload.
    pub fn from_series(series: &[Series]) -> Self {
        let mut totals = Self::default();
        for entry in series {
            totals.add_series(entry);
        }
        totals
    }

    pub fn add_series(&mut self, series: &Series) {
        self.series += 1;
        if series.monitored {
            self.series_monitored += 1;
        } else {
            self.series_unmonitored += 1;
        }

        let stats = &series.statistics;
        if stats.percent_of_episodes >= DOWNLOADED_THRESHOLD {
            self.series_downloaded += 1;
        }
        self.seasons += stats.season_count;
        self.episodes += stats.total_episode_count;
        self.episodes_downloaded += stats.episode_file_count;
        self.series_file_size += stats.size_on_disk;

        for season in &series.seasons {
            if season.monitored {
                self.seasons_monitored += 1;
            } else {
                self.seasons_unmonitored += 1;
            }
            if season.statistics.percent_of_episodes >= DOWNLOADED_THRESHOLD {
                self.seasons_downloaded += 1;
            }
        }
    }

    /// Count files per quality; files without a quality name are skipped.
    pub fn add_episode_files(&mut self, files: &[EpisodeFile]) {
        for file in files {
            let name = &file.quality.quality.name;
            if !name.is_empty() {
                *self.episode_qualities.entry(name.clone()).or_default() += 1;
            }
        }
    }

    pub fn add_episodes(&mut self, episodes: &[Episode]) {
        for episode in episodes {
            if episode.monitored {
                self.episodes_monitored += 1;
            } else {
                self.episodes_unmonitored += 1;
            }
        }
    }
}
