use super::descriptor;
use crate::collector::Collected;
use crate::context::ScrapeContext;
use crate::error::CollectResult;
use crate::resource::Resource;
use arrgauge_client::{ArrClient, ClientResult, QueryParams};
use arrgauge_core::encode::LibraryTotals;
use arrgauge_core::model::{Episode, EpisodeFile, Series, WantedMissing};
use arrgauge_core::{AppDescriptor, MetricDescriptor, Reading};
use std::sync::Arc;
use tracing::debug;

/// Everything one library scrape fetched.
#[derive(Debug, Default)]
pub struct LibraryPayload {
    pub series: Vec<Series>,
    /// Episode files and episodes per series, only with extra metrics.
    pub details: Vec<(Vec<EpisodeFile>, Vec<Episode>)>,
    pub missing: WantedMissing,
}

struct ExtraDescriptors {
    episodes_monitored: Arc<MetricDescriptor>,
    episodes_unmonitored: Arc<MetricDescriptor>,
    episodes_quality: Arc<MetricDescriptor>,
}

/// Library totals for the series-based apps (Sonarr, Whisparr).
pub struct LibraryResource {
    series: Arc<MetricDescriptor>,
    series_downloaded: Arc<MetricDescriptor>,
    series_monitored: Arc<MetricDescriptor>,
    series_unmonitored: Arc<MetricDescriptor>,
    series_file_size: Arc<MetricDescriptor>,
    seasons: Arc<MetricDescriptor>,
    seasons_downloaded: Arc<MetricDescriptor>,
    seasons_monitored: Arc<MetricDescriptor>,
    seasons_unmonitored: Arc<MetricDescriptor>,
    episodes: Arc<MetricDescriptor>,
    episodes_downloaded: Arc<MetricDescriptor>,
    episodes_missing: Arc<MetricDescriptor>,
    extra: Option<ExtraDescriptors>,
}

impl LibraryResource {
    pub fn new(app: &AppDescriptor) -> Self {
        let scalar = |subsystem: &str, name: &str, help: &str| descriptor(app, subsystem, name, help, &[]);

        let extra = app.extra_metrics.then(|| ExtraDescriptors {
            episodes_monitored: scalar("episodes", "monitored_total", "Total number of monitored episodes"),
            episodes_unmonitored: scalar("episodes", "unmonitored_total", "Total number of unmonitored episodes"),
            episodes_quality: descriptor(
                app,
                "episodes",
                "quality_total",
                "Total number of downloaded episodes by quality",
                &["quality"],
            ),
        });

        Self {
            series: scalar("series", "total", "Total number of series"),
            series_downloaded: scalar("series", "downloaded_total", "Total number of fully downloaded series"),
            series_monitored: scalar("series", "monitored_total", "Total number of monitored series"),
            series_unmonitored: scalar("series", "unmonitored_total", "Total number of unmonitored series"),
            series_file_size: scalar("series", "filesize_bytes", "Total file size of all series in bytes"),
            seasons: scalar("seasons", "total", "Total number of seasons"),
            seasons_downloaded: scalar("seasons", "downloaded_total", "Total number of fully downloaded seasons"),
            seasons_monitored: scalar("seasons", "monitored_total", "Total number of monitored seasons"),
            seasons_unmonitored: scalar("seasons", "unmonitored_total", "Total number of unmonitored seasons"),
            episodes: scalar("episodes", "total", "Total number of episodes"),
            episodes_downloaded: scalar("episodes", "downloaded_total", "Total number of downloaded episodes"),
            episodes_missing: scalar("episodes", "missing_total", "Total number of missing episodes"),
            extra,
        }
    }

    fn missing_params() -> QueryParams {
        QueryParams::new()
            .with("sortKey", "airDateUtc")
            .with("page", "1")
            .with("pageSize", "1")
    }
}

#[async_trait::async_trait]
impl Resource for LibraryResource {
    type Payload = LibraryPayload;

    fn name(&self) -> &'static str {
        "series"
    }

    fn subsystem(&self) -> &'static str {
        "series"
    }

    fn path(&self) -> &'static str {
        "series"
    }

    fn descriptors(&self) -> Vec<Arc<MetricDescriptor>> {
        let mut descriptors = vec![
            self.series.clone(),
            self.series_downloaded.clone(),
            self.series_monitored.clone(),
            self.series_unmonitored.clone(),
            self.series_file_size.clone(),
            self.seasons.clone(),
            self.seasons_downloaded.clone(),
            self.seasons_monitored.clone(),
            self.seasons_unmonitored.clone(),
            self.episodes.clone(),
            self.episodes_downloaded.clone(),
            self.episodes_missing.clone(),
        ];
        if let Some(extra) = &self.extra {
            descriptors.push(extra.episodes_monitored.clone());
            descriptors.push(extra.episodes_unmonitored.clone());
            descriptors.push(extra.episodes_quality.clone());
        }
        descriptors
    }

    async fn fetch(&self, client: &ArrClient, _ctx: &ScrapeContext) -> ClientResult<LibraryPayload> {
        let series: Vec<Series> = client.do_request(self.path(), &QueryParams::new()).await?;

        let mut details = Vec::new();
        if self.extra.is_some() {
            details.reserve(series.len());
            for entry in &series {
                let by_series = QueryParams::new().with("seriesId", entry.id.to_string());
                let files: Vec<EpisodeFile> = client.do_request("episodefile", &by_series).await?;
                let episodes: Vec<Episode> = client.do_request("episode", &by_series).await?;
                details.push((files, episodes));
            }
            debug!(series = series.len(), "fetched episode details");
        }

        let missing: WantedMissing = client.do_request("wanted/missing", &Self::missing_params()).await?;

        Ok(LibraryPayload {
            series,
            details,
            missing,
        })
    }

    fn encode(&self, payload: LibraryPayload, _ctx: &ScrapeContext) -> CollectResult<Collected> {
        let mut totals = LibraryTotals::from_series(&payload.series);
        for (files, episodes) in &payload.details {
            totals.add_episode_files(files);
            totals.add_episodes(episodes);
        }
        totals.episodes_missing = payload.missing.total_records;

        let mut collected = Collected::new();
        collected.push_scalar(&self.series, totals.series as f64)?;
        collected.push_scalar(&self.series_downloaded, totals.series_downloaded as f64)?;
        collected.push_scalar(&self.series_monitored, totals.series_monitored as f64)?;
        collected.push_scalar(&self.series_unmonitored, totals.series_unmonitored as f64)?;
        collected.push_scalar(&self.series_file_size, totals.series_file_size as f64)?;
        collected.push_scalar(&self.seasons, totals.seasons as f64)?;
        collected.push_scalar(&self.seasons_downloaded, totals.seasons_downloaded as f64)?;
        collected.push_scalar(&self.seasons_monitored, totals.seasons_monitored as f64)?;
        collected.push_scalar(&self.seasons_unmonitored, totals.seasons_unmonitored as f64)?;
        collected.push_scalar(&self.episodes, totals.episodes as f64)?;
        collected.push_scalar(&self.episodes_downloaded, totals.episodes_downloaded as f64)?;
        collected.push_scalar(&self.episodes_missing, totals.episodes_missing as f64)?;

        if let Some(extra) = &self.extra {
            collected.push_scalar(&extra.episodes_monitored, totals.episodes_monitored as f64)?;
            collected.push_scalar(&extra.episodes_unmonitored, totals.episodes_unmonitored as f64)?;
            for (quality, count) in &totals.episode_qualities {
                collected.push(&extra.episodes_quality, Reading::new(*count as f64, vec![quality.clone()]))?;
            }
        }

        Ok(collected)
    }
}
