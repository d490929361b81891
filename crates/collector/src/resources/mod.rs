//! The per-resource table.
//!
//! Every resource is a small [`Resource`](crate::resource::Resource)
//! implementation wrapped in the generic
//! [`ResourceCollector`](crate::resource::ResourceCollector); only the path,
//! payload shape and encoder differ.

pub mod backup;
pub mod block_list;
pub mod disk_space;
pub mod download_client;
pub mod health;
pub mod history;
pub mod indexer;
pub mod library;
pub mod logs;
pub mod queue;
pub mod root_folder;
pub mod system_status;
pub mod update;

use crate::collector::Collector;
use crate::resource::ResourceCollector;
use arrgauge_core::{fq_name, AppDescriptor, AppFamily, MetricDescriptor};
use std::sync::Arc;

pub use backup::BackupResource;
pub use block_list::BlockListResource;
pub use disk_space::DiskSpaceResource;
pub use download_client::DownloadClientResource;
pub use health::HealthResource;
pub use history::HistoryResource;
pub use indexer::IndexerResource;
pub use library::LibraryResource;
pub use logs::{LogsResource, LOG_LEVELS};
pub use queue::{QueueResource, QUEUE_PAGE_SIZE};
pub use root_folder::RootFolderResource;
pub use system_status::SystemStatusResource;
pub use update::UpdateResource;

/// Build a descriptor in the app's namespace with the `url` const label.
pub(crate) fn descriptor(
    app: &AppDescriptor,
    subsystem: &str,
    name: &str,
    help: &str,
    labels: &[&str],
) -> Arc<MetricDescriptor> {
    Arc::new(
        MetricDescriptor::new(fq_name(app.namespace(), subsystem, name), help, labels)
            .with_const_label("url", app.base_url.clone()),
    )
}

fn boxed<R: crate::resource::Resource>(app: &Arc<AppDescriptor>, resource: R) -> Arc<dyn Collector> {
    Arc::new(ResourceCollector::new(app.clone(), resource))
}

/// All collectors that apply to the app's family.
///
/// Bazarr and SABnzbd expose none of these resources and get an empty list.
pub fn collectors_for(app: &Arc<AppDescriptor>) -> Vec<Arc<dyn Collector>> {
    use AppFamily::*;

    match app.family {
        Sonarr | Radarr | Lidarr | Readarr | Whisparr => {
            let mut collectors = vec![
                boxed(app, BackupResource::new(app)),
                boxed(app, SystemStatusResource::new(app)),
                boxed(app, HealthResource::new(app)),
                boxed(app, DiskSpaceResource::new(app)),
                boxed(app, RootFolderResource::new(app)),
                boxed(app, BlockListResource::new(app)),
                boxed(app, DownloadClientResource::new(app)),
                boxed(app, IndexerResource::new(app)),
                boxed(app, LogsResource::new(app)),
                boxed(app, QueueResource::new(app)),
                boxed(app, HistoryResource::new(app)),
                boxed(app, UpdateResource::new(app)),
            ];
            if matches!(app.family, Sonarr | Whisparr) {
                collectors.push(boxed(app, LibraryResource::new(app)));
            }
            collectors
        }
        Prowlarr => vec![
            boxed(app, BackupResource::new(app)),
            boxed(app, SystemStatusResource::new(app)),
            boxed(app, HealthResource::new(app)),
            boxed(app, DownloadClientResource::new(app)),
            boxed(app, IndexerResource::new(app)),
            boxed(app, LogsResource::new(app)),
            boxed(app, HistoryResource::new(app)),
            boxed(app, UpdateResource::new(app)),
        ],
        Bazarr | Sabnzbd => Vec::new(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::collections::HashSet;

    fn names(app: &Arc<AppDescriptor>) -> Vec<String> {
        collectors_for(app).iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_sonarr_gets_library_collector() {
        let names = names(&app(AppFamily::Sonarr, "http://sonarr:8989"));
        assert_eq!(names.len(), 13);
        assert!(names.contains(&"series".to_string()));
        assert!(names.contains(&"queue".to_string()));
    }

    #[test]
    fn test_radarr_has_no_library_collector() {
        let names = names(&app(AppFamily::Radarr, "http://radarr:7878"));
        assert_eq!(names.len(), 12);
        assert!(!names.contains(&"series".to_string()));
    }

    #[test]
    fn test_prowlarr_collectors() {
        let names = names(&app(AppFamily::Prowlarr, "http://prowlarr:9696"));
        assert_eq!(
            names,
            vec!["backup", "status", "health", "downloadclient", "indexer", "logs", "history", "update"]
        );
    }

    #[test]
    fn test_unversioned_families_have_no_collectors() {
        assert!(collectors_for(&app(AppFamily::Bazarr, "http://bazarr:6767")).is_empty());
        assert!(collectors_for(&app(AppFamily::Sabnzbd, "http://sabnzbd:8080")).is_empty());
    }

    #[test]
    fn test_describe_ends_with_unique_error_descriptor() {
        let app = app(AppFamily::Whisparr, "http://whisparr:6969");
        let mut error_names = HashSet::new();

        for collector in collectors_for(&app) {
            let descriptors = collector.describe();
            let last = descriptors.last().unwrap();
            assert_eq!(last, collector.error_descriptor());
            assert!(last.fq_name.ends_with("_collector_error"));
            assert!(last.fq_name.starts_with("whisparr_"));
            assert!(error_names.insert(last.fq_name.clone()), "duplicate {}", last.fq_name);

            for desc in &descriptors {
                assert!(desc.const_labels.contains(&("url".to_string(), "http://whisparr:6969".to_string())));
            }
        }
    }
}
