use crate::app::AppFamily;
use crate::model::Indexer;

/// Ordinal status of an indexer.
///
/// The value is a sum, not a bitmask: RSS adds 1, automatic search adds 2 and
/// interactive search adds 3, so all three enabled reports 6. Distinct flag
/// combinations can collide (auto + RSS == interactive); that is kept as is.
///
/// Prowlarr only exposes a single `enable` flag plus capabilities. When the
/// sum is 0 but the indexer is enabled there, the capabilities stand in for
/// the missing flags: 1 for RSS support, 2 + 3 for search support.
pub fn indexer_status(family: AppFamily, indexer: &Indexer) -> u8 {
    let mut status = 0;
    if indexer.enable_rss {
        status += 1;
    }
    if indexer.enable_automatic_search {
        status += 2;
    }
    if indexer.enable_interactive_search {
        status += 3;
    }

    if status == 0 && family == AppFamily::Prowlarr && indexer.enable {
        if indexer.supports_rss {
            status += 1;
        }
        if indexer.supports_search {
            status += 2 + 3;
        }
    }

    status
}
