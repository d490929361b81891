use crate::metrics::Reading;
use crate::model::Update;

pub const UPDATE_LABELS: [&str; 4] = ["version", "branch", "releaseDate", "hash"];

/// Reading for an update record, or `None` if it is not flagged latest.
///
/// The value is 1 when the latest version is not installed yet.
pub fn update_reading(update: &Update) -> Option<Reading> {
    if !update.latest {
        return None;
    }

    let value = if update.installed { 0.0 } else { 1.0 };
    Some(Reading::new(
        value,
        vec![
            update.version.clone(),
            update.branch.clone(),
            update.release_date.clone(),
            update.hash.clone(),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(latest: bool, installed: bool) -> Update {
        Update {
            version: "4.0.2.1183".to_string(),
            branch: "main".to_string(),
            release_date: "2024-02-20T00:00:00Z".to_string(),
            installed,
            latest,
            hash: "abc123".to_string(),
        }
    }

    #[test]
    fn test_not_latest_is_skipped() {
        assert!(update_reading(&update(false, false)).is_none());
        assert!(update_reading(&update(false, true)).is_none());
    }

    #[test]
    fn test_latest_installed() {
        let readings: Vec<_> = [update(false, false), update(true, true)]
            .iter()
            .filter_map(update_reading)
            .collect();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].value, 0.0);
    }

    #[test]
    fn test_latest_not_installed() {
        let reading = update_reading(&update(true, false)).unwrap();
        assert_eq!(reading.value, 1.0);
        assert_eq!(reading.labels, vec!["4.0.2.1183", "main", "2024-02-20T00:00:00Z", "abc123"]);
    }
}
