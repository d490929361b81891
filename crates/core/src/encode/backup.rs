use crate::error::EncodeError;
use crate::model::Backup;
use chrono::{DateTime, Utc};

/// Seconds elapsed between the backup's timestamp and `now`.
///
/// Backups stamped in the future yield a negative age.
pub fn backup_age(backup: &Backup, now: DateTime<Utc>) -> Result<i64, EncodeError> {
    let taken = DateTime::parse_from_rfc3339(&backup.time).map_err(|source| EncodeError::TimeParse {
        backup: backup.name.clone(),
        value: backup.time.clone(),
        source,
    })?;

    Ok((now - taken.with_timezone(&Utc)).num_seconds())
}

/// Best-so-far reduction over `(key, age)` pairs.
///
/// Returns the pair with the smallest non-negative age. Negative ages never
/// win, and on a tie the earlier pair is kept.
pub fn freshest<K>(ages: impl IntoIterator<Item = (K, i64)>) -> Option<(K, i64)> {
    let mut best: Option<(K, i64)> = None;

    for (key, age) in ages {
        if age < 0 {
            continue;
        }
        match &best {
            Some((_, best_age)) if *best_age <= age => {}
            _ => best = Some((key, age)),
        }
    }

    best
}
