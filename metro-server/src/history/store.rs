//! File-backed trip history and statistics.
//!
//! Each user gets a plain-text log (`trip_history_<user>.txt`) and a JSON
//! stats file (`user_stats_<user>.json`) in the data directory. Trips
//! recorded without a user go to `trip_history.txt` and `user_stats.json`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{HistoryError, TravelStats, TripRecord};

const HISTORY_PREFIX: &str = "trip_history";
const STATS_PREFIX: &str = "user_stats";

/// Trim a user name, mapping blank to the shared files.
///
/// Names may only contain ASCII letters, digits, `-` and `_`.
fn normalize_user(user: Option<&str>) -> Result<Option<&str>, HistoryError> {
    let Some(user) = user.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };

    if user
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(Some(user))
    } else {
        Err(HistoryError::InvalidUser(user.to_string()))
    }
}

fn file_name(prefix: &str, user: Option<&str>, extension: &str) -> String {
    match user {
        Some(user) => format!("{prefix}_{user}.{extension}"),
        None => format!("{prefix}.{extension}"),
    }
}

/// Persistent store for trip logs and travel statistics.
///
/// All writes go through one lock, so concurrent requests in the same
/// process never interleave a load-modify-save of the stats file.
#[derive(Debug)]
pub struct TripHistory {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl TripHistory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn history_path(&self, user: Option<&str>) -> Result<PathBuf, HistoryError> {
        let user = normalize_user(user)?;
        Ok(self.dir.join(file_name(HISTORY_PREFIX, user, "txt")))
    }

    pub fn stats_path(&self, user: Option<&str>) -> Result<PathBuf, HistoryError> {
        let user = normalize_user(user)?;
        Ok(self.dir.join(file_name(STATS_PREFIX, user, "json")))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock has nothing to repair.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Append the trip to the user's log and fold it into their stats.
    ///
    /// The existing stats are read before the log is touched, so an
    /// unreadable stats file leaves both files as they were. Returns the
    /// updated stats.
    pub fn record(&self, user: Option<&str>, trip: &TripRecord) -> Result<TravelStats, HistoryError> {
        let history_path = self.history_path(user)?;
        let stats_path = self.stats_path(user)?;

        let _guard = self.guard();
        self.ensure_dir()?;

        let mut stats = load_stats(&stats_path)?;
        stats.record(trip);

        append(&history_path, &trip.to_string())?;
        save_stats(&stats_path, &stats)?;

        debug!(
            path = %history_path.display(),
            route = %trip.route,
            total_trips = stats.total_trips,
            "Recorded trip"
        );

        Ok(stats)
    }

    /// The user's trip log, or `None` if they have no recorded trips.
    pub fn read(&self, user: Option<&str>) -> Result<Option<String>, HistoryError> {
        let path = self.history_path(user)?;
        let _guard = self.guard();
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HistoryError::io(path, e)),
        }
    }

    /// The user's stats; all zero if they have no recorded trips.
    pub fn stats(&self, user: Option<&str>) -> Result<TravelStats, HistoryError> {
        let path = self.stats_path(user)?;
        let _guard = self.guard();
        load_stats(&path)
    }

    fn ensure_dir(&self) -> Result<(), HistoryError> {
        if self.dir.as_os_str().is_empty() || self.dir.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|e| HistoryError::io(&self.dir, e))
    }
}

fn append(path: &Path, text: &str) -> Result<(), HistoryError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| HistoryError::io(path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| HistoryError::io(path, e))
}

fn load_stats(path: &Path) -> Result<TravelStats, HistoryError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(TravelStats::default()),
        Err(e) => return Err(HistoryError::io(path, e)),
    };
    serde_json::from_str(&contents).map_err(|source| HistoryError::MalformedStats {
        path: path.to_path_buf(),
        source,
    })
}

/// Write via a sibling temp file so a crash never leaves half a stats file.
fn save_stats(path: &Path, stats: &TravelStats) -> Result<(), HistoryError> {
    let json = serde_json::to_string_pretty(stats).map_err(|source| HistoryError::MalformedStats {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| HistoryError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| HistoryError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Fare, Route, StationName};
    use crate::history::LastMileLeg;
    use crate::last_mile::{TransportMode, TransportOption};
    use tempfile::tempdir;

    fn trip(names: &[&str]) -> TripRecord {
        let route =
            Route::new(names.iter().map(|s| StationName::parse(s).unwrap()).collect()).unwrap();
        TripRecord::new(route, Fare::new(15.0).unwrap(), None)
    }

    #[test]
    fn file_names() {
        let history = TripHistory::new("/data");
        assert_eq!(
            history.history_path(None).unwrap(),
            Path::new("/data/trip_history.txt")
        );
        assert_eq!(
            history.history_path(Some("  ")).unwrap(),
            Path::new("/data/trip_history.txt")
        );
        assert_eq!(
            history.history_path(Some(" asha ")).unwrap(),
            Path::new("/data/trip_history_asha.txt")
        );
        assert_eq!(
            history.stats_path(Some("asha")).unwrap(),
            Path::new("/data/user_stats_asha.json")
        );
    }

    #[test]
    fn rejects_path_like_users() {
        let history = TripHistory::new("/data");
        for bad in ["../etc", "a/b", "a.b", "a b"] {
            let err = history.history_path(Some(bad)).unwrap_err();
            assert!(err.is_invalid_input(), "{bad} should be rejected");
        }
    }

    #[test]
    fn missing_files() {
        let dir = tempdir().unwrap();
        let history = TripHistory::new(dir.path());
        assert_eq!(history.read(Some("nobody")).unwrap(), None);
        assert_eq!(history.stats(Some("nobody")).unwrap(), TravelStats::default());
    }

    #[test]
    fn record_appends_and_accumulates() {
        let dir = tempdir().unwrap();
        let history = TripHistory::new(dir.path());

        history.record(Some("asha"), &trip(&["A", "B", "C"])).unwrap();
        let stats = history.record(Some("asha"), &trip(&["C", "D"])).unwrap();

        assert_eq!(stats.total_trips, 2);
        assert_eq!(stats.total_km, 4.5);
        assert_eq!(history.stats(Some("asha")).unwrap(), stats);

        let log = history.read(Some("asha")).unwrap().unwrap();
        assert_eq!(log.matches("TRIP DETAILS").count(), 2);
        assert!(log.contains("Via: A -> B -> C"));
        assert!(log.contains("Via: C -> D"));

        // Other users are unaffected.
        assert_eq!(history.read(None).unwrap(), None);
        assert!(!dir.path().join("user_stats_asha.json.tmp").exists());
    }

    #[test]
    fn records_last_mile_block() {
        let dir = tempdir().unwrap();
        let history = TripHistory::new(dir.path());
        let mut record = trip(&["A", "B"]);
        record.last_mile = Some(LastMileLeg {
            destination: "Charminar".into(),
            option: TransportOption::new(TransportMode::Rapido, 3.0, false),
        });

        let stats = history.record(None, &record).unwrap();
        assert_eq!(stats.total_km, 4.5);

        let log = history.read(None).unwrap().unwrap();
        assert!(log.contains("Mode: Rapido Bike"));
    }

    #[test]
    fn creates_data_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        let history = TripHistory::new(&nested);
        history.record(None, &trip(&["A", "B"])).unwrap();
        assert!(nested.join("trip_history.txt").exists());
        assert!(nested.join("user_stats.json").exists());
    }

    #[test]
    fn malformed_stats_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("user_stats.json"), "not json").unwrap();
        let history = TripHistory::new(dir.path());
        assert!(matches!(
            history.stats(None),
            Err(HistoryError::MalformedStats { .. })
        ));
    }

    #[test]
    fn malformed_stats_leaves_history_untouched() {
        let dir = tempdir().unwrap();
        let stats_file = dir.path().join("user_stats.json");
        fs::write(&stats_file, "not json").unwrap();
        let history = TripHistory::new(dir.path());

        let err = history.record(None, &trip(&["A", "B"])).unwrap_err();
        assert!(matches!(err, HistoryError::MalformedStats { .. }));

        assert_eq!(history.read(None).unwrap(), None);
        assert_eq!(fs::read_to_string(&stats_file).unwrap(), "not json");
    }
}
