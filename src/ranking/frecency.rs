//! Usage-based ordering for the empty-query view.
//!
//! When the search field is blank the drawer shows recently and frequently
//! launched items instead of a ranked match list. Launches are scored with
//! exponential decay so an app opened many times last month eventually
//! yields to one opened a few times today.
//!
//! ```text
//! score = launch_count × 2^(-age_hours / HALF_LIFE_HOURS)
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Candidate;

/// Age at which a launch count contributes half its weight (one week).
const HALF_LIFE_HOURS: f64 = 168.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Launch statistics for one candidate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub launch_count: u32,
    /// Unix timestamp (seconds) of the most recent launch.
    pub last_launched: i64,
}

/// Calculates the decayed score of one record at time `now`.
///
/// Launches stamped in the future are treated as happening now.
#[must_use]
pub fn calculate_score(record: &UsageRecord, now: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age_hours = (now - record.last_launched).max(0) as f64 / SECONDS_PER_HOUR;
    f64::from(record.launch_count) * f64::exp2(-age_hours / HALF_LIFE_HOURS)
}

/// In-memory launch history keyed by [`Candidate::key`].
///
/// The log is owned by the caller; persisting it is up to the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageLog {
    records: HashMap<String, UsageRecord>,
}

impl UsageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one launch of `key` at `timestamp` (Unix seconds).
    pub fn record_launch(&mut self, key: &str, timestamp: i64) {
        let record = self
            .records
            .entry(key.to_string())
            .or_insert(UsageRecord {
                launch_count: 0,
                last_launched: timestamp,
            });
        record.launch_count = record.launch_count.saturating_add(1);
        record.last_launched = record.last_launched.max(timestamp);
        tracing::debug!(key = %key, launch_count = record.launch_count, "launch recorded");
    }

    /// Records one launch of `key` now.
    pub fn record_launch_now(&mut self, key: &str) {
        self.record_launch(key, chrono::Utc::now().timestamp());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&UsageRecord> {
        self.records.get(key)
    }

    /// Forgets a key, e.g. after the app was uninstalled.
    pub fn forget(&mut self, key: &str) -> bool {
        self.records.remove(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Candidates with launch history, best score first, at most `limit`.
    ///
    /// Never-launched candidates are left out. Equal scores keep input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use launcher_search::ranking::UsageLog;
    ///
    /// let apps = ["Clock", "Maps", "Camera"];
    /// let mut log = UsageLog::new();
    /// log.record_launch("Maps", 1_000);
    /// log.record_launch("Maps", 2_000);
    /// log.record_launch("Camera", 2_000);
    ///
    /// assert_eq!(log.recents(&apps, 5, 2_000), [&"Maps", &"Camera"]);
    /// ```
    pub fn recents<'a, C: Candidate>(&self, candidates: &'a [C], limit: usize, now: i64) -> Vec<&'a C> {
        if limit == 0 || self.records.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &'a C)> = candidates
            .iter()
            .filter_map(|candidate| {
                self.records
                    .get(candidate.key())
                    .map(|record| (calculate_score(record, now), candidate))
            })
            .collect();

        // `sort_by` is stable, so ties keep input order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored.into_iter().map(|(_, candidate)| candidate).collect()
    }
}
