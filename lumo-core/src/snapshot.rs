//! Backend data snapshots.
//!
//! A snapshot is the JSON document a backend export delivers for one
//! evaluation: the session list plus per-range stats.
//!
//! ```json
//! {
//!   "exportedAt": 1748872800000,
//!   "sessions": [{ "startTime": 1748865600000, "endTime": 1748869200000, "durationMs": 3300000 }],
//!   "ranges": {
//!     "week":  { "summary": { "totalSessions": 12, "totalCost": 4.2 }, "models": [], "errorRate": null },
//!     "month": { "summary": { "totalSessions": 30, "totalCost": 9.8 } }
//!   }
//! }
//! ```
//!
//! Every record is validated on load; one bad record rejects the snapshot.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::analytics::FixedClock;
use crate::error::{Error, Result};
use crate::types::{
    ErrorRateStats, ModelStats, RawErrorRateStats, RawModelStats, RawSession, RawSummaryStats,
    Session, SummaryStats, TimeRange,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    exported_at: Option<i64>,
    #[serde(default)]
    sessions: Vec<RawSession>,
    #[serde(default)]
    ranges: HashMap<TimeRange, RawRangeStats>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRangeStats {
    #[serde(default)]
    summary: RawSummaryStats,
    #[serde(default)]
    models: Vec<RawModelStats>,
    #[serde(default)]
    error_rate: Option<RawErrorRateStats>,
}

/// Stats the backend computed for one [`TimeRange`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeStats {
    pub summary: SummaryStats,
    pub models: Vec<ModelStats>,
    pub error_rate: Option<ErrorRateStats>,
}

/// Validated backend data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// When the backend produced this snapshot
    pub exported_at: Option<DateTime<Utc>>,
    pub sessions: Vec<Session>,
    pub ranges: HashMap<TimeRange, RangeStats>,
}

impl Snapshot {
    /// Parse and validate a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Snapshot(format!("failed to read snapshot {:?}: {}", path, e))
        })?;
        let snapshot = Self::from_json(&content)?;

        tracing::debug!(
            path = %path.display(),
            sessions = snapshot.sessions.len(),
            ranges = snapshot.ranges.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Stats for `range`, if the backend included them.
    pub fn range(&self, range: TimeRange) -> Option<&RangeStats> {
        self.ranges.get(&range)
    }

    /// A clock frozen at the export instant, so a stale snapshot is judged
    /// as of when it was taken.
    pub fn export_clock(&self) -> Option<FixedClock> {
        self.exported_at.map(FixedClock)
    }

    /// Summary for `range`, or all-zero stats when absent.
    pub fn summary(&self, range: TimeRange) -> SummaryStats {
        self.range(range)
            .map(|r| r.summary.clone())
            .unwrap_or_default()
    }
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = Error;

    fn try_from(raw: RawSnapshot) -> Result<Self> {
        let exported_at = match raw.exported_at {
            Some(ms) => Some(DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| {
                Error::Snapshot(format!("exportedAt {} out of range", ms))
            })?),
            None => None,
        };

        let sessions = raw
            .sessions
            .into_iter()
            .enumerate()
            .map(|(index, session)| {
                Session::try_from(session).map_err(|e| {
                    tracing::warn!(index, error = %e, "Rejecting session record");
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut ranges = HashMap::with_capacity(raw.ranges.len());
        for (range, stats) in raw.ranges {
            let models = stats
                .models
                .into_iter()
                .map(ModelStats::try_from)
                .collect::<Result<Vec<_>>>()?;
            let error_rate = stats.error_rate.map(ErrorRateStats::try_from).transpose()?;

            ranges.insert(
                range,
                RangeStats {
                    summary: SummaryStats::try_from(stats.summary)?,
                    models,
                    error_rate,
                },
            );
        }

        Ok(Snapshot {
            exported_at,
            sessions,
            ranges,
        })
    }
}
