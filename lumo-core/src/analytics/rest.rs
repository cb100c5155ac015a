//! Rest reminder state.
//!
//! Detects whether the user is inside a continuous coding stretch right now
//! and classifies its length against their [`RestPreferences`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use crate::error::{Error, Result};
use crate::types::Session;

/// Sessions separated by at most this many minutes belong to one stretch.
pub const CONTINUOUS_GAP_MINUTES: i64 = 15;

pub(crate) fn continuous_gap() -> Duration {
    Duration::minutes(CONTINUOUS_GAP_MINUTES)
}

/// User-configured rest thresholds, in minutes of continuous coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestPreferences {
    #[serde(default = "default_heads_up_minutes")]
    pub heads_up_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

impl Default for RestPreferences {
    fn default() -> Self {
        Self {
            heads_up_minutes: default_heads_up_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

fn default_heads_up_minutes() -> u32 {
    60
}

fn default_break_minutes() -> u32 {
    120
}

impl RestPreferences {
    /// Both thresholds must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.heads_up_minutes == 0 {
            return Err(Error::Config(
                "rest.heads_up_minutes must be greater than 0".to_string(),
            ));
        }
        if self.break_minutes == 0 {
            return Err(Error::Config(
                "rest.break_minutes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Classification of the current stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestStatus {
    Rested,
    HeadsUp,
    TakeABreak,
}

impl RestStatus {
    /// Get the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            RestStatus::Rested => "Rested",
            RestStatus::HeadsUp => "Heads Up",
            RestStatus::TakeABreak => "Take a Break",
        }
    }

    /// Get the advice shown next to this status.
    pub fn description(&self) -> &'static str {
        match self {
            RestStatus::Rested => "You're fresh! Great time to tackle complex problems.",
            RestStatus::HeadsUp => "You've been coding a while. Consider a short break soon.",
            RestStatus::TakeABreak => {
                "Extended coding session detected. Step away, stretch, and hydrate!"
            }
        }
    }
}

/// Where the user stands in their current stretch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RestState {
    pub continuous_coding_minutes: i64,
    pub status: RestStatus,
    /// Progress towards the break threshold, 0-100
    pub progress_percent: f64,
}

impl RestState {
    /// Not in a stretch.
    pub fn rested() -> Self {
        Self {
            continuous_coding_minutes: 0,
            status: RestStatus::Rested,
            progress_percent: 0.0,
        }
    }
}

/// Compute the rest state at the clock's current instant.
pub fn compute_rest_state(
    sessions: &[Session],
    prefs: &RestPreferences,
    clock: &dyn Clock,
) -> RestState {
    rest_state_at(sessions, prefs, clock.now())
}

fn rest_state_at(sessions: &[Session], prefs: &RestPreferences, now: DateTime<Utc>) -> RestState {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by(|a, b| b.end_time.cmp(&a.end_time));

    let Some(latest) = sorted.first() else {
        return RestState::rested();
    };

    let gap = continuous_gap();
    if now - latest.end_time > gap {
        return RestState::rested();
    }

    // Walk back through earlier sessions while they chain into the stretch
    let mut stretch_start = latest.start_time;
    for session in &sorted[1..] {
        if stretch_start - session.end_time > gap {
            break;
        }
        stretch_start = session.start_time;
    }

    // Sessions stamped after `now` would give a negative stretch
    let minutes = ((now - stretch_start).num_milliseconds() as f64 / 60_000.0).max(0.0);
    let break_minutes = f64::from(prefs.break_minutes);

    let status = if minutes >= break_minutes {
        RestStatus::TakeABreak
    } else if minutes >= f64::from(prefs.heads_up_minutes) {
        RestStatus::HeadsUp
    } else {
        RestStatus::Rested
    };

    RestState {
        continuous_coding_minutes: minutes.round() as i64,
        status,
        progress_percent: (minutes / break_minutes * 100.0).min(100.0),
    }
}
