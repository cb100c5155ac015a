//! Analytics module for lumo
//!
//! Pure computations that turn backend snapshots into displayed metrics:
//! - Session patterns (hourly distribution, peak hour)
//! - Rest reminder state
//! - Work-health insights
//! - Efficiency scores and the performance radar
//! - Cost insights
//! - Week-over-week deltas
//!
//! Nothing here performs I/O or keeps state between calls. The only
//! time-relative computation, [`compute_rest_state`], reads "now" from a
//! [`Clock`].

pub mod clock;
pub mod cost;
pub mod efficiency;
pub mod health;
pub mod patterns;
pub mod report;
pub mod rest;
pub mod trends;

pub use clock::{Clock, FixedClock, SystemClock};
pub use cost::{compute_cost_insights, CostInsight, MODEL_COST_GAP};
pub use efficiency::{
    compute_efficiency, compute_performance_radar, EfficiencyScores, PerformanceRadar,
};
pub use health::{
    compute_health_insights, compute_health_insights_in, HealthInsight, HealthStats,
    InsightIcon, InsightSeverity,
};
pub use patterns::{
    average_session_minutes, compute_hourly_distribution, compute_hourly_distribution_in,
    compute_session_patterns, compute_session_patterns_in, find_peak_hour, HourlyData,
    SessionPatterns,
};
pub use report::InsightsReport;
pub use rest::{
    compute_rest_state, RestPreferences, RestState, RestStatus, CONTINUOUS_GAP_MINUTES,
};
pub use trends::{
    calc_delta, compute_week_over_week, compute_weekly_delta, estimate_previous_week,
    DeltaFormat, WeekDelta,
};
