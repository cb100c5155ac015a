//! Integration tests for snapshot loading and report generation
//!
//! These tests use `tests/fixtures/snapshot.json`, a backend export taken at
//! 2025-06-02 16:00 UTC, to verify the end-to-end flow from JSON to derived
//! metrics.

use chrono::{TimeZone, Utc};
use lumo_core::analytics::{
    FixedClock, InsightSeverity, InsightsReport, RestPreferences, RestStatus, MODEL_COST_GAP,
};
use lumo_core::{Config, Error, Snapshot, TimeRange};
use std::path::PathBuf;
use tempfile::TempDir;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture() -> Snapshot {
    Snapshot::load(&fixture_path("snapshot.json")).expect("fixture should load")
}

fn fixture_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2025, 6, 2, 16, 0, 0).unwrap())
}

fn build(range: TimeRange, prefs: RestPreferences) -> InsightsReport {
    lumo_core::logging::init_test();
    InsightsReport::build_in(&load_fixture(), range, &prefs, &fixture_clock(), &Utc)
}

// ============================================
// Snapshot loading
// ============================================

#[test]
fn test_load_fixture_snapshot() {
    let snapshot = load_fixture();

    assert_eq!(snapshot.sessions.len(), 4);
    assert_eq!(snapshot.exported_at, Some(fixture_clock().0));
    assert_eq!(snapshot.ranges.len(), 3);
    assert!(snapshot.range(TimeRange::All).is_none());

    let week = snapshot.range(TimeRange::Week).unwrap();
    assert_eq!(week.models.len(), 3);
    assert_eq!(week.summary.total_tools, 310);
}

#[test]
fn test_rejects_snapshot_with_bad_cache_percentage() {
    let json = r#"{"ranges": {"week": {"summary": {"cachePercentage": 140}}}}"#;
    let err = Snapshot::from_json(json).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord { .. }));
    assert!(err.to_string().contains("cachePercentage"));
}

// ============================================
// Report
// ============================================

#[test]
fn test_rest_state_from_fixture() {
    // 14:50-15:20 and 15:30-15:55 chain into a 70-minute stretch
    let report = build(TimeRange::Week, RestPreferences::default());

    assert_eq!(report.rest.status, RestStatus::HeadsUp);
    assert_eq!(report.rest.continuous_coding_minutes, 70);
    assert!((report.rest.progress_percent - 58.33).abs() < 0.01);
}

#[test]
fn test_rest_state_respects_preferences() {
    let prefs = RestPreferences {
        heads_up_minutes: 30,
        break_minutes: 60,
    };
    let report = build(TimeRange::Week, prefs);

    assert_eq!(report.rest.status, RestStatus::TakeABreak);
    assert_eq!(report.rest.progress_percent, 100.0);
    assert_eq!(report.rest_preferences, prefs);
}

#[test]
fn test_health_from_fixture() {
    let report = build(TimeRange::Week, RestPreferences::default());
    let health = &report.health;

    assert_eq!(health.latest_work_hour, Some(23));
    assert_eq!(health.longest_continuous_min, 130);

    let titles: Vec<_> = health.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Night owl detected", "Long stretch"]);
    assert_eq!(health.insights[0].severity, InsightSeverity::Warning);
    assert!(health.insights[1].detail.contains("2h 10m"));
}

#[test]
fn test_patterns_from_fixture() {
    let report = build(TimeRange::Week, RestPreferences::default());
    let patterns = &report.patterns;

    assert_eq!(patterns.total_sessions, 4);
    let total: u64 = patterns.hourly.iter().map(|h| h.session_count).sum();
    assert_eq!(total, 4);
    // Hours 9, 14, 15 and 21 have one session each
    assert_eq!(patterns.peak_hour, 9);
    assert_eq!(patterns.hourly[21].total_duration_min, 130.0);
    assert_eq!(patterns.avg_duration_min, 56.25);
}

#[test]
fn test_week_efficiency_and_costs() {
    let report = build(TimeRange::Week, RestPreferences::default());

    assert_eq!(report.efficiency.cache_rate, 68.5);
    assert_eq!(report.efficiency.cost_per_session, 0.5);
    assert_eq!(report.efficiency.edit_accept_rate, 90.0);

    assert!((report.radar.reliability - 98.0).abs() < 1e-9);
    assert_eq!(report.radar.activity, 20.0);
    assert_eq!(report.radar.output, 100.0);

    let values: Vec<_> = report
        .cost_insights
        .iter()
        .map(|i| (i.label.as_str(), i.value.as_str()))
        .collect();
    assert_eq!(
        values,
        vec![
            ("Cost per Session", "$0.500"),
            ("Cost per 1K Tokens", "$0.0150"),
            ("Cost per Hour", "$0.60"),
            (MODEL_COST_GAP, "Opus 4.5: $4.50"),
        ]
    );
    assert!(report.cost_insights[3]
        .tip
        .as_deref()
        .unwrap()
        .starts_with("Haiku 3.5 costs $0.30"));
}

#[test]
fn test_weekly_deltas_from_fixture() {
    let report = build(TimeRange::Today, RestPreferences::default());
    let weekly = report.weekly.expect("week and month are both in the fixture");

    // Previous week estimated as month - week: 8 sessions, $4.00, 5h
    assert_eq!(weekly[0].previous, 8.0);
    assert_eq!(weekly[0].change_percent, 50.0);
    assert_eq!(weekly[1].previous, 4.0);
    assert_eq!(weekly[1].change_percent, 50.0);
    assert_eq!(weekly[2].previous, 18_000.0);
    assert_eq!(weekly[2].change_percent, 100.0);
    assert_eq!(weekly[2].current_display(), "10h 0m");
}

#[test]
fn test_missing_range_falls_back_to_empty_stats() {
    let report = build(TimeRange::All, RestPreferences::default());
    assert_eq!(report.efficiency.cost_per_session, 0.0);
    assert_eq!(report.cost_insights.len(), 2);
}

#[test]
fn test_report_serializes_with_closed_enums() {
    let report = build(TimeRange::Week, RestPreferences::default());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["range"], "week");
    assert_eq!(json["rest"]["status"], "heads-up");
    assert_eq!(json["health"]["insights"][0]["severity"], "warning");
    assert_eq!(json["health"]["insights"][0]["icon"], "moon");
    assert_eq!(json["weekly"][1]["format"], "currency");
    assert_eq!(json["patterns"]["hourly"].as_array().unwrap().len(), 24);
}

// ============================================
// Preferences persistence
// ============================================

#[test]
fn test_saved_preferences_drive_the_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let prefs = RestPreferences {
        heads_up_minutes: 90,
        break_minutes: 140,
    };
    Config::save_rest_preferences(&path, &prefs).unwrap();

    let config = Config::load_from(&path).unwrap();
    let report = build(TimeRange::Week, config.rest_preferences());

    assert_eq!(report.rest.status, RestStatus::Rested);
    assert_eq!(report.rest.continuous_coding_minutes, 70);
    assert!((report.rest.progress_percent - 50.0).abs() < 1e-9);
}
