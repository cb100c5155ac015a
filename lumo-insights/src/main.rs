//! lumo-insights - usage health, cost and efficiency report
//!
//! Reads a backend snapshot and prints rest state, work-health insights,
//! session patterns, efficiency and cost figures.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use lumo_core::analytics::{
    Clock, FixedClock, InsightSeverity, InsightsReport, RestPreferences, SystemClock,
};
use lumo_core::format::{
    format_currency, format_delta, format_minutes, format_tokens, hour_display,
};
use lumo_core::{Config, Snapshot, TimeRange};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lumo-insights")]
#[command(about = "Lumo Insights - rest, health, cost and efficiency from a usage snapshot")]
#[command(version)]
#[command(after_help = log_location_help())]
struct Args {
    /// Snapshot JSON exported by the backend
    #[arg(long)]
    snapshot: PathBuf,

    /// Time range for cost and efficiency figures (today, week, month, all)
    #[arg(long)]
    range: Option<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Evaluate rest state at this instant (RFC 3339); defaults to the
    /// snapshot's export time, then the system clock
    #[arg(long)]
    now: Option<String>,

    /// Minutes of continuous coding before a heads-up
    #[arg(long)]
    heads_up: Option<u32>,

    /// Minutes of continuous coding before a break is due
    #[arg(long)]
    break_after: Option<u32>,

    /// Store the given thresholds in the config file
    #[arg(long)]
    save_preferences: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = lumo_core::logging::init(&config.logging).ok();

    let range = match args.range.as_deref() {
        Some(s) => s.parse::<TimeRange>().map_err(anyhow::Error::msg)?,
        None => config.analytics.default_range,
    };

    let prefs = resolve_preferences(&args, &config)?;
    if args.save_preferences {
        let path = Config::config_path();
        Config::save_rest_preferences(&path, &prefs)
            .with_context(|| format!("failed to save preferences to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Rest preferences saved");
    }

    let snapshot = Snapshot::load(&args.snapshot)
        .with_context(|| format!("failed to load snapshot {}", args.snapshot.display()))?;

    let clock: Box<dyn Clock> = match (&args.now, snapshot.export_clock()) {
        (Some(s), _) => {
            let instant = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("Invalid --now value: {}", s))?
                .with_timezone(&Utc);
            Box::new(FixedClock(instant))
        }
        (None, Some(exported)) => Box::new(exported),
        (None, None) => Box::new(SystemClock),
    };
    tracing::debug!(now = %clock.now(), "Evaluating snapshot");

    let report = InsightsReport::build(&snapshot, range, &prefs, clock.as_ref());

    match args.export.as_deref() {
        Some("json") => print_json(&report)?,
        Some("md") => print_markdown(&report),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None => print_terminal(&report),
    }

    Ok(())
}

fn log_location_help() -> String {
    format!(
        "Logs are written to {} (rotated daily)",
        Config::log_path().display()
    )
}

/// Config thresholds with command-line overrides applied.
fn resolve_preferences(args: &Args, config: &Config) -> Result<RestPreferences> {
    let mut prefs = config.rest_preferences();
    if let Some(minutes) = args.heads_up {
        prefs.heads_up_minutes = minutes;
    }
    if let Some(minutes) = args.break_after {
        prefs.break_minutes = minutes;
    }
    prefs.validate().context("invalid rest thresholds")?;
    Ok(prefs)
}

fn severity_marker(severity: InsightSeverity) -> &'static str {
    match severity {
        InsightSeverity::Warning => "!",
        InsightSeverity::Info => "i",
        InsightSeverity::Success => "+",
    }
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn print_terminal(report: &InsightsReport) {
    let title = format!("LUMO INSIGHTS: {}", report.range.display_name());

    // Header
    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    // Rest
    println!("REST");
    println!(
        "   Status:   {} ({} continuous)",
        report.rest.status.label(),
        format_minutes(report.rest.continuous_coding_minutes)
    );
    println!(
        "   Progress: {} {:.0}% of {}m",
        progress_bar(report.rest.progress_percent, 30),
        report.rest.progress_percent,
        report.rest_preferences.break_minutes
    );
    println!("   {}", report.rest.status.description());
    println!();

    // Health
    println!("HEALTH");
    match report.health.latest_work_hour {
        Some(hour) => println!("   Latest hour:  {}:00", hour),
        None => println!("   Latest hour:  -"),
    }
    println!(
        "   Longest run:  {}",
        format_minutes(report.health.longest_continuous_min)
    );
    for insight in &report.health.insights {
        println!(
            "   [{}] {}: {}",
            severity_marker(insight.severity),
            insight.title,
            insight.detail
        );
    }
    println!();

    // Patterns
    println!("SESSION PATTERNS");
    if report.patterns.total_sessions == 0 {
        println!("   No sessions found.");
    } else {
        println!(
            "   Sessions:     {:<12} Avg length: {}",
            report.patterns.total_sessions,
            format_minutes(report.patterns.avg_duration_min.round() as i64)
        );
        println!("   Peak hour:    {}", hour_display(report.patterns.peak_hour));
    }
    println!();

    // Efficiency
    println!("EFFICIENCY");
    println!(
        "   Cache rate:   {:<12.1} Edit accept: {:.1}%",
        report.efficiency.cache_rate, report.efficiency.edit_accept_rate
    );
    for (name, score) in report.radar.dimensions() {
        println!("   {:<16} {} {:>3.0}", name, progress_bar(score, 20), score);
    }
    println!();

    // Costs
    println!("COSTS");
    for insight in &report.cost_insights {
        println!("   {:<20} {}", insight.label, insight.value);
        if let Some(tip) = &insight.tip {
            println!("   {:<20} {}", "", tip);
        }
    }
    println!();

    // Models
    if !report.models.is_empty() {
        println!("MODELS");
        for model in &report.models {
            println!(
                "   {:<20} {:>10}  {} tokens",
                model.display_name,
                format_currency(model.cost, 2),
                format_tokens(model.total_tokens())
            );
        }
        println!();
    }

    // Weekly
    if let Some(weekly) = &report.weekly {
        println!("VS PREVIOUS WEEK");
        for delta in weekly {
            println!(
                "   {:<12} {:>10}  {}",
                delta.label,
                delta.current_display(),
                format_delta(delta.change_percent)
            );
        }
        println!();
    }
}

fn print_markdown(report: &InsightsReport) {
    println!("# Lumo Insights: {}", report.range.display_name());
    println!();

    println!("## Rest");
    println!();
    println!(
        "**{}** - {} of continuous coding ({:.0}% of the {}m break threshold)",
        report.rest.status.label(),
        format_minutes(report.rest.continuous_coding_minutes),
        report.rest.progress_percent,
        report.rest_preferences.break_minutes
    );
    println!();

    println!("## Health");
    println!();
    if report.health.insights.is_empty() {
        println!("*No sessions to analyze.*");
    }
    for insight in &report.health.insights {
        println!("- **{}**: {}", insight.title, insight.detail);
    }
    println!();

    println!("## Session Patterns");
    println!();
    println!("- **Sessions:** {}", report.patterns.total_sessions);
    println!(
        "- **Average length:** {}",
        format_minutes(report.patterns.avg_duration_min.round() as i64)
    );
    println!("- **Peak hour:** {}", hour_display(report.patterns.peak_hour));
    println!();

    println!("## Efficiency");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Cache Rate | {:.1}% |", report.efficiency.cache_rate);
    println!(
        "| Cost per Session | ${:.3} |",
        report.efficiency.cost_per_session
    );
    println!("| Edit Accept Rate | {:.1}% |", report.efficiency.edit_accept_rate);
    for (name, score) in report.radar.dimensions() {
        println!("| {} (radar) | {:.0} |", name, score);
    }
    println!();

    println!("## Costs");
    println!();
    for insight in &report.cost_insights {
        match &insight.tip {
            Some(tip) => println!("- **{}:** {} *({})*", insight.label, insight.value, tip),
            None => println!("- **{}:** {}", insight.label, insight.value),
        }
    }
    println!();

    if !report.models.is_empty() {
        println!("## Models");
        println!();
        println!("| Model | Cost | Tokens |");
        println!("|-------|------|--------|");
        for model in &report.models {
            println!(
                "| {} | {} | {} |",
                model.display_name,
                format_currency(model.cost, 2),
                format_tokens(model.total_tokens())
            );
        }
        println!();
    }

    if let Some(weekly) = &report.weekly {
        println!("## Vs Previous Week");
        println!();
        println!("| Metric | This Week | Change |");
        println!("|--------|-----------|--------|");
        for delta in weekly {
            println!(
                "| {} | {} | {} |",
                delta.label,
                delta.current_display(),
                format_delta(delta.change_percent)
            );
        }
        println!();
    }

    println!("---");
    println!("*Generated by lumo-insights*");
}

fn print_json(report: &InsightsReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
