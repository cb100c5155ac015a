//! Formatting helpers shared by derived records and the CLI.

/// Format whole minutes as `"45m"`, `"2h"` or `"1h 30m"`.
pub fn format_minutes(min: i64) -> String {
    if min < 60 {
        return format!("{}m", min);
    }
    let hours = min / 60;
    let mins = min % 60;
    if mins > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}h", hours)
    }
}

/// Format seconds as a duration (e.g., "12h 5m").
pub fn format_duration_secs(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Format a USD amount with a fixed number of decimals (e.g., "$0.125").
pub fn format_currency(amount: f64, decimals: usize) -> String {
    format!("${:.*}", decimals, amount)
}

/// Format a percentage change for display (e.g., "+23%" or "-15%").
pub fn format_delta(delta: f64) -> String {
    if delta >= 0.0 {
        format!("+{:.0}%", delta)
    } else {
        format!("{:.0}%", delta)
    }
}

/// Bucket label for an hour of day (e.g., "09:00").
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Get hour range display (e.g., "10am–11am").
pub fn hour_display(hour: u32) -> String {
    let hour = hour % 24;
    let h = hour % 12;
    let h = if h == 0 { 12 } else { h };
    let period = if hour < 12 { "am" } else { "pm" };
    let next_h = (hour + 1) % 12;
    let next_h = if next_h == 0 { 12 } else { next_h };
    let next_period = if (hour + 1) % 24 < 12 { "am" } else { "pm" };
    format!("{}{}–{}{}", h, period, next_h, next_period)
}

/// Format a token count for display (e.g., "14.2M").
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}
