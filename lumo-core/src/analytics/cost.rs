//! Cost insights.
//!
//! Values are pre-formatted strings, ready to display as-is.

use serde::Serialize;

use super::efficiency::cost_per_session;
use crate::format::format_currency;
use crate::types::{ModelStats, SummaryStats};

/// Label of the model comparison insight.
pub const MODEL_COST_GAP: &str = "Model Cost Gap";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostInsight {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
}

impl CostInsight {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
            tip: None,
        }
    }
}

/// Unit costs for the window, then a model comparison when one applies.
pub fn compute_cost_insights(stats: &SummaryStats, models: &[ModelStats]) -> Vec<CostInsight> {
    let mut insights = vec![
        CostInsight::new("Cost per Session", format_currency(cost_per_session(stats), 3)),
        CostInsight::new(
            "Cost per 1K Tokens",
            format_currency(stats.total_cost / stats.total_tokens.max(1) as f64 * 1000.0, 4),
        ),
    ];

    if stats.active_time_seconds > 0 {
        let hours = stats.active_time_seconds as f64 / 3600.0;
        insights.push(CostInsight::new(
            "Cost per Hour",
            format_currency(stats.total_cost / hours, 2),
        ));
    }

    if let Some(gap) = model_cost_gap(models) {
        insights.push(gap);
    }

    insights
}

fn model_cost_gap(models: &[ModelStats]) -> Option<CostInsight> {
    if models.len() < 2 {
        return None;
    }

    let mut sorted: Vec<&ModelStats> = models.iter().collect();
    sorted.sort_by(|a, b| b.cost.total_cmp(&a.cost));

    let expensive = sorted.first()?;
    let cheap = sorted.last()?;
    if expensive.cost <= cheap.cost {
        return None;
    }

    Some(CostInsight {
        label: MODEL_COST_GAP.to_string(),
        value: format!("{}: {}", expensive.display_name, format_currency(expensive.cost, 2)),
        tip: Some(format!(
            "{} costs {} - consider using it more for simple tasks",
            cheap.display_name,
            format_currency(cheap.cost, 2)
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, cost: f64) -> ModelStats {
        ModelStats {
            display_name: name.to_string(),
            cost,
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    fn labels(insights: &[CostInsight]) -> Vec<&str> {
        insights.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_empty_stats() {
        let insights = compute_cost_insights(&SummaryStats::default(), &[]);
        assert_eq!(labels(&insights), vec!["Cost per Session", "Cost per 1K Tokens"]);
        assert_eq!(insights[0].value, "$0.000");
        assert_eq!(insights[1].value, "$0.0000");
    }

    #[test]
    fn test_unit_costs() {
        let stats = SummaryStats {
            total_sessions: 4,
            total_cost: 3.0,
            total_tokens: 200_000,
            active_time_seconds: 7200,
            ..Default::default()
        };
        let insights = compute_cost_insights(&stats, &[]);

        assert_eq!(
            labels(&insights),
            vec!["Cost per Session", "Cost per 1K Tokens", "Cost per Hour"]
        );
        assert_eq!(insights[0].value, "$0.750");
        assert_eq!(insights[1].value, "$0.0150");
        assert_eq!(insights[2].value, "$1.50");
        assert!(insights.iter().all(|i| i.tip.is_none()));
    }

    #[test]
    fn test_zero_tokens_divides_by_one() {
        let stats = SummaryStats {
            total_cost: 0.002,
            ..Default::default()
        };
        let insights = compute_cost_insights(&stats, &[]);
        assert_eq!(insights[1].value, "$2.0000");
    }

    #[test]
    fn test_equal_model_costs_emit_no_gap() {
        let models = vec![model("Sonnet", 4.0), model("Haiku", 4.0)];
        let insights = compute_cost_insights(&SummaryStats::default(), &models);
        assert!(!labels(&insights).contains(&MODEL_COST_GAP));
    }

    #[test]
    fn test_single_model_emits_no_gap() {
        let insights = compute_cost_insights(&SummaryStats::default(), &[model("Opus", 9.0)]);
        assert!(!labels(&insights).contains(&MODEL_COST_GAP));
    }

    #[test]
    fn test_two_models_with_different_costs_emit_one_gap() {
        let models = vec![model("Haiku", 0.8), model("Sonnet", 2.5)];
        let insights = compute_cost_insights(&SummaryStats::default(), &models);

        let gaps: Vec<_> = insights.iter().filter(|i| i.label == MODEL_COST_GAP).collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].value, "Sonnet: $2.50");
        assert_eq!(
            gaps[0].tip.as_deref(),
            Some("Haiku costs $0.80 - consider using it more for simple tasks")
        );
    }

    #[test]
    fn test_model_gap_names_pricier_first() {
        let models = vec![model("Haiku", 0.4), model("Opus", 12.5), model("Sonnet", 3.0)];
        let insights = compute_cost_insights(&SummaryStats::default(), &models);

        let gaps: Vec<_> = insights.iter().filter(|i| i.label == MODEL_COST_GAP).collect();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].value, "Opus: $12.50");
        assert_eq!(
            gaps[0].tip.as_deref(),
            Some("Haiku costs $0.40 - consider using it more for simple tasks")
        );
    }
}
