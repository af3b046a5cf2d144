//! End-to-end aggregation of raw result documents.

use log::{debug, info};
use serde_json::Value;

use super::comparative::{generate_comparative_summary, CohortMeans};
use super::leaders::aggregate_by_audit_leader;
use super::outliers::tag_outliers_and_exceptions;
use super::rule_details::extract_rule_details_summary;
use super::scoring::calculate_weighted_scores;
use crate::config::{ThresholdConfig, WeightsConfig};
use crate::core::{DepartmentSummary, LeaderSummaryRow};
use crate::models::{AnalyticsSummary, SummaryConfig};
use crate::parsing::standardize_all;

/// Department totals from the finished leader table.
///
/// The overall rate divides the summed GC count by the summed total and is
/// `0.0` when nothing was evaluated, even if GC counts were reported. Sums
/// saturate at `u64::MAX`. The averages are the cohort means.
pub fn build_department_summary(
    rows: &[LeaderSummaryRow],
    cohort: &CohortMeans,
) -> DepartmentSummary {
    let sum = |count: fn(&LeaderSummaryRow) -> u64| {
        rows.iter().map(count).fold(0, u64::saturating_add)
    };
    let total_rules = sum(|r| r.total_rules);
    let gc_count = sum(|r| r.gc_count);
    let overall_compliance_rate = if total_rules > 0 {
        gc_count as f64 / total_rules as f64
    } else {
        0.0
    };

    DepartmentSummary {
        total_rules,
        gc_count,
        pc_count: sum(|r| r.pc_count),
        dnc_count: sum(|r| r.dnc_count),
        overall_compliance_rate,
        avg_compliance_rate: cohort.compliance_rate,
        avg_weighted_score: cohort.weighted_score,
    }
}

/// Aggregate a batch of raw result documents into an [`AnalyticsSummary`].
///
/// Runs standardization, leader aggregation, scoring, cohort comparison,
/// outlier tagging and rule detail extraction, then computes the department
/// totals. Missing configuration falls back to the defaults, and the
/// effective configuration is recorded on the summary. Never fails: malformed
/// documents degrade to empty contributions.
///
/// # Examples
///
/// ```
/// use qa_analytics::services::aggregate_analytics_results;
/// use serde_json::json;
///
/// let docs = vec![json!({
///     "analytic_id": "a1",
///     "grouped_summary": {"Leader1": {"total_rules": 5, "GC": 4, "PC": 1, "DNC": 0}}
/// })];
/// let summary = aggregate_analytics_results(&docs, None, None);
///
/// let leader = &summary.leader_summary()[0];
/// assert_eq!(leader.compliance_rate, 0.8);
/// assert_eq!(leader.weighted_score, Some(3.5));
/// ```
pub fn aggregate_analytics_results(
    raw_results: &[Value],
    weights: Option<WeightsConfig>,
    thresholds: Option<ThresholdConfig>,
) -> AnalyticsSummary {
    let standardized = standardize_all(raw_results);
    debug!("Standardized {} result documents", standardized.len());

    let leaders = aggregate_by_audit_leader(&standardized);
    let leaders = calculate_weighted_scores(leaders, weights.as_ref());
    let comparative = generate_comparative_summary(leaders);

    let thresholds = thresholds.unwrap_or_default();
    let leaders = tag_outliers_and_exceptions(comparative.rows, &thresholds);

    let rule_details = extract_rule_details_summary(&standardized);
    let department = build_department_summary(&leaders, &comparative.cohort);

    info!(
        "Aggregated {} results: {} leaders, {} rule rows, overall compliance {:.1}%",
        standardized.len(),
        leaders.len(),
        rule_details.len(),
        department.overall_compliance_rate * 100.0
    );

    AnalyticsSummary::new(
        leaders,
        department,
        rule_details,
        SummaryConfig {
            weights: weights.unwrap_or_default(),
            thresholds,
        },
        None,
    )
}
