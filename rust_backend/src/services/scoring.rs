//! Compliance-rate scoring.
//!
//! A compliance rate maps onto a 1.0–5.0 score through fixed breakpoints, and
//! the score maps onto a [`Rating`] label.

use log::debug;

use crate::config::WeightsConfig;
use crate::core::{LeaderSummaryRow, Rating, RuleDetailRow};

/// `(minimum rate, score)` pairs, highest first.
const SCORE_BREAKPOINTS: [(f64, f64); 8] = [
    (0.95, 5.0),
    (0.90, 4.5),
    (0.85, 4.0),
    (0.80, 3.5),
    (0.75, 3.0),
    (0.70, 2.5),
    (0.60, 2.0),
    (0.50, 1.5),
];

/// Lowest possible score.
pub const MIN_SCORE: f64 = 1.0;

/// Map a compliance rate onto the 1.0–5.0 score scale.
///
/// ```
/// use qa_analytics::services::scoring::map_to_score;
///
/// assert_eq!(map_to_score(1.0), 5.0);
/// assert_eq!(map_to_score(0.8), 3.5);
/// assert_eq!(map_to_score(0.49), 1.0);
/// ```
pub fn map_to_score(rate: f64) -> f64 {
    SCORE_BREAKPOINTS
        .iter()
        .find(|(min_rate, _)| rate >= *min_rate)
        .map(|(_, score)| *score)
        .unwrap_or(MIN_SCORE)
}

/// Attach the weighted score and rating to every leader row.
///
/// The manual-override columns are reset to empty so reviewers can fill them
/// in downstream. `weights` does not affect the result: the leader-level
/// score derives from the compliance rate alone. See
/// [`calculate_rule_weighted_score`] for the per-rule weighted variant.
pub fn calculate_weighted_scores(
    mut rows: Vec<LeaderSummaryRow>,
    weights: Option<&WeightsConfig>,
) -> Vec<LeaderSummaryRow> {
    if weights.is_some() {
        debug!("Leader table scores use compliance rate only; rule weights are not applied");
    }

    for row in &mut rows {
        let score = map_to_score(row.compliance_rate);
        row.weighted_score = Some(score);
        row.rating = Some(Rating::from_score(score));
        row.override_score = None;
        row.override_rating = String::new();
        row.comments = String::new();
    }
    rows
}

/// Weighted score of one leader across the rules in a detail table.
///
/// Each of the leader's rule rows contributes `map_to_score(rate)` weighted by
/// [`WeightsConfig::weight_for_rule`]. The weighted mean is rounded to the
/// nearest half point (ties to even). A leader with no weighted rules scores
/// [`MIN_SCORE`].
///
/// ```
/// use qa_analytics::config::WeightsConfig;
/// use qa_analytics::core::{ComplianceStatus, RuleDetailRow};
/// use qa_analytics::services::scoring::calculate_rule_weighted_score;
///
/// let row = |rule: &str, rate: f64, severity: &str| RuleDetailRow {
///     rule_id: rule.into(),
///     rule_name: rule.into(),
///     audit_leader: Some("A".into()),
///     total_items: 10,
///     gc_count: (rate * 10.0) as u64,
///     pc_count: 0,
///     dnc_count: 0,
///     category: None,
///     severity: Some(severity.into()),
///     compliance_rate: rate,
///     compliance_status: ComplianceStatus::from_rate(rate),
/// };
/// let rows = vec![row("r1", 1.0, "critical"), row("r2", 0.0, "medium")];
///
/// // (5.0 * 2.0 + 1.0 * 1.0) / 3.0 = 3.67 -> 3.5
/// let score = calculate_rule_weighted_score(&rows, "A", &WeightsConfig::default());
/// assert_eq!(score, 3.5);
/// ```
pub fn calculate_rule_weighted_score(
    rule_rows: &[RuleDetailRow],
    leader: &str,
    weights: &WeightsConfig,
) -> f64 {
    let (weighted_sum, total_weight) = rule_rows
        .iter()
        .filter(|row| row.audit_leader.as_deref() == Some(leader))
        .fold((0.0, 0.0), |(sum, total), row| {
            let weight = weights.weight_for_rule(
                &row.rule_id,
                row.category.as_deref(),
                row.severity.as_deref(),
            );
            (sum + map_to_score(row.compliance_rate) * weight, total + weight)
        });

    if total_weight > 0.0 {
        (weighted_sum / total_weight * 2.0).round_ties_even() / 2.0
    } else {
        MIN_SCORE
    }
}
