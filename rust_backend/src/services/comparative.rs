//! Cohort comparison for the leader table.

use serde::{Deserialize, Serialize};

use super::stats::{mean, percentile_ranks};
use crate::core::{LeaderSummaryRow, Trend};

/// Cohort means the comparison columns are measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortMeans {
    pub compliance_rate: Option<f64>,
    pub weighted_score: Option<f64>,
}

/// Leader rows with comparison columns filled in, plus the cohort means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparativeSummary {
    pub rows: Vec<LeaderSummaryRow>,
    pub cohort: CohortMeans,
}

/// Compare every leader against the cohort.
///
/// Sets `compliance_vs_avg` and `compliance_percentile` (0–100, ties share the
/// average rank) for every row, and the score counterparts for rows that carry
/// a `weighted_score`. `yoy_change` stays empty and `trend` is
/// [`Trend::Stable`] until historical comparison exists.
pub fn generate_comparative_summary(mut rows: Vec<LeaderSummaryRow>) -> ComparativeSummary {
    if rows.is_empty() {
        return ComparativeSummary::default();
    }

    let rates: Vec<f64> = rows.iter().map(|r| r.compliance_rate).collect();
    let scores: Vec<Option<f64>> = rows.iter().map(|r| r.weighted_score).collect();
    let present_scores: Vec<f64> = scores.iter().flatten().copied().collect();

    let cohort = CohortMeans {
        compliance_rate: mean(&rates),
        weighted_score: mean(&present_scores),
    };

    let rate_ranks = percentile_ranks(&rates.iter().copied().map(Some).collect::<Vec<_>>());
    let score_ranks = percentile_ranks(&scores);

    for ((row, rate_rank), score_rank) in rows.iter_mut().zip(rate_ranks).zip(score_ranks) {
        row.compliance_vs_avg = cohort.compliance_rate.map(|avg| row.compliance_rate - avg);
        row.compliance_percentile = rate_rank.map(|p| p * 100.0);

        row.score_vs_avg = match (row.weighted_score, cohort.weighted_score) {
            (Some(score), Some(avg)) => Some(score - avg),
            _ => None,
        };
        row.score_percentile = score_rank.map(|p| p * 100.0);

        row.yoy_change = None;
        row.trend = Some(Trend::Stable);
    }

    ComparativeSummary { rows, cohort }
}
