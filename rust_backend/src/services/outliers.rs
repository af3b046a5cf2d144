//! Absolute and statistical outlier tagging for the leader table.

use log::debug;

use super::stats::{mean, population_std};
use crate::config::ThresholdConfig;
use crate::core::{LeaderSummaryRow, PerformanceTag};

/// Smallest cohort for which z-scores are computed.
pub const MIN_LEADERS_FOR_ZSCORE: usize = 4;

fn performance_tag(row: &LeaderSummaryRow) -> PerformanceTag {
    if row.is_high_performer {
        PerformanceTag::HighPerformer
    } else if row.is_critical {
        PerformanceTag::CriticalConcern
    } else if row.is_concern {
        PerformanceTag::NeedsAttention
    } else if row.is_statistical_high == Some(true) {
        PerformanceTag::AboveAverage
    } else if row.is_statistical_low == Some(true) {
        PerformanceTag::BelowAverage
    } else {
        PerformanceTag::Average
    }
}

/// Flag exceptional leaders and assign each a single performance tag.
///
/// Threshold flags compare the compliance rate with `thresholds`. With at
/// least [`MIN_LEADERS_FOR_ZSCORE`] leaders and a non-zero spread, population
/// z-scores are added along with the `is_statistical_*` flags; otherwise
/// those columns stay empty.
///
/// The tag follows a fixed precedence: High Performer, Critical Concern,
/// Needs Attention, Above Average, Below Average, Average.
pub fn tag_outliers_and_exceptions(
    mut rows: Vec<LeaderSummaryRow>,
    thresholds: &ThresholdConfig,
) -> Vec<LeaderSummaryRow> {
    for row in &mut rows {
        row.is_high_performer = row.compliance_rate >= thresholds.high_performer_threshold;
        row.is_concern = row.compliance_rate <= thresholds.concern_threshold;
        row.is_critical = row.compliance_rate <= thresholds.critical_threshold;
        row.compliance_z_score = None;
        row.is_statistical_outlier = None;
        row.is_statistical_high = None;
        row.is_statistical_low = None;
    }

    if rows.len() >= MIN_LEADERS_FOR_ZSCORE {
        let rates: Vec<f64> = rows.iter().map(|r| r.compliance_rate).collect();
        let spread = mean(&rates).zip(population_std(&rates));

        match spread {
            Some((avg, std)) if std > 0.0 && std.is_finite() => {
                let t = thresholds.z_score_threshold;
                for row in &mut rows {
                    let z = (row.compliance_rate - avg) / std;
                    row.compliance_z_score = Some(z);
                    row.is_statistical_outlier = Some(z.abs() > t);
                    row.is_statistical_high = Some(z > t);
                    row.is_statistical_low = Some(z < -t);
                }
            }
            _ => debug!("Compliance rates have no spread; skipping z-scores"),
        }
    }

    for row in &mut rows {
        row.performance_tag = Some(performance_tag(row));
    }
    rows
}
