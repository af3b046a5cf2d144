//! Per-leader aggregation across a batch of standardized results.

use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::LeaderSummaryRow;
use crate::parsing::StandardizedResult;

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    total_rules: u64,
    gc: u64,
    pc: u64,
    dnc: u64,
}

/// Sort leader rows by compliance rate, highest first.
///
/// The sort is stable, so equal rates keep their current relative order.
pub(crate) fn sort_by_compliance_desc(rows: &mut [LeaderSummaryRow]) {
    rows.sort_by(|a, b| {
        b.compliance_rate
            .partial_cmp(&a.compliance_rate)
            .unwrap_or(Ordering::Equal)
    });
}

/// Build one summary row per audit leader.
///
/// Counts from every result's `grouped_summary` are summed per leader and the
/// compliance rate is recomputed from the sums (never averaged). Missing
/// counts contribute zero and sums saturate at `u64::MAX`. Rows are ordered by compliance rate descending,
/// ties in leader-name order.
///
/// # Examples
///
/// ```
/// use qa_analytics::parsing::standardize_result_format;
/// use qa_analytics::services::leaders::aggregate_by_audit_leader;
/// use serde_json::json;
///
/// let results = vec![
///     standardize_result_format(&json!({"grouped_summary": {"A": {"total_rules": 3, "GC": 2, "PC": 1}}})),
///     standardize_result_format(&json!({"grouped_summary": {"A": {"total_rules": 2, "GC": 2}}})),
/// ];
/// let rows = aggregate_by_audit_leader(&results);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].total_rules, 5);
/// assert_eq!(rows[0].compliance_rate, 0.8);
/// ```
pub fn aggregate_by_audit_leader(results: &[StandardizedResult]) -> Vec<LeaderSummaryRow> {
    let mut by_leader: BTreeMap<&str, Counts> = BTreeMap::new();

    for result in results {
        for (leader, stats) in &result.grouped_summary {
            let counts = by_leader.entry(leader.as_str()).or_default();
            counts.total_rules = counts
                .total_rules
                .saturating_add(stats.total_rules.unwrap_or(0));
            counts.gc = counts.gc.saturating_add(stats.gc.unwrap_or(0));
            counts.pc = counts.pc.saturating_add(stats.pc.unwrap_or(0));
            counts.dnc = counts.dnc.saturating_add(stats.dnc.unwrap_or(0));
        }
    }

    let mut rows: Vec<LeaderSummaryRow> = by_leader
        .into_iter()
        .map(|(leader, c)| LeaderSummaryRow::new(leader, c.total_rules, c.gc, c.pc, c.dnc))
        .collect();
    sort_by_compliance_desc(&mut rows);

    debug!(
        "Aggregated {} audit leaders from {} results",
        rows.len(),
        results.len()
    );
    rows
}
