//! Report structure handed to document generators.

use serde::{Deserialize, Serialize};

use crate::core::RuleDetailRow;
use crate::models::{AnalyticsSummary, RankedLeader};

/// Number of leaders listed in the top and bottom performer sections.
pub const PERFORMER_LIST_SIZE: usize = 3;

/// Headline numbers for the whole department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOverview {
    pub timestamp: String,
    pub total_leaders: usize,
    pub total_rules: u64,
    pub overall_compliance_rate: f64,
    pub high_performers: usize,
    pub concerns: usize,
    pub critical_concerns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub department_overview: DepartmentOverview,
    pub top_performers: Vec<RankedLeader>,
    pub bottom_performers: Vec<RankedLeader>,
    pub all_leaders: Vec<RankedLeader>,
    pub rule_details: Vec<RuleDetailRow>,
}

/// Build the report structure from a summary's ranking and tables.
///
/// `top_performers` holds the first three ranked leaders and
/// `bottom_performers` the last three, so the two overlap when there are
/// fewer than six leaders.
pub fn create_summary_report(summary: &AnalyticsSummary) -> SummaryReport {
    let ranking = summary.get_leader_ranking();
    let department = summary.department_summary();

    let count = |flag: fn(&RankedLeader) -> bool| ranking.iter().filter(|r| flag(r)).count();

    let department_overview = DepartmentOverview {
        timestamp: summary.timestamp().to_string(),
        total_leaders: ranking.len(),
        total_rules: department.total_rules,
        overall_compliance_rate: department.overall_compliance_rate,
        high_performers: count(|r| r.leader.is_high_performer),
        concerns: count(|r| r.leader.is_concern),
        critical_concerns: count(|r| r.leader.is_critical),
    };

    let top = ranking.iter().take(PERFORMER_LIST_SIZE).cloned().collect();
    let bottom_start = ranking.len().saturating_sub(PERFORMER_LIST_SIZE);
    let bottom = ranking[bottom_start..].to_vec();

    SummaryReport {
        department_overview,
        top_performers: top,
        bottom_performers: bottom,
        all_leaders: ranking.to_vec(),
        rule_details: summary.rule_details().to_vec(),
    }
}
