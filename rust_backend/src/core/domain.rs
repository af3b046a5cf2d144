//! Domain models for compliance analytics.
//!
//! This module provides the typed rows produced by the aggregation pipeline:
//! the per-leader summary table, the per-rule detail table and the department
//! totals, together with the small enums used for statuses, ratings and tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compliance rate at or above which a rule/leader pair is Generally Conforming.
pub const GC_RATE_THRESHOLD: f64 = 0.95;

/// Compliance rate at or above which a rule/leader pair is Partially Conforming.
pub const PC_RATE_THRESHOLD: f64 = 0.80;

/// Computes a compliance rate with the denominator clamped to at least one.
///
/// A scope with zero applicable items yields `0.0` rather than `NaN`.
///
/// # Examples
///
/// ```
/// use qa_analytics::core::domain::compliance_rate;
///
/// assert_eq!(compliance_rate(4, 5), 0.8);
/// assert_eq!(compliance_rate(0, 0), 0.0);
/// ```
pub fn compliance_rate(gc_count: u64, total: u64) -> f64 {
    gc_count as f64 / total.max(1) as f64
}

/// Three-valued compliance status of a rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    /// Generally conforms.
    GC,
    /// Partially conforms.
    PC,
    /// Does not conform.
    DNC,
}

impl ComplianceStatus {
    /// Derives the status from a compliance rate using the fixed thresholds
    /// (≥ 0.95 GC, ≥ 0.80 PC, otherwise DNC).
    ///
    /// # Examples
    ///
    /// ```
    /// use qa_analytics::core::domain::ComplianceStatus;
    ///
    /// assert_eq!(ComplianceStatus::from_rate(0.97), ComplianceStatus::GC);
    /// assert_eq!(ComplianceStatus::from_rate(0.80), ComplianceStatus::PC);
    /// assert_eq!(ComplianceStatus::from_rate(0.6), ComplianceStatus::DNC);
    /// ```
    pub fn from_rate(rate: f64) -> Self {
        if rate >= GC_RATE_THRESHOLD {
            ComplianceStatus::GC
        } else if rate >= PC_RATE_THRESHOLD {
            ComplianceStatus::PC
        } else {
            ComplianceStatus::DNC
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::GC => "GC",
            ComplianceStatus::PC => "PC",
            ComplianceStatus::DNC => "DNC",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative label attached to a weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    Exemplary,
    Strong,
    Satisfactory,
    Adequate,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Unsatisfactory,
    Deficient,
    #[serde(rename = "Critical Concerns")]
    CriticalConcerns,
}

impl Rating {
    /// Maps a 1.0–5.0 score onto its rating label.
    ///
    /// Scores between breakpoints take the label of the breakpoint below.
    ///
    /// # Examples
    ///
    /// ```
    /// use qa_analytics::core::domain::Rating;
    ///
    /// assert_eq!(Rating::from_score(5.0), Rating::Exemplary);
    /// assert_eq!(Rating::from_score(3.5), Rating::Adequate);
    /// assert_eq!(Rating::from_score(1.0), Rating::CriticalConcerns);
    /// ```
    pub fn from_score(score: f64) -> Self {
        if score >= 5.0 {
            Rating::Exemplary
        } else if score >= 4.5 {
            Rating::Strong
        } else if score >= 4.0 {
            Rating::Satisfactory
        } else if score >= 3.5 {
            Rating::Adequate
        } else if score >= 3.0 {
            Rating::Fair
        } else if score >= 2.5 {
            Rating::NeedsImprovement
        } else if score >= 2.0 {
            Rating::Unsatisfactory
        } else if score >= 1.5 {
            Rating::Deficient
        } else {
            Rating::CriticalConcerns
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Exemplary => "Exemplary",
            Rating::Strong => "Strong",
            Rating::Satisfactory => "Satisfactory",
            Rating::Adequate => "Adequate",
            Rating::Fair => "Fair",
            Rating::NeedsImprovement => "Needs Improvement",
            Rating::Unsatisfactory => "Unsatisfactory",
            Rating::Deficient => "Deficient",
            Rating::CriticalConcerns => "Critical Concerns",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single overall classification of a leader, chosen by fixed precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceTag {
    #[serde(rename = "High Performer")]
    HighPerformer,
    #[serde(rename = "Critical Concern")]
    CriticalConcern,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "Above Average")]
    AboveAverage,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Average,
}

impl PerformanceTag {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTag::HighPerformer => "High Performer",
            PerformanceTag::CriticalConcern => "Critical Concern",
            PerformanceTag::NeedsAttention => "Needs Attention",
            PerformanceTag::AboveAverage => "Above Average",
            PerformanceTag::BelowAverage => "Below Average",
            PerformanceTag::Average => "Average",
        }
    }
}

impl fmt::Display for PerformanceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a leader's performance across reporting periods.
///
/// Historical comparison is not computed yet; every row carries `Stable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

/// One row of the leader summary table.
///
/// The count columns and `compliance_rate` come from the leader aggregator.
/// The remaining columns are filled in by the scoring, comparative and
/// outlier stages; they stay `None`/`false` until the stage has run.
///
/// The statistical columns (`compliance_z_score` and the `is_statistical_*`
/// flags) are only present when the cohort was large and varied enough for
/// z-scores to be meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderSummaryRow {
    pub audit_leader: String,
    pub total_rules: u64,
    pub gc_count: u64,
    pub pc_count: u64,
    pub dnc_count: u64,
    pub compliance_rate: f64,

    // Scoring
    pub weighted_score: Option<f64>,
    pub rating: Option<Rating>,
    pub override_score: Option<f64>,
    pub override_rating: String,
    pub comments: String,

    // Comparative
    pub compliance_vs_avg: Option<f64>,
    pub score_vs_avg: Option<f64>,
    pub compliance_percentile: Option<f64>,
    pub score_percentile: Option<f64>,
    pub yoy_change: Option<f64>,
    pub trend: Option<Trend>,

    // Outliers
    pub is_high_performer: bool,
    pub is_concern: bool,
    pub is_critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance_z_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_statistical_outlier: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_statistical_high: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_statistical_low: Option<bool>,
    pub performance_tag: Option<PerformanceTag>,
}

impl LeaderSummaryRow {
    /// Creates a row from summed counts, computing the compliance rate.
    pub fn new(
        audit_leader: impl Into<String>,
        total_rules: u64,
        gc_count: u64,
        pc_count: u64,
        dnc_count: u64,
    ) -> Self {
        Self {
            audit_leader: audit_leader.into(),
            total_rules,
            gc_count,
            pc_count,
            dnc_count,
            compliance_rate: compliance_rate(gc_count, total_rules),
            ..Default::default()
        }
    }
}

/// One row of the rule detail table.
///
/// `audit_leader` is `None` for the overall row of a rule that carried no
/// per-leader breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDetailRow {
    pub rule_id: String,
    pub rule_name: String,
    #[serde(default)]
    pub audit_leader: Option<String>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub gc_count: u64,
    #[serde(default)]
    pub pc_count: u64,
    #[serde(default)]
    pub dnc_count: u64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    pub compliance_rate: f64,
    pub compliance_status: ComplianceStatus,
}

/// Department-wide totals computed from the leader summary table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentSummary {
    pub total_rules: u64,
    pub gc_count: u64,
    pub pc_count: u64,
    pub dnc_count: u64,
    pub overall_compliance_rate: f64,
    /// Mean of the leaders' compliance rates; `None` when there are no leaders.
    pub avg_compliance_rate: Option<f64>,
    /// Mean of the leaders' weighted scores; `None` when there are no leaders.
    pub avg_weighted_score: Option<f64>,
}
