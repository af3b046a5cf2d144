//! The aggregate result of one analytics run.

use log::warn;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ThresholdConfig, WeightsConfig};
use crate::core::{DepartmentSummary, LeaderSummaryRow, RuleDetailRow};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::parsing::result_parser::now_iso;
use crate::services::scoring::calculate_rule_weighted_score;

/// Configuration an aggregation ran with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

/// A leader row with its 1-based position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLeader {
    pub rank: usize,
    #[serde(flatten)]
    pub leader: LeaderSummaryRow,
}

/// Plain serializable form of an [`AnalyticsSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub leader_summary: Vec<LeaderSummaryRow>,
    pub department_summary: DepartmentSummary,
    pub rule_details: Vec<RuleDetailRow>,
    #[serde(default)]
    pub config: SummaryConfig,
    #[serde(default = "now_iso")]
    pub timestamp: String,
}

/// Aggregated analytics for a batch of results.
///
/// The tables are fixed at construction. The leader ranking and the
/// rule-to-rows index are computed on first use and cached.
#[derive(Debug)]
pub struct AnalyticsSummary {
    leader_summary: Vec<LeaderSummaryRow>,
    department_summary: DepartmentSummary,
    rule_details: Vec<RuleDetailRow>,
    config: SummaryConfig,
    timestamp: String,
    ranking: OnceCell<Vec<RankedLeader>>,
    rule_index: OnceCell<BTreeMap<String, Vec<usize>>>,
}

fn score_desc(a: &LeaderSummaryRow, b: &LeaderSummaryRow) -> Ordering {
    match (a.weighted_score, b.weighted_score) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn rate_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl AnalyticsSummary {
    pub fn new(
        leader_summary: Vec<LeaderSummaryRow>,
        department_summary: DepartmentSummary,
        rule_details: Vec<RuleDetailRow>,
        config: SummaryConfig,
        timestamp: Option<String>,
    ) -> Self {
        Self {
            leader_summary,
            department_summary,
            rule_details,
            config,
            timestamp: timestamp.unwrap_or_else(now_iso),
            ranking: OnceCell::new(),
            rule_index: OnceCell::new(),
        }
    }

    pub fn leader_summary(&self) -> &[LeaderSummaryRow] {
        &self.leader_summary
    }

    pub fn department_summary(&self) -> &DepartmentSummary {
        &self.department_summary
    }

    pub fn rule_details(&self) -> &[RuleDetailRow] {
        &self.rule_details
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Leaders ranked by weighted score, best first.
    ///
    /// When no leader has a weighted score the compliance rate is used
    /// instead. Ties keep the leader table order. Ranks run from 1 to N.
    pub fn get_leader_ranking(&self) -> &[RankedLeader] {
        self.ranking.get_or_init(|| {
            let mut leaders = self.leader_summary.clone();
            if leaders.iter().any(|r| r.weighted_score.is_some()) {
                leaders.sort_by(score_desc);
            } else {
                leaders.sort_by(|a, b| rate_desc(a.compliance_rate, b.compliance_rate));
            }
            leaders
                .into_iter()
                .enumerate()
                .map(|(idx, leader)| RankedLeader {
                    rank: idx + 1,
                    leader,
                })
                .collect()
        })
    }

    /// All rule detail rows ordered by compliance rate, highest first.
    pub fn get_rules_by_compliance(&self) -> Vec<&RuleDetailRow> {
        let mut rows: Vec<&RuleDetailRow> = self.rule_details.iter().collect();
        rows.sort_by(|a, b| rate_desc(a.compliance_rate, b.compliance_rate));
        rows
    }

    /// Rows for one rule, ordered by compliance rate, highest first.
    ///
    /// An unknown rule id logs a warning and yields an empty list.
    pub fn get_leaders_by_rule(&self, rule_id: &str) -> Vec<&RuleDetailRow> {
        let index = self.rule_index.get_or_init(|| {
            let mut index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
            for (pos, row) in self.rule_details.iter().enumerate() {
                index.entry(row.rule_id.clone()).or_default().push(pos);
            }
            index
        });

        let Some(positions) = index.get(rule_id) else {
            warn!("Rule {} not found in performance data", rule_id);
            return Vec::new();
        };

        let mut rows: Vec<&RuleDetailRow> =
            positions.iter().map(|&pos| &self.rule_details[pos]).collect();
        rows.sort_by(|a, b| rate_desc(a.compliance_rate, b.compliance_rate));
        rows
    }

    /// Per-rule weighted score of a leader using the configured weights.
    pub fn rule_weighted_score(&self, leader: &str) -> f64 {
        calculate_rule_weighted_score(&self.rule_details, leader, &self.config.weights)
    }

    /// Export to the plain document form.
    pub fn export_to_dict(&self) -> SummaryDocument {
        SummaryDocument {
            leader_summary: self.leader_summary.clone(),
            department_summary: self.department_summary.clone(),
            rule_details: self.rule_details.clone(),
            config: self.config.clone(),
            timestamp: self.timestamp.clone(),
        }
    }

    /// Rebuild a summary from its document form. Caches start empty.
    pub fn from_dict(document: SummaryDocument) -> Self {
        Self::new(
            document.leader_summary,
            document.department_summary,
            document.rule_details,
            document.config,
            Some(document.timestamp),
        )
    }

    /// Write the summary as pretty-printed JSON, creating parent directories.
    ///
    /// # Returns
    /// * `Ok(PathBuf)` with the written path
    /// * `Err(AnalyticsError)` if a directory or the file cannot be written
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> AnalyticsResult<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AnalyticsError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&self.export_to_dict())?;
        fs::write(path, json).map_err(|e| AnalyticsError::io(path, e))?;
        Ok(path.to_path_buf())
    }

    /// Load a summary previously written by [`AnalyticsSummary::export_to_file`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AnalyticsError::io(path, e))?;

        let mut de = serde_json::Deserializer::from_str(&content);
        let document: SummaryDocument =
            serde_path_to_error::deserialize(&mut de).map_err(|e| AnalyticsError::json(path, e))?;
        Ok(Self::from_dict(document))
    }
}
