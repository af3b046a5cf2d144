//! Flattened per-rule, per-leader detail table.

use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::{compliance_rate, ComplianceStatus, RuleDetailRow};
use crate::parsing::{RuleResult, StandardizedResult};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counts {
    total: u64,
    gc: u64,
    pc: u64,
    dnc: u64,
}

impl Counts {
    fn of_rule(rule: &RuleResult) -> Self {
        Self {
            total: rule.total_items.unwrap_or(0),
            gc: rule.gc_count.unwrap_or(0),
            pc: rule.pc_count.unwrap_or(0),
            dnc: rule.dnc_count.unwrap_or(0),
        }
    }
}

/// Summed counts plus the first category/severity seen for a group.
#[derive(Debug, Default)]
struct Group {
    counts: Counts,
    category: Option<String>,
    severity: Option<String>,
}

impl Group {
    fn add(&mut self, counts: Counts, rule: &RuleResult) {
        self.counts.total = self.counts.total.saturating_add(counts.total);
        self.counts.gc = self.counts.gc.saturating_add(counts.gc);
        self.counts.pc = self.counts.pc.saturating_add(counts.pc);
        self.counts.dnc = self.counts.dnc.saturating_add(counts.dnc);
        if self.category.is_none() {
            self.category = rule.category.clone();
        }
        if self.severity.is_none() {
            self.severity = rule.severity.clone();
        }
    }

    fn into_row(self, rule_id: String, rule_name: String, leader: Option<String>) -> RuleDetailRow {
        let rate = compliance_rate(self.counts.gc, self.counts.total);
        RuleDetailRow {
            rule_id,
            rule_name,
            audit_leader: leader,
            total_items: self.counts.total,
            gc_count: self.counts.gc,
            pc_count: self.counts.pc,
            dnc_count: self.counts.dnc,
            category: self.category,
            severity: self.severity,
            compliance_rate: rate,
            compliance_status: ComplianceStatus::from_rate(rate),
        }
    }
}

/// Extract the rule detail table from a batch of standardized results.
///
/// Rules carrying `party_results` produce one row per leader, with any
/// missing party metric falling back to the rule-level count. Rules without a
/// party breakdown are attributed to every leader in the result's
/// `grouped_summary` and also produce a leader-less overall row.
///
/// Rows are then summed across the batch by `(rule_id, rule_name, leader)`,
/// rates and statuses are recomputed from the sums, and the table is ordered
/// by rule id ascending then compliance rate descending.
pub fn extract_rule_details_summary(results: &[StandardizedResult]) -> Vec<RuleDetailRow> {
    let mut by_leader: BTreeMap<(String, String, String), Group> = BTreeMap::new();
    let mut overall: BTreeMap<(String, String), Group> = BTreeMap::new();

    for result in results {
        for (rule_id, rule) in &result.rule_results {
            let rule_name = rule.rule_name.clone().unwrap_or_else(|| rule_id.clone());
            let base = Counts::of_rule(rule);

            if rule.party_results.is_empty() {
                for leader in result.grouped_summary.keys() {
                    by_leader
                        .entry((rule_id.clone(), rule_name.clone(), leader.clone()))
                        .or_default()
                        .add(base, rule);
                }
                overall
                    .entry((rule_id.clone(), rule_name))
                    .or_default()
                    .add(base, rule);
                continue;
            }

            for (leader, party) in &rule.party_results {
                let counts = match &party.metrics {
                    Some(m) => Counts {
                        total: m.total_count.unwrap_or(base.total),
                        gc: m.gc_count.unwrap_or(base.gc),
                        pc: m.pc_count.unwrap_or(base.pc),
                        dnc: m.dnc_count.unwrap_or(base.dnc),
                    },
                    None => base,
                };
                by_leader
                    .entry((rule_id.clone(), rule_name.clone(), leader.clone()))
                    .or_default()
                    .add(counts, rule);
            }
        }
    }

    let mut rows: Vec<RuleDetailRow> = by_leader
        .into_iter()
        .map(|((rule_id, rule_name, leader), group)| group.into_row(rule_id, rule_name, Some(leader)))
        .chain(
            overall
                .into_iter()
                .map(|((rule_id, rule_name), group)| group.into_row(rule_id, rule_name, None)),
        )
        .collect();

    rows.sort_by(|a, b| {
        a.rule_id.cmp(&b.rule_id).then_with(|| {
            b.compliance_rate
                .partial_cmp(&a.compliance_rate)
                .unwrap_or(Ordering::Equal)
        })
    });

    debug!("Extracted {} rule detail rows", rows.len());
    rows
}
