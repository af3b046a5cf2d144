//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Modern document with party breakdowns for two leaders.
pub fn result_one() -> Value {
    json!({
        "analytic_id": "test_analytic_1",
        "status": "PARTIALLY_COMPLIANT",
        "timestamp": "2023-01-01T00:00:00",
        "grouped_summary": {
            "Leader1": {"total_rules": 3, "GC": 2, "PC": 1, "DNC": 0, "compliance_rate": 0.67},
            "Leader2": {"total_rules": 3, "GC": 1, "PC": 1, "DNC": 1, "compliance_rate": 0.33}
        },
        "rule_results": {
            "rule1": {
                "rule_id": "rule1",
                "rule_name": "Test Rule 1",
                "compliance_status": "GC",
                "compliance_rate": 0.9,
                "total_items": 10, "gc_count": 9, "pc_count": 1, "dnc_count": 0,
                "party_results": {
                    "Leader1": {"status": "GC", "metrics": {"total_count": 5, "gc_count": 5, "pc_count": 0, "dnc_count": 0}},
                    "Leader2": {"status": "GC", "metrics": {"total_count": 5, "gc_count": 4, "pc_count": 1, "dnc_count": 0}}
                }
            },
            "rule2": {
                "rule_id": "rule2",
                "rule_name": "Test Rule 2",
                "compliance_status": "PC",
                "compliance_rate": 0.7,
                "total_items": 10, "gc_count": 7, "pc_count": 1, "dnc_count": 2,
                "category": "data_quality",
                "severity": "high",
                "party_results": {
                    "Leader1": {"status": "GC", "metrics": {"total_count": 5, "gc_count": 4, "pc_count": 1, "dnc_count": 0}},
                    "Leader2": {"status": "PC", "metrics": {"total_count": 5, "gc_count": 3, "pc_count": 0, "dnc_count": 2}}
                }
            },
            "rule3": {
                "rule_id": "rule3",
                "rule_name": "Test Rule 3",
                "compliance_status": "DNC",
                "compliance_rate": 0.3,
                "total_items": 10, "gc_count": 3, "pc_count": 1, "dnc_count": 6,
                "category": "compliance",
                "severity": "critical",
                "party_results": {
                    "Leader1": {"status": "PC", "metrics": {"total_count": 5, "gc_count": 3, "pc_count": 0, "dnc_count": 2}},
                    "Leader2": {"status": "DNC", "metrics": {"total_count": 5, "gc_count": 0, "pc_count": 1, "dnc_count": 4}}
                }
            }
        }
    })
}

/// Modern document adding a third leader.
pub fn result_two() -> Value {
    json!({
        "analytic_id": "test_analytic_2",
        "status": "FULLY_COMPLIANT",
        "timestamp": "2023-01-02T00:00:00",
        "grouped_summary": {
            "Leader1": {"total_rules": 2, "GC": 2, "PC": 0, "DNC": 0, "compliance_rate": 1.0},
            "Leader2": {"total_rules": 2, "GC": 1, "PC": 1, "DNC": 0, "compliance_rate": 0.5},
            "Leader3": {"total_rules": 2, "GC": 0, "PC": 1, "DNC": 1, "compliance_rate": 0.0}
        },
        "rule_results": {
            "rule4": {
                "rule_id": "rule4",
                "rule_name": "Test Rule 4",
                "compliance_status": "GC",
                "compliance_rate": 1.0,
                "total_items": 10, "gc_count": 10, "pc_count": 0, "dnc_count": 0,
                "category": "completeness",
                "severity": "medium",
                "party_results": {
                    "Leader1": {"status": "GC", "metrics": {"total_count": 3, "gc_count": 3, "pc_count": 0, "dnc_count": 0}},
                    "Leader2": {"status": "GC", "metrics": {"total_count": 3, "gc_count": 3, "pc_count": 0, "dnc_count": 0}},
                    "Leader3": {"status": "GC", "metrics": {"total_count": 4, "gc_count": 4, "pc_count": 0, "dnc_count": 0}}
                }
            },
            "rule5": {
                "rule_id": "rule5",
                "rule_name": "Test Rule 5",
                "compliance_status": "PC",
                "compliance_rate": 0.6,
                "total_items": 10, "gc_count": 6, "pc_count": 2, "dnc_count": 2,
                "category": "accuracy",
                "severity": "low",
                "party_results": {
                    "Leader1": {"status": "GC", "metrics": {"total_count": 3, "gc_count": 3, "pc_count": 0, "dnc_count": 0}},
                    "Leader2": {"status": "PC", "metrics": {"total_count": 3, "gc_count": 2, "pc_count": 1, "dnc_count": 0}},
                    "Leader3": {"status": "DNC", "metrics": {"total_count": 4, "gc_count": 1, "pc_count": 1, "dnc_count": 2}}
                }
            }
        }
    })
}

/// Legacy document: `id`, a `results` map, no timestamp and no leaders.
pub fn legacy_result() -> Value {
    json!({
        "id": "test_analytic_3",
        "status": "NON_COMPLIANT",
        "results": {
            "rule6": {
                "rule_id": "rule6",
                "rule_name": "Legacy Rule 6",
                "compliance_status": "DNC",
                "compliance_rate": 0.2,
                "total_items": 15, "gc_count": 3, "pc_count": 0, "dnc_count": 12
            },
            "rule7": {
                "rule_id": "rule7",
                "rule_name": "Legacy Rule 7",
                "compliance_status": "PC",
                "compliance_rate": 0.8,
                "total_items": 15, "gc_count": 12, "pc_count": 3, "dnc_count": 0,
                "category": "efficiency",
                "severity": "medium"
            }
        }
    })
}

/// The three fixture documents in order.
pub fn sample_results() -> Vec<Value> {
    vec![result_one(), result_two(), legacy_result()]
}

/// One document whose `grouped_summary` gives each leader `(gc, total)`.
pub fn leaders_document(leaders: &[(&str, u64, u64)]) -> Value {
    let grouped: serde_json::Map<String, Value> = leaders
        .iter()
        .map(|&(name, gc, total)| {
            (
                name.to_string(),
                json!({"total_rules": total, "GC": gc, "PC": 0, "DNC": total - gc}),
            )
        })
        .collect();
    json!({"analytic_id": "generated", "grouped_summary": grouped})
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
