//! End-to-end tests for the aggregation pipeline.
//!
//! These tests run the fixture documents through `aggregate_analytics_results`
//! and check:
//! 1. Leader counts, scores, comparison columns and tags
//! 2. The rule detail table, including legacy documents
//! 3. Ranking, lookups and the report structure
//! 4. Persistence of the summary document

mod support;

use qa_analytics::config::{load_weights_configuration, ThresholdConfig, WeightsConfig};
use qa_analytics::core::{ComplianceStatus, PerformanceTag, Rating};
use qa_analytics::{aggregate_analytics_results, create_summary_report, AnalyticsSummary};
use std::io::Write;

use support::{approx_eq, leaders_document, legacy_result, sample_results};

// ==================== Leader table ====================

#[test]
fn test_leader_counts_and_rates() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let leaders = summary.leader_summary();

    assert_eq!(leaders.len(), 3);

    let expected = [
        ("Leader1", 5, 4, 1, 0, 0.8),
        ("Leader2", 5, 2, 2, 1, 0.4),
        ("Leader3", 2, 0, 1, 1, 0.0),
    ];
    for (row, (name, total, gc, pc, dnc, rate)) in leaders.iter().zip(expected) {
        assert_eq!(row.audit_leader, name);
        assert_eq!(
            (row.total_rules, row.gc_count, row.pc_count, row.dnc_count),
            (total, gc, pc, dnc)
        );
        assert!(approx_eq(row.compliance_rate, rate), "{name}");
    }
}

#[test]
fn test_leader_scores_and_ratings() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let leaders = summary.leader_summary();

    assert_eq!(leaders[0].weighted_score, Some(3.5));
    assert_eq!(leaders[0].rating, Some(Rating::Adequate));
    assert_eq!(leaders[1].weighted_score, Some(1.0));
    assert_eq!(leaders[1].rating, Some(Rating::CriticalConcerns));
    assert_eq!(leaders[2].weighted_score, Some(1.0));
    assert!(leaders.iter().all(|r| r.override_score.is_none()));
}

#[test]
fn test_comparison_columns() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let leaders = summary.leader_summary();

    assert!(approx_eq(leaders[0].compliance_vs_avg.unwrap(), 0.4));
    assert!(approx_eq(leaders[2].compliance_vs_avg.unwrap(), -0.4));
    assert!(approx_eq(leaders[0].compliance_percentile.unwrap(), 100.0));
    assert!(approx_eq(leaders[1].compliance_percentile.unwrap(), 200.0 / 3.0));
    assert!(approx_eq(leaders[2].compliance_percentile.unwrap(), 100.0 / 3.0));
    assert_eq!(leaders[1].score_percentile, Some(50.0));
    assert_eq!(leaders[2].score_percentile, Some(50.0));
}

#[test]
fn test_small_cohort_tags() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let leaders = summary.leader_summary();

    // three leaders: no z-scores
    assert!(leaders.iter().all(|r| r.compliance_z_score.is_none()));
    assert_eq!(leaders[0].performance_tag, Some(PerformanceTag::Average));
    assert_eq!(leaders[1].performance_tag, Some(PerformanceTag::CriticalConcern));
    assert_eq!(leaders[2].performance_tag, Some(PerformanceTag::CriticalConcern));
}

#[test]
fn test_zero_rate_leader_among_four() {
    let docs = vec![leaders_document(&[
        ("A", 10, 10),
        ("B", 10, 10),
        ("C", 10, 10),
        ("D", 0, 10),
    ])];

    let summary = aggregate_analytics_results(&docs, None, None);
    let d = summary
        .leader_summary()
        .iter()
        .find(|r| r.audit_leader == "D")
        .unwrap();

    assert!(d.is_critical);
    assert_eq!(d.is_statistical_low, Some(true));
    assert_eq!(d.performance_tag, Some(PerformanceTag::CriticalConcern));
}

#[test]
fn test_custom_thresholds_change_tags() {
    let docs = vec![leaders_document(&[("A", 9, 10)])];
    let thresholds = ThresholdConfig {
        high_performer_threshold: 0.9,
        ..ThresholdConfig::default()
    };

    let summary = aggregate_analytics_results(&docs, None, Some(thresholds));

    assert!(summary.leader_summary()[0].is_high_performer);
    assert_eq!(summary.config().thresholds.high_performer_threshold, 0.9);
}

// ==================== Department ====================

#[test]
fn test_department_summary() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let department = summary.department_summary();

    assert_eq!(department.total_rules, 12);
    assert_eq!(department.gc_count, 6);
    assert_eq!(department.pc_count, 4);
    assert_eq!(department.dnc_count, 2);
    assert!(approx_eq(department.overall_compliance_rate, 0.5));
    assert!(approx_eq(department.avg_compliance_rate.unwrap(), 0.4));
    assert!(approx_eq(department.avg_weighted_score.unwrap(), 5.5 / 3.0));
}

// ==================== Rule details ====================

#[test]
fn test_rule_detail_table() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let rules = summary.rule_details();

    assert_eq!(rules.len(), 14);

    let find = |rule: &str, leader: Option<&str>| {
        rules
            .iter()
            .find(|r| r.rule_id == rule && r.audit_leader.as_deref() == leader)
            .unwrap_or_else(|| panic!("missing row {rule}/{leader:?}"))
    };

    let row = find("rule1", Some("Leader1"));
    assert_eq!(row.compliance_rate, 1.0);
    assert_eq!(row.compliance_status, ComplianceStatus::GC);
    assert_eq!(find("rule1", Some("Leader2")).compliance_status, ComplianceStatus::PC);
    assert_eq!(find("rule2", Some("Leader2")).compliance_status, ComplianceStatus::DNC);

    let row = find("rule3", Some("Leader2"));
    assert_eq!(row.compliance_rate, 0.0);
    assert_eq!(row.category.as_deref(), Some("compliance"));
    assert_eq!(row.severity.as_deref(), Some("critical"));

    assert!(approx_eq(find("rule5", Some("Leader2")).compliance_rate, 2.0 / 3.0));
    assert_eq!(find("rule5", Some("Leader3")).compliance_rate, 0.25);
}

#[test]
fn test_legacy_rules_have_overall_rows_only() {
    let summary = aggregate_analytics_results(&[legacy_result()], None, None);
    let rules = summary.rule_details();

    assert!(summary.leader_summary().is_empty());
    assert_eq!(rules.len(), 2);
    assert!(rules.iter().all(|r| r.audit_leader.is_none()));
    assert_eq!(rules[0].rule_name, "Legacy Rule 6");
    assert!(approx_eq(rules[0].compliance_rate, 0.2));
    assert_eq!(rules[1].category.as_deref(), Some("efficiency"));
    assert!(approx_eq(rules[1].compliance_rate, 0.8));
    assert_eq!(rules[1].compliance_status, ComplianceStatus::PC);
}

#[test]
fn test_rule_rows_are_grouped_by_rule() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let ids: Vec<&str> = summary
        .rule_details()
        .iter()
        .map(|r| r.rule_id.as_str())
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

// ==================== Ranking and lookups ====================

#[test]
fn test_leader_ranking() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let ranking = summary.get_leader_ranking();

    let order: Vec<_> = ranking
        .iter()
        .map(|r| (r.rank, r.leader.audit_leader.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "Leader1"), (2, "Leader2"), (3, "Leader3")]);
}

#[test]
fn test_leaders_by_rule() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);

    let rows = summary.get_leaders_by_rule("rule5");
    let leaders: Vec<_> = rows.iter().filter_map(|r| r.audit_leader.as_deref()).collect();
    assert_eq!(leaders, vec!["Leader1", "Leader2", "Leader3"]);

    assert!(summary.get_leaders_by_rule("rule99").is_empty());
}

#[test]
fn test_rule_weighted_scores() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);

    // (5*1 + 3.5*1.5 + 2*2 + 5*1 + 5*0.5) / 6 = 3.625 -> 3.5
    assert_eq!(summary.rule_weighted_score("Leader1"), 3.5);
    assert_eq!(summary.rule_weighted_score("Unknown"), 1.0);
}

#[test]
fn test_weights_file_feeds_rule_scores() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"rule_weights": {{"rule3": 100.0}}}}"#).unwrap();

    let loaded = load_weights_configuration(Some(file.path()));
    assert!(!loaded.used_defaults());

    let summary = aggregate_analytics_results(&sample_results(), Some(loaded.weights), None);

    // rule3 (score 2.0 for Leader1) dominates
    assert_eq!(summary.rule_weighted_score("Leader1"), 2.0);
    // the leader table is unaffected
    assert_eq!(summary.leader_summary()[0].weighted_score, Some(3.5));
    assert_ne!(summary.config().weights, WeightsConfig::default());
}

// ==================== Report ====================

#[test]
fn test_summary_report() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let report = create_summary_report(&summary);

    let overview = &report.department_overview;
    assert_eq!(overview.total_leaders, 3);
    assert_eq!(overview.total_rules, 12);
    assert_eq!(overview.high_performers, 0);
    assert_eq!(overview.concerns, 2);
    assert_eq!(overview.critical_concerns, 2);

    assert_eq!(report.top_performers.len(), 3);
    assert_eq!(report.bottom_performers.len(), 3);
    assert_eq!(report.rule_details.len(), 14);
    assert_eq!(report.all_leaders[0].leader.audit_leader, "Leader1");
}

// ==================== Persistence ====================

#[test]
fn test_export_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports").join("summary.json");

    let summary = aggregate_analytics_results(&sample_results(), None, None);
    summary.export_to_file(&path).unwrap();

    let restored = AnalyticsSummary::from_file(&path).unwrap();

    assert_eq!(restored.leader_summary().len(), 3);
    assert_eq!(restored.rule_details().len(), 14);
    assert_eq!(restored.department_summary().total_rules, 12);
    assert_eq!(restored.config(), summary.config());
    assert_eq!(
        restored.get_leader_ranking()[0].leader.audit_leader,
        summary.get_leader_ranking()[0].leader.audit_leader
    );
}

#[test]
fn test_exported_document_shape() {
    let summary = aggregate_analytics_results(&sample_results(), None, None);
    let value = serde_json::to_value(summary.export_to_dict()).unwrap();

    for key in ["leader_summary", "department_summary", "rule_details", "config", "timestamp"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    let leader = &value["leader_summary"][0];
    assert_eq!(leader["rating"], "Adequate");
    assert_eq!(leader["trend"], "stable");
    assert_eq!(leader["performance_tag"], "Average");
    assert_eq!(leader["override_rating"], "");
}
