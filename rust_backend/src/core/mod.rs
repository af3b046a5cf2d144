//! Core domain models for compliance analytics.
//!
//! This module defines the typed tables shared by every stage of the
//! aggregation pipeline: leader summary rows, rule detail rows and the
//! department totals.

pub mod domain;

pub use domain::{
    compliance_rate, ComplianceStatus, DepartmentSummary, LeaderSummaryRow, PerformanceTag,
    Rating, RuleDetailRow, Trend,
};
