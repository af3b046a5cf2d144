//! Aggregation stages and their orchestration.
//!
//! Each stage is a plain function over typed rows; [`aggregate_analytics_results`]
//! chains them into an [`AnalyticsSummary`](crate::models::AnalyticsSummary) and
//! [`create_summary_report`] turns a summary into the report structure.

pub mod aggregator;
pub mod comparative;
pub mod leaders;
pub mod outliers;
pub mod report;
pub mod rule_details;
pub mod scoring;
pub mod stats;

pub use aggregator::{aggregate_analytics_results, build_department_summary};
pub use comparative::{generate_comparative_summary, CohortMeans, ComparativeSummary};
pub use leaders::aggregate_by_audit_leader;
pub use outliers::{tag_outliers_and_exceptions, MIN_LEADERS_FOR_ZSCORE};
pub use report::{create_summary_report, DepartmentOverview, SummaryReport};
pub use rule_details::extract_rule_details_summary;
pub use scoring::{calculate_rule_weighted_score, calculate_weighted_scores, map_to_score};
