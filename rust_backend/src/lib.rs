//! QA analytics aggregation.
//!
//! Turns per-analytic validation result documents into a department-wide
//! compliance summary: per-leader counts, scores and ratings, cohort
//! comparison, outlier tags and a per-rule detail table.
//!
//! ```
//! use qa_analytics::{aggregate_analytics_results, create_summary_report};
//! use serde_json::json;
//!
//! let docs = vec![
//!     json!({"analytic_id": "a1", "grouped_summary": {"Leader1": {"total_rules": 3, "GC": 2, "PC": 1, "DNC": 0}}}),
//!     json!({"id": "a2", "grouped_summary": {"Leader1": {"total_rules": 2, "GC": 2, "PC": 0, "DNC": 0}}}),
//! ];
//!
//! let summary = aggregate_analytics_results(&docs, None, None);
//! assert_eq!(summary.get_leader_ranking()[0].leader.compliance_rate, 0.8);
//!
//! let report = create_summary_report(&summary);
//! assert_eq!(report.department_overview.total_leaders, 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;

pub use config::{load_weights_configuration, LoadedWeights, ThresholdConfig, WeightsConfig};
pub use error::{AnalyticsError, AnalyticsResult};
pub use models::{AnalyticsSummary, SummaryDocument};
pub use services::{aggregate_analytics_results, create_summary_report, SummaryReport};
