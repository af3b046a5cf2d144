//! Parsers for raw validation result documents.
//!
//! Result documents arrive from the upstream rule engine in modern and legacy
//! shapes. This module decodes them into the strict [`StandardizedResult`]
//! schema consumed by the aggregation services.
//!
//! # Example
//!
//! ```
//! use qa_analytics::parsing::standardize_result_format;
//! use serde_json::json;
//!
//! let result = standardize_result_format(&json!({"analytic_id": "a1"}));
//! assert_eq!(result.analytic_id.as_deref(), Some("a1"));
//! assert!(result.rule_results.is_empty());
//! ```

pub mod result_parser;


pub use result_parser::{
    standardize_all, standardize_result_format, LeaderStats, PartyMetrics, PartyResult,
    RuleResult, StandardizedResult,
};
