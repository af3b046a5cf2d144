//! Normalization of raw validation result documents.
//!
//! Upstream producers emit result documents in several shapes: modern
//! documents keyed by `analytic_id` with a `rule_results` map, legacy ones
//! using `id` and a `results` list or map, and partial documents missing most
//! keys. [`standardize_result_format`] decodes any of them once, at the
//! boundary, into a [`StandardizedResult`] so that the rest of the pipeline
//! works against a strict schema.
//!
//! Decoding never fails. Fields with the wrong type fall back to their
//! defaults and entries that cannot be decoded at all are skipped with a
//! warning.

use chrono::Local;
use log::{debug, warn};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Accepts integers, floats and numeric strings for a non-negative count.
///
/// Anything else (including negative numbers and `null`) decodes to `None`.
fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CountValue {
        Int(u64),
        Float(f64),
        String(String),
        Other(IgnoredAny),
    }

    let as_count = |f: f64| (f.is_finite() && f >= 0.0).then(|| f.round() as u64);

    Ok(match CountValue::deserialize(deserializer)? {
        CountValue::Int(i) => Some(i),
        CountValue::Float(f) => as_count(f),
        CountValue::String(s) => s.trim().parse::<f64>().ok().and_then(as_count),
        CountValue::Other(_) => None,
    })
}

/// Accepts floats, integers and numeric strings for a rate.
fn deserialize_lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RateValue {
        Float(f64),
        String(String),
        Other(IgnoredAny),
    }

    Ok(match RateValue::deserialize(deserializer)? {
        RateValue::Float(f) => Some(f).filter(|f| f.is_finite()),
        RateValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        RateValue::Other(_) => None,
    })
}

/// Accepts strings, and stringifies numbers and booleans.
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

/// Decodes per-leader results, tolerating malformed leader entries.
///
/// A leader whose entry is not an object is kept with empty data so that it
/// still gets a record carrying the rule-level numbers.
fn deserialize_party_results<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, PartyResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut parties = BTreeMap::new();

    match value {
        Value::Object(map) => {
            for (leader, entry) in map {
                let party = PartyResult::deserialize(&entry).unwrap_or_else(|e| {
                    debug!(
                        "Party result for '{}' is not an object ({}); using rule-level data",
                        leader, e
                    );
                    PartyResult::default()
                });
                parties.insert(leader, party);
            }
        }
        Value::Null => {}
        other => warn!(
            "Ignoring party_results with unexpected shape: {}",
            type_name(&other)
        ),
    }

    Ok(parties)
}

/// Decodes the optional `metrics` block of a party result.
fn deserialize_party_metrics<'de, D>(deserializer: D) -> Result<Option<PartyMetrics>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(PartyMetrics::deserialize(&value).ok())
}

/// Leader-level counts for one rule, as reported by the rule engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyMetrics {
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub total_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub gc_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub pc_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub dnc_count: Option<u64>,
}

/// Outcome of one rule for one responsible party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyResult {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "deserialize_party_metrics")]
    pub metrics: Option<PartyMetrics>,
}

/// Decoded result of a single rule within one analytic run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleResult {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub rule_id: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub rule_name: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub compliance_status: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_rate")]
    pub compliance_rate: Option<f64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub total_items: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub gc_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub pc_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub dnc_count: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "deserialize_party_results")]
    pub party_results: BTreeMap<String, PartyResult>,
}

/// Per-leader counts from a result's `grouped_summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderStats {
    #[serde(deserialize_with = "deserialize_lenient_count")]
    pub total_rules: Option<u64>,
    #[serde(rename = "GC", deserialize_with = "deserialize_lenient_count")]
    pub gc: Option<u64>,
    #[serde(rename = "PC", deserialize_with = "deserialize_lenient_count")]
    pub pc: Option<u64>,
    #[serde(rename = "DNC", deserialize_with = "deserialize_lenient_count")]
    pub dnc: Option<u64>,
    #[serde(deserialize_with = "deserialize_lenient_rate")]
    pub compliance_rate: Option<f64>,
}

/// Fixed-shape validation result.
///
/// Every field is always present; `timestamp` is always a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizedResult {
    pub analytic_id: Option<String>,
    pub status: Option<String>,
    pub timestamp: String,
    pub rule_results: BTreeMap<String, RuleResult>,
    pub summary: Map<String, Value>,
    pub grouped_summary: BTreeMap<String, LeaderStats>,
}

/// Current local time in ISO-8601 form with microseconds.
pub(crate) fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode_rule(rule_key: &str, entry: &Value) -> Option<RuleResult> {
    match RuleResult::deserialize(entry) {
        Ok(rule) => Some(rule),
        Err(e) => {
            warn!("Skipping rule result '{}': {}", rule_key, e);
            None
        }
    }
}

/// Decodes a rule result container, which may be keyed by rule id or a list
/// of entries each carrying its own `rule_id`.
fn decode_rule_results(container: Option<&Value>) -> BTreeMap<String, RuleResult> {
    let mut rules = BTreeMap::new();

    match container {
        Some(Value::Object(map)) => {
            for (rule_id, entry) in map {
                if let Some(rule) = decode_rule(rule_id, entry) {
                    rules.insert(rule_id.clone(), rule);
                }
            }
        }
        Some(Value::Array(items)) => {
            for (idx, item) in items.iter().enumerate() {
                let Some(rule) = decode_rule(&format!("#{idx}"), item) else {
                    continue;
                };
                match rule.rule_id.clone() {
                    Some(rule_id) => {
                        rules.insert(rule_id, rule);
                    }
                    None => debug!("Dropping listed rule result #{} without rule_id", idx),
                }
            }
        }
        None | Some(Value::Null) => {}
        Some(other) => warn!(
            "Ignoring rule results with unexpected shape: {}",
            type_name(other)
        ),
    }

    rules
}

fn decode_grouped_summary(container: Option<&Value>) -> BTreeMap<String, LeaderStats> {
    let mut grouped = BTreeMap::new();

    match container {
        Some(Value::Object(map)) => {
            for (leader, stats) in map {
                match LeaderStats::deserialize(stats) {
                    Ok(stats) => {
                        grouped.insert(leader.clone(), stats);
                    }
                    Err(e) => warn!("Skipping grouped summary for '{}': {}", leader, e),
                }
            }
        }
        None | Some(Value::Null) => {}
        Some(other) => warn!(
            "Ignoring grouped_summary with unexpected shape: {}",
            type_name(other)
        ),
    }

    grouped
}

/// Standardizes a raw validation result document.
///
/// - A missing or `null` timestamp becomes the current time; non-string
///   timestamps are stringified.
/// - A missing `analytic_id` is taken from `id`.
/// - When `rule_results` is absent or empty, legacy `results` (list or map)
///   are used instead.
///
/// # Examples
///
/// ```
/// use qa_analytics::parsing::result_parser::standardize_result_format;
/// use serde_json::json;
///
/// let raw = json!({"id": "x", "results": [{"rule_id": "r1", "gc_count": 3}]});
/// let result = standardize_result_format(&raw);
///
/// assert_eq!(result.analytic_id.as_deref(), Some("x"));
/// assert_eq!(result.rule_results["r1"].gc_count, Some(3));
/// ```
pub fn standardize_result_format(raw: &Value) -> StandardizedResult {
    let empty = Map::new();
    let obj = match raw {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => {
            warn!(
                "Result document is a {}, not an object; using defaults",
                type_name(other)
            );
            &empty
        }
    };

    let analytic_id = obj
        .get("analytic_id")
        .and_then(scalar_to_string)
        .or_else(|| obj.get("id").and_then(scalar_to_string));

    let timestamp = match obj.get("timestamp") {
        None | Some(Value::Null) => now_iso(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let mut rule_results = decode_rule_results(obj.get("rule_results"));
    if rule_results.is_empty() && obj.contains_key("results") {
        rule_results = decode_rule_results(obj.get("results"));
    }

    let summary = match obj.get("summary") {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    StandardizedResult {
        analytic_id,
        status: obj.get("status").and_then(scalar_to_string),
        timestamp,
        rule_results,
        summary,
        grouped_summary: decode_grouped_summary(obj.get("grouped_summary")),
    }
}

/// Standardizes a batch of raw documents, preserving order.
pub fn standardize_all(raw_results: &[Value]) -> Vec<StandardizedResult> {
    raw_results.iter().map(standardize_result_format).collect()
}
