//! Small descriptive statistics shared by the aggregation stages.

use std::cmp::Ordering;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor `n`), `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Percentile rank of each value in `[0, 1]`, ties sharing their average rank.
///
/// Missing values get no rank and do not count towards the population.
///
/// ```
/// use qa_analytics::services::stats::percentile_ranks;
///
/// let ranks = percentile_ranks(&[Some(3.5), Some(1.0), None, Some(1.0)]);
/// assert_eq!(ranks, vec![Some(1.0), Some(0.5), None, Some(0.5)]);
/// ```
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut present: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|v| (idx, v)))
        .collect();
    present.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let n = present.len();
    let mut ranks = vec![None; values.len()];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && present[end].1 == present[start].1 {
            end += 1;
        }
        // 1-based positions start+1..=end share their average
        let average = (start + 1 + end) as f64 / 2.0;
        for (idx, _) in &present[start..end] {
            ranks[*idx] = Some(average / n as f64);
        }
        start = end;
    }
    ranks
}
