use crate::types::year_value::YearValue;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of one calendar day's historical readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Lowest reading and the first year it occurred.
    pub min: YearValue,
    /// Highest reading and the first year it occurred.
    pub max: YearValue,
    /// The most recent reading, compared against the rest.
    pub current: YearValue,
    /// Share of readings strictly below `current`, as 0-100.
    pub percentile: f64,
}

impl SummaryStats {
    /// Computes the statistics over chronologically ordered readings.
    /// Returns `None` when there is nothing to summarize.
    pub fn compute(values: &[YearValue]) -> Option<Self> {
        let current = *values.last()?;
        let count = values.len();

        let mean = values.iter().map(|yv| yv.value).sum::<f64>() / count as f64;

        let mut sorted: Vec<OrderedFloat<f64>> =
            values.iter().map(|yv| OrderedFloat(yv.value)).collect();
        sorted.sort();
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1].0 + sorted[count / 2].0) / 2.0
        } else {
            sorted[count / 2].0
        };

        let min = *values.iter().min_by_key(|yv| OrderedFloat(yv.value))?;
        // max_by_key keeps the last of equal elements, so walk backwards to report the earliest year.
        let max = *values.iter().rev().max_by_key(|yv| OrderedFloat(yv.value))?;

        let percentile = percentile_rank(current.value, values.iter().map(|yv| yv.value))?;

        Some(SummaryStats {
            count,
            mean,
            median,
            min,
            max,
            current,
            percentile,
        })
    }

    /// Percentile rank rounded for display.
    pub fn percentile_rounded(&self) -> u32 {
        self.percentile.round() as u32
    }
}

/// Percentage of `values` strictly less than `target`. Ties do not count.
/// `None` for an empty population.
pub fn percentile_rank(target: f64, values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (below, total) = values
        .into_iter()
        .fold((0usize, 0usize), |(below, total), value| {
            (below + usize::from(value < target), total + 1)
        });
    if total == 0 {
        return None;
    }
    Some(100.0 * below as f64 / total as f64)
}
