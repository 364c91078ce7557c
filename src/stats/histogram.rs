use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram over the observed range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width intervals spanning their range.
    /// Intervals are half-open except the last, which includes the maximum.
    /// A range of zero width collapses into a single unit-wide bin.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let (min, max) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        if max == min {
            let count = values.iter().filter(|v| v.is_finite()).count();
            return Some(Histogram {
                bins: vec![HistogramBin {
                    start: min - 0.5,
                    end: max + 0.5,
                    count,
                }],
            });
        }

        let n_bins = bins.max(1);
        let width = (max - min) / n_bins as f64;
        let mut counts = vec![0usize; n_bins];
        for value in values.iter().copied().filter(|v| v.is_finite()) {
            let index = (((value - min) / width) as usize).min(n_bins - 1);
            counts[index] += 1;
        }

        Some(Histogram {
            bins: counts
                .into_iter()
                .enumerate()
                .map(|(i, count)| HistogramBin {
                    start: min + width * i as f64,
                    end: if i + 1 == n_bins {
                        max
                    } else {
                        min + width * (i + 1) as f64
                    },
                    count,
                })
                .collect(),
        })
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Lower edge of the first bin and upper edge of the last.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.start, self.bins.last()?.end))
    }
}
