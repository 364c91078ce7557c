use crate::types::year_value::YearValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A fixed-width span of years, aligned to multiples of its width
/// (e.g. 1940-1959 for a width of 20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EraBucket {
    pub start: i32,
    /// Inclusive.
    pub end: i32,
}

impl EraBucket {
    pub fn for_year(year: i32, width: u16) -> Self {
        let width = i32::from(width.max(1));
        let start = year - year.rem_euclid(width);
        Self {
            start,
            end: start + width - 1,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for EraBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Groups readings by era, oldest era first. Eras without readings are
/// not returned.
pub fn group_by_era(values: &[YearValue], width: u16) -> Vec<(EraBucket, Vec<YearValue>)> {
    let mut groups: BTreeMap<EraBucket, Vec<YearValue>> = BTreeMap::new();
    for value in values {
        groups
            .entry(EraBucket::for_year(value.year, width))
            .or_default()
            .push(*value);
    }
    groups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_alignment() {
        assert_eq!(EraBucket::for_year(1959, 20), EraBucket { start: 1940, end: 1959 });
        assert_eq!(EraBucket::for_year(1960, 20), EraBucket { start: 1960, end: 1979 });
        assert_eq!(EraBucket::for_year(2024, 10), EraBucket { start: 2020, end: 2029 });
        assert!(EraBucket::for_year(1933, 10).contains(1930));
    }

    #[test]
    fn test_zero_width_is_single_year() {
        let bucket = EraBucket::for_year(1987, 0);
        assert_eq!(bucket, EraBucket { start: 1987, end: 1987 });
        assert_eq!(bucket.to_string(), "1987");
    }

    #[test]
    fn test_label() {
        assert_eq!(EraBucket::for_year(2001, 20).to_string(), "2000-2019");
    }

    #[test]
    fn test_group_by_era_omits_empty_buckets() {
        let values = vec![
            YearValue::new(1931, 1.0),
            YearValue::new(1938, 2.0),
            YearValue::new(1990, 3.0),
            YearValue::new(2024, 4.0),
        ];
        let groups = group_by_era(&values, 20);
        let eras: Vec<String> = groups.iter().map(|(era, _)| era.to_string()).collect();
        assert_eq!(eras, vec!["1920-1939", "1980-1999", "2020-2039"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups.iter().map(|(_, v)| v.len()).sum::<usize>(), values.len());
    }
}
