use serde::{Deserialize, Serialize};

/// A single historical reading: the value observed on the target calendar
/// day in `year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

impl YearValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}
