use crate::observations::DATE_COLUMN;
use crate::types::variable::WeatherVariable;
use crate::types::year_value::YearValue;
use chrono::{Datelike, NaiveDate};
use polars::prelude::{col, lit, DataFrame, DataType, IntoLazy, LazyFrame, PolarsResult, SortMultipleOptions};

/// Year of each row, added when a slice is selected.
pub const YEAR_COLUMN: &str = "year";

pub trait DayOfYearFilterExt {
    /// Keeps rows whose `day` falls on the month and day-of-month of `date`,
    /// in any year. Assumes `day` is a `Date` column.
    fn filter_day_of_year(self, date: NaiveDate) -> LazyFrame;
}

impl DayOfYearFilterExt for LazyFrame {
    fn filter_day_of_year(self, date: NaiveDate) -> LazyFrame {
        self.filter(
            col(DATE_COLUMN)
                .dt()
                .month()
                .eq(lit(date.month() as i32))
                .and(col(DATE_COLUMN).dt().day().eq(lit(date.day() as i32))),
        )
    }
}

/// The rows of a cleaned table falling on one calendar day, one per year,
/// oldest first.
#[derive(Debug, Clone)]
pub struct DaySlice {
    /// The day the slice was selected for.
    pub date: NaiveDate,
    pub frame: DataFrame,
}

impl DaySlice {
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Non-missing readings of `variable`, in chronological order.
    ///
    /// A variable absent from the table yields no readings rather than an
    /// error, since the upstream column set varies by network.
    pub fn values(&self, variable: WeatherVariable) -> PolarsResult<Vec<YearValue>> {
        let Ok(values) = self.frame.column(variable.column()) else {
            return Ok(Vec::new());
        };
        let values = values.cast(&DataType::Float64)?;
        let years = self.frame.column(YEAR_COLUMN)?;

        Ok(years
            .i32()?
            .into_iter()
            .zip(values.f64()?.into_iter())
            .filter_map(|pair| match pair {
                (Some(year), Some(value)) if value.is_finite() => Some(YearValue::new(year, value)),
                _ => None,
            })
            .collect())
    }
}

/// Selects every row of `cleaned` matching the month/day of `date`.
pub fn select_day(date: NaiveDate, cleaned: &DataFrame) -> PolarsResult<DaySlice> {
    let frame = cleaned
        .clone()
        .lazy()
        .filter_day_of_year(date)
        .with_column(col(DATE_COLUMN).dt().year().alias(YEAR_COLUMN))
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()?;

    Ok(DaySlice { date, frame })
}
