//! Turns a raw observation table into an all-numeric one.

use crate::observations::{DATE_COLUMN, STATION_COLUMN};
use polars::prelude::*;

/// Drops the station identifier and casts every measurement column to
/// `Float32`.
///
/// The cast is non-strict: anything that does not parse as a number (trace
/// markers, stray text) becomes null instead of failing.
pub fn clean(table: DataFrame) -> PolarsResult<DataFrame> {
    let measurements: Vec<Expr> = table
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != STATION_COLUMN && name.as_str() != DATE_COLUMN)
        .map(|name| col(name.clone()).cast(DataType::Float32))
        .collect();

    let mut selection = Vec::with_capacity(measurements.len() + 1);
    if table.column(DATE_COLUMN).is_ok() {
        selection.push(col(DATE_COLUMN));
    }
    selection.extend(measurements);

    table.lazy().select(selection).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::loader::parse_observation_csv;
    use crate::observations::loader::tests::DEN_CSV;

    #[test]
    fn test_clean_drops_identifier_and_keeps_index() -> PolarsResult<()> {
        let raw = parse_observation_csv(DEN_CSV.as_bytes(), "DEN").expect("fixture parses");
        let cleaned = clean(raw.clone())?;

        assert!(cleaned.column(STATION_COLUMN).is_err());
        assert_eq!(cleaned.column(DATE_COLUMN)?.dtype(), &DataType::Date);
        assert_eq!(cleaned.width(), raw.width() - 1);
        assert_eq!(cleaned.height(), raw.height());
        Ok(())
    }

    #[test]
    fn test_clean_casts_every_measurement_to_f32() -> PolarsResult<()> {
        let raw = parse_observation_csv(DEN_CSV.as_bytes(), "DEN").expect("fixture parses");
        let cleaned = clean(raw)?;

        for column in cleaned.get_columns() {
            if column.name().as_str() != DATE_COLUMN {
                assert_eq!(column.dtype(), &DataType::Float32, "column {}", column.name());
            }
        }
        Ok(())
    }

    #[test]
    fn test_clean_turns_text_into_missing() -> PolarsResult<()> {
        let raw = df!(
            "station" => ["DEN", "DEN", "DEN"],
            "precip_in" => ["0.25", "T", "oops"],
            "snow_in" => [Some("1.5"), None, Some("2")],
        )?;
        let cleaned = clean(raw)?;

        let precip: Vec<Option<f32>> = cleaned.column("precip_in")?.f32()?.into_iter().collect();
        assert_eq!(precip, vec![Some(0.25), None, None]);

        let snow: Vec<Option<f32>> = cleaned.column("snow_in")?.f32()?.into_iter().collect();
        assert_eq!(snow, vec![Some(1.5), None, Some(2.0)]);
        Ok(())
    }

    #[test]
    fn test_clean_empty_table_stays_empty() -> PolarsResult<()> {
        let raw = df!(
            "station" => Vec::<String>::new(),
            "max_temp_f" => Vec::<i64>::new(),
        )?;
        let cleaned = clean(raw)?;
        assert_eq!(cleaned.height(), 0);
        assert_eq!(cleaned.column("max_temp_f")?.dtype(), &DataType::Float32);
        Ok(())
    }
}
