//! Builds the renderable description of one calendar day's climatology.
//!
//! The view is plain data: the HTML renderer, the JSON output and any
//! other front end all draw from the same [`RenderedView`].

use crate::config::ClimoConfig;
use crate::filtering::DaySlice;
use crate::stats::density::{gaussian_kde, linspace};
use crate::stats::era::{group_by_era, EraBucket};
use crate::stats::histogram::Histogram;
use crate::stats::summary::SummaryStats;
use crate::types::variable::WeatherVariable;
use crate::types::year_value::YearValue;
use bon::builder;
use chrono::NaiveDate;
use polars::prelude::PolarsResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityPoint {
    pub x: f64,
    pub y: f64,
}

/// Kernel density of the readings falling in one era.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EraDensity {
    pub era: EraBucket,
    pub count: usize,
    pub points: Vec<DensityPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub year: i32,
    pub era: EraBucket,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimatologyView {
    pub title: String,
    pub date: NaiveDate,
    pub network: String,
    pub station: String,
    pub variable: WeatherVariable,
    pub stats: SummaryStats,
    pub histogram: Histogram,
    /// One curve per era with enough spread to estimate; oldest first.
    pub densities: Vec<EraDensity>,
    /// Readings in chronological order.
    pub table: Vec<TableRow>,
    pub readouts: Vec<Readout>,
}

/// Shown instead of statistics when the day has no usable readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoDataView {
    pub title: String,
    pub date: NaiveDate,
    pub network: String,
    pub station: String,
    pub variable: WeatherVariable,
    /// Rows found for the calendar day before dropping missing values.
    pub rows_for_day: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderedView {
    Climatology(ClimatologyView),
    NoData(NoDataView),
}

impl RenderedView {
    pub fn title(&self) -> &str {
        match self {
            RenderedView::Climatology(view) => &view.title,
            RenderedView::NoData(view) => &view.title,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, RenderedView::NoData(_))
    }

    pub fn stats(&self) -> Option<&SummaryStats> {
        match self {
            RenderedView::Climatology(view) => Some(&view.stats),
            RenderedView::NoData(_) => None,
        }
    }
}

/// Formats a reading with the variable's unit, two decimals for inches and
/// one otherwise.
pub fn format_value(value: f64, variable: WeatherVariable) -> String {
    match variable.unit() {
        "in" => format!("{value:.2} in"),
        unit => format!("{value:.1} {unit}"),
    }
}

fn view_title(date: NaiveDate, station: &str, network: &str, variable: WeatherVariable) -> String {
    format!(
        "{} on {} at {} ({})",
        variable.label(),
        date.format("%B %-d"),
        station,
        network
    )
}

/// Turns a day slice into a view for `variable`.
///
/// Readings missing for `variable` are dropped first; if none remain the
/// result is [`RenderedView::NoData`].
#[builder]
pub fn build_view(
    date: NaiveDate,
    network: &str,
    station: &str,
    slice: &DaySlice,
    variable: WeatherVariable,
    config: &ClimoConfig,
) -> PolarsResult<RenderedView> {
    let title = view_title(date, station, network, variable);
    let values = slice.values(variable)?;

    let Some(stats) = SummaryStats::compute(&values) else {
        return Ok(RenderedView::NoData(NoDataView {
            title,
            date,
            network: network.to_string(),
            station: station.to_string(),
            variable,
            rows_for_day: slice.height(),
            message: format!(
                "No historical data for {} on {}",
                variable.label().to_lowercase(),
                date.format("%B %-d")
            ),
        }));
    };

    let raw: Vec<f64> = values.iter().map(|yv| yv.value).collect();
    // Non-empty values always produce a histogram.
    let histogram = Histogram::compute(&raw, config.histogram_bins).unwrap_or(Histogram {
        bins: Vec::new(),
    });

    let densities = era_densities(&values, &histogram, config);

    let table = values
        .iter()
        .map(|yv| TableRow {
            year: yv.year,
            era: EraBucket::for_year(yv.year, config.era_width),
            value: yv.value,
        })
        .collect();

    Ok(RenderedView::Climatology(ClimatologyView {
        title,
        date,
        network: network.to_string(),
        station: station.to_string(),
        variable,
        readouts: readouts(&stats, variable),
        stats,
        histogram,
        densities,
        table,
    }))
}

fn era_densities(values: &[YearValue], histogram: &Histogram, config: &ClimoConfig) -> Vec<EraDensity> {
    let Some((lo, hi)) = histogram.range() else {
        return Vec::new();
    };
    let pad = ((hi - lo) * 0.1).max(1.0);
    let grid = linspace(lo - pad, hi + pad, config.density_points);

    group_by_era(values, config.era_width)
        .into_iter()
        .filter_map(|(era, readings)| {
            let raw: Vec<f64> = readings.iter().map(|yv| yv.value).collect();
            let density = gaussian_kde(&raw, &grid)?;
            Some(EraDensity {
                era,
                count: readings.len(),
                points: grid
                    .iter()
                    .zip(density)
                    .map(|(&x, y)| DensityPoint { x, y })
                    .collect(),
            })
        })
        .collect()
}

fn readouts(stats: &SummaryStats, variable: WeatherVariable) -> Vec<Readout> {
    let readout = |label: &str, value: String| Readout {
        label: label.to_string(),
        value,
    };
    vec![
        readout("Percentile", format!("{}%", stats.percentile_rounded())),
        readout(
            &format!("Current ({})", stats.current.year),
            format_value(stats.current.value, variable),
        ),
        readout("Median", format_value(stats.median, variable)),
        readout("Mean", format_value(stats.mean, variable)),
        readout(
            &format!("Min ({})", stats.min.year),
            format_value(stats.min.value, variable),
        ),
        readout(
            &format!("Max ({})", stats.max.year),
            format_value(stats.max.value, variable),
        ),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::filtering::select_day;
    use crate::observations::loader::parse_observation_csv;
    use crate::observations::preprocess::clean;

    pub(crate) const QUARTET_CSV: &str = "\
station,day,max_temp_f,precip_in
DEN,2021-07-04,10,None
DEN,2021-07-05,99,0.00
DEN,2022-07-04,20,None
DEN,2023-07-04,30,None
DEN,2024-07-04,40,None
";

    pub(crate) fn slice_for(csv: &str, date: NaiveDate) -> DaySlice {
        let raw = parse_observation_csv(csv.as_bytes(), "DEN").expect("fixture parses");
        select_day(date, &clean(raw).expect("fixture cleans")).expect("fixture selects")
    }

    fn july_4th() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    fn view_for(variable: WeatherVariable) -> RenderedView {
        let slice = slice_for(QUARTET_CSV, july_4th());
        build_view()
            .date(july_4th())
            .network("CO_ASOS")
            .station("DEN")
            .slice(&slice)
            .variable(variable)
            .config(&ClimoConfig::default())
            .call()
            .expect("view builds")
    }

    #[test]
    fn test_view_statistics_for_quartet() {
        let RenderedView::Climatology(view) = view_for(WeatherVariable::MaxTempF) else {
            panic!("expected a climatology view");
        };

        assert_eq!(view.stats.count, 4);
        assert_eq!(view.stats.mean, 25.0);
        assert_eq!(view.stats.median, 25.0);
        assert_eq!(view.stats.max, YearValue::new(2024, 40.0));
        assert_eq!(view.stats.min, YearValue::new(2021, 10.0));
        assert_eq!(view.stats.percentile, 75.0);
        assert_eq!(view.title, "High temperature on July 4 at DEN (CO_ASOS)");

        let years: Vec<i32> = view.table.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024]);
        assert_eq!(view.histogram.total(), 4);
    }

    #[test]
    fn test_readouts_order_and_format() {
        let RenderedView::Climatology(view) = view_for(WeatherVariable::MaxTempF) else {
            panic!("expected a climatology view");
        };
        let labels: Vec<&str> = view.readouts.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Percentile", "Current (2024)", "Median", "Mean", "Min (2021)", "Max (2024)"]
        );
        assert_eq!(view.readouts[0].value, "75%");
        assert_eq!(view.readouts[1].value, "40.0 °F");
    }

    #[test]
    fn test_all_missing_variable_is_no_data() {
        let view = view_for(WeatherVariable::PrecipIn);
        assert!(view.is_no_data());
        assert!(view.stats().is_none());
        let RenderedView::NoData(no_data) = view else {
            unreachable!()
        };
        assert_eq!(no_data.rows_for_day, 4);
        assert!(no_data.message.contains("July 4"));
    }

    #[test]
    fn test_empty_slice_is_no_data() {
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let slice = slice_for(QUARTET_CSV, leap_day);
        let view = build_view()
            .date(leap_day)
            .network("CO_ASOS")
            .station("DEN")
            .slice(&slice)
            .variable(WeatherVariable::MaxTempF)
            .config(&ClimoConfig::default())
            .call()
            .unwrap();
        assert!(matches!(view, RenderedView::NoData(NoDataView { rows_for_day: 0, .. })));
    }

    #[test]
    fn test_densities_skip_sparse_eras() {
        let config = ClimoConfig::builder().era_width(2).build();
        let slice = slice_for(QUARTET_CSV, july_4th());
        let RenderedView::Climatology(view) = build_view()
            .date(july_4th())
            .network("CO_ASOS")
            .station("DEN")
            .slice(&slice)
            .variable(WeatherVariable::MaxTempF)
            .config(&config)
            .call()
            .unwrap()
        else {
            panic!("expected a climatology view");
        };

        // 2020-2021 and 2024-2025 hold a single reading each.
        let eras: Vec<String> = view.densities.iter().map(|d| d.era.to_string()).collect();
        assert_eq!(eras, vec!["2022-2023"]);
        assert_eq!(view.densities[0].points.len(), config.density_points);
    }

    #[test]
    fn test_format_value_precision() {
        assert_eq!(format_value(0.1234, WeatherVariable::PrecipIn), "0.12 in");
        assert_eq!(format_value(71.26, WeatherVariable::MaxTempF), "71.3 °F");
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let json = serde_json::to_value(view_for(WeatherVariable::PrecipIn)).unwrap();
        assert_eq!(json["kind"], "no_data");
        let json = serde_json::to_value(view_for(WeatherVariable::MaxTempF)).unwrap();
        assert_eq!(json["kind"], "climatology");
        assert_eq!(json["stats"]["percentile"], 75.0);
    }
}
