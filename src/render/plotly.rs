//! Interactive plotly export of a day's readings, grouped by era.
//!
//! Only built with the `plotting` feature.

use crate::render::view::ClimatologyView;
use plotlars::{Histogram, Legend, Plot, Rgb, Text};
use polars::prelude::*;
use std::path::Path;

/// Readings and their era labels as a two-column frame.
pub fn era_frame(view: &ClimatologyView) -> PolarsResult<DataFrame> {
    let values: Vec<f64> = view.table.iter().map(|row| row.value).collect();
    let eras: Vec<String> = view.table.iter().map(|row| row.era.to_string()).collect();
    df!(
        "value" => values,
        "era" => eras,
    )
}

/// Writes an overlaid histogram per era to `path` as a standalone HTML file.
pub fn write_era_histogram(view: &ClimatologyView, path: &Path) -> PolarsResult<()> {
    let frame = era_frame(view)?;
    let x_title = format!("{} ({})", view.variable.label(), view.variable.unit());

    Histogram::builder()
        .data(&frame)
        .x("value")
        .group("era")
        .opacity(0.5)
        .colors(vec![
            Rgb(76, 114, 176),
            Rgb(221, 132, 82),
            Rgb(85, 168, 104),
            Rgb(196, 78, 82),
            Rgb(129, 114, 179),
        ])
        .plot_title(Text::from(view.title.as_str()).font("Arial").size(18))
        .x_title(x_title.as_str())
        .y_title("Years")
        .legend(&Legend::new().x(0.9).y(0.9))
        .build()
        .write_html(path.to_string_lossy().to_string());

    Ok(())
}
