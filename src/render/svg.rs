//! SVG charts for a [`ClimatologyView`], drawn with plotters.

use crate::error::ClimoError;
use crate::render::view::{format_value, ClimatologyView};
use plotters::prelude::*;

const SIZE: (u32, u32) = (720, 360);
const CURRENT: RGBColor = RGBColor(192, 57, 43);
const BARS: RGBColor = RGBColor(158, 202, 225);

fn axis_title(view: &ClimatologyView) -> String {
    format!("{} ({})", view.variable.label(), view.variable.unit())
}

/// Histogram of the day's readings with markers at the mean and at the
/// current reading.
pub fn histogram_svg(view: &ClimatologyView) -> Result<String, ClimoError> {
    let mut svg = String::new();
    draw_histogram(view, &mut svg)?;
    Ok(svg)
}

fn draw_histogram<'a>(view: &ClimatologyView, svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let Some((lo, hi)) = view.histogram.range() else {
        return root.present();
    };
    let y_max = view.histogram.max_count().max(1) as f64 * 1.15;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram of {}", view.variable.label()), ("sans-serif", 16))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(40)
        .build_cartesian_2d(lo..hi, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc(axis_title(view))
        .y_desc("Years")
        .draw()?;

    chart.draw_series(view.histogram.bins.iter().map(|bin| {
        Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], BARS.filled())
    }))?;

    let mean = view.stats.mean;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(mean, 0.0), (mean, y_max)],
            BLACK.stroke_width(2),
        )))?
        .label(format!("mean {}", format_value(mean, view.variable)))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    let current = view.stats.current;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(current.value, 0.0), (current.value, y_max)],
            CURRENT.stroke_width(2),
        )))?
        .label(format!(
            "{}: {}",
            current.year,
            format_value(current.value, view.variable)
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], CURRENT.stroke_width(2)));
    chart.draw_series(std::iter::once(Text::new(
        current.year.to_string(),
        (current.value, y_max * 0.97),
        ("sans-serif", 12).into_font().color(&CURRENT),
    )))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()
}

/// One density curve per era, overlaid, with a legend.
pub fn density_svg(view: &ClimatologyView) -> Result<String, ClimoError> {
    let mut svg = String::new();
    draw_densities(view, &mut svg)?;
    Ok(svg)
}

fn draw_densities<'a>(view: &ClimatologyView, svg: &'a mut String) -> DrawResult<(), SVGBackend<'a>> {
    let root = SVGBackend::with_string(svg, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let points = view.densities.iter().flat_map(|d| d.points.iter());
    let (lo, hi, top) = points.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0f64),
        |(lo, hi, top), p| (lo.min(p.x), hi.max(p.x), top.max(p.y)),
    );
    if !lo.is_finite() || !hi.is_finite() || hi <= lo || top <= 0.0 {
        root.draw(&Text::new(
            "Not enough readings per era for a density estimate",
            (SIZE.0 as i32 / 2 - 170, SIZE.1 as i32 / 2),
            ("sans-serif", 14),
        ))?;
        return root.present();
    }

    let y_max = top * 1.1;
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Density of {} by era", view.variable.label()), ("sans-serif", 16))
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(48)
        .build_cartesian_2d(lo..hi, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc(axis_title(view))
        .y_desc("Density")
        .draw()?;

    for (i, density) in view.densities.iter().enumerate() {
        let color = Palette99::pick(i);
        chart
            .draw_series(LineSeries::new(
                density.points.iter().map(|p| (p.x, p.y)),
                color.stroke_width(2),
            ))?
            .label(format!("{} (n={})", density.era, density.count))
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(i).stroke_width(2))
            });
    }

    let current = view.stats.current;
    if (lo..=hi).contains(&current.value) {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(current.value, 0.0), (current.value, y_max)],
            CURRENT.stroke_width(2),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            current.year.to_string(),
            (current.value, y_max * 0.97),
            ("sans-serif", 12).into_font().color(&CURRENT),
        )))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()
}
