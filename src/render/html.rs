//! Self-contained HTML page for a [`RenderedView`].

use crate::render::svg::{density_svg, histogram_svg};
use crate::render::view::{format_value, ClimatologyView, NoDataView, RenderedView};
use crate::error::ClimoError;
use std::fmt::{self, Write};

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:760px;color:#222}
h1{font-size:1.4rem}
.readouts{display:flex;flex-wrap:wrap;gap:.75rem;margin:1rem 0}
.readout{border:1px solid #ddd;border-radius:6px;padding:.5rem .75rem;min-width:6rem}
.readout .label{font-size:.75rem;color:#666}
.readout .value{font-size:1.2rem;font-weight:600}
.no-data{border:1px solid #e0b4b4;background:#fff6f6;padding:1rem;border-radius:6px}
table{border-collapse:collapse;margin-top:1rem}
td,th{padding:.2rem .8rem;border-bottom:1px solid #eee;text-align:right}
";

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(view: &RenderedView) -> Result<String, ClimoError> {
    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(
        out,
        "<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{STYLE}</style></head><body>",
        escape(view.title())
    )?;
    writeln!(out, "<h1>{}</h1>", escape(view.title()))?;

    match view {
        RenderedView::Climatology(view) => climatology_body(&mut out, view)?,
        RenderedView::NoData(view) => no_data_body(&mut out, view)?,
    }

    writeln!(out, "</body></html>")?;
    Ok(out)
}

fn climatology_body(out: &mut String, view: &ClimatologyView) -> Result<(), ClimoError> {
    writeln!(out, "<div class=\"readouts\">")?;
    for readout in &view.readouts {
        writeln!(
            out,
            "<div class=\"readout\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            escape(&readout.label),
            escape(&readout.value)
        )?;
    }
    writeln!(out, "</div>")?;

    writeln!(out, "<h2>Distribution</h2>")?;
    out.push_str(&histogram_svg(view)?);
    writeln!(out, "<h2>By era</h2>")?;
    out.push_str(&density_svg(view)?);

    writeln!(
        out,
        "<h2>Readings</h2><table><thead><tr><th>Year</th><th>Era</th><th>{}</th></tr></thead><tbody>",
        escape(view.variable.label())
    )?;
    for row in &view.table {
        let class = if row.year == view.stats.current.year {
            " class=\"current\""
        } else {
            ""
        };
        writeln!(
            out,
            "<tr{class}><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.year,
            row.era,
            escape(&format_value(row.value, view.variable))
        )?;
    }
    writeln!(out, "</tbody></table>")?;
    Ok(())
}

fn no_data_body(out: &mut String, view: &NoDataView) -> fmt::Result {
    writeln!(
        out,
        "<div class=\"no-data\"><p>{}</p><p>{} row(s) found for this calendar day at {} ({}).</p></div>",
        escape(&view.message),
        view.rows_for_day,
        escape(&view.station),
        escape(&view.network)
    )
}
