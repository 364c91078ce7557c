use chrono::NaiveDate;
use climo::{
    build_view, clean, select_day, ClimoConfig, DaySlice, SummaryStats, WeatherVariable,
    YearValue,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;

/// A century of daily rows with a deterministic wobble.
fn synthetic_table() -> DataFrame {
    let start = NaiveDate::from_ymd_opt(1925, 1, 1).unwrap();
    let days: Vec<NaiveDate> = start.iter_days().take(365 * 100).collect();
    let highs: Vec<f64> = (0..days.len())
        .map(|i| 50.0 + 30.0 * ((i as f64) / 58.1).sin() + (i % 17) as f64)
        .collect();
    let stations = vec!["DEN"; days.len()];
    df!(
        "station" => stations,
        "day" => days,
        "max_temp_f" => highs,
    )
    .unwrap()
}

fn july_4th() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
}

fn bench_climatology(c: &mut Criterion) {
    let table = synthetic_table();
    let cleaned = clean(table.clone()).unwrap();
    let slice: DaySlice = select_day(july_4th(), &cleaned).unwrap();
    let values: Vec<YearValue> = slice.values(WeatherVariable::MaxTempF).unwrap();
    let config = ClimoConfig::default();

    c.bench_function("clean_and_select_day", |b| {
        b.iter(|| {
            let cleaned = clean(black_box(table.clone())).unwrap();
            select_day(july_4th(), &cleaned).unwrap()
        })
    });
    c.bench_function("summary_stats", |b| {
        b.iter(|| SummaryStats::compute(black_box(&values)))
    });
    c.bench_function("build_view", |b| {
        b.iter(|| {
            build_view()
                .date(july_4th())
                .network("CO_ASOS")
                .station("DEN")
                .slice(black_box(&slice))
                .variable(WeatherVariable::MaxTempF)
                .config(&config)
                .call()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_climatology);
criterion_main!(benches);
