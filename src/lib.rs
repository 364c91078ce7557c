mod climo;
mod config;
mod dashboard;
mod error;
mod filtering;
mod observations;
mod render;
mod stations;
mod stats;
mod types;

pub use climo::*;
pub use config::*;
pub use dashboard::*;
pub use error::ClimoError;

pub use filtering::{select_day, DayOfYearFilterExt, DaySlice, YEAR_COLUMN};

pub use observations::error::ObservationError;
pub use observations::frame_fetcher::FrameFetcher;
pub use observations::loader::{observation_url, ObservationLoader, ObservationSource};
pub use observations::preprocess::clean;
pub use observations::{DATE_COLUMN, STATION_COLUMN};

pub use stations::directory::{
    station_directory_url, StationDirectory, StationDirectoryLoader, StationSource,
};
pub use stations::error::StationDirectoryError;
pub use stations::networks::{default_networks, network_name, REGION_CODES};

pub use stats::density::{gaussian_kde, linspace, scott_bandwidth};
pub use stats::era::{group_by_era, EraBucket};
pub use stats::histogram::{Histogram, HistogramBin};
pub use stats::summary::{percentile_rank, SummaryStats};

pub use render::html::{escape, render_page};
pub use render::svg::{density_svg, histogram_svg};
pub use render::view::{
    build_view, format_value, ClimatologyView, DensityPoint, EraDensity, NoDataView, Readout,
    RenderedView, TableRow,
};
#[cfg(feature = "plotting")]
pub use render::plotly::{era_frame, write_era_histogram};

pub use types::station::StationEntry;
pub use types::variable::WeatherVariable;
pub use types::year_value::YearValue;
