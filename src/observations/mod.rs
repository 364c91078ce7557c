//! Fetching and cleaning the daily observation table.

pub mod error;
pub mod frame_fetcher;
pub mod loader;
pub mod preprocess;

/// Date index column of the daily summary CSV.
pub const DATE_COLUMN: &str = "day";
/// Station identifier column, dropped during cleaning.
pub const STATION_COLUMN: &str = "station";
