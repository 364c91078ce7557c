//! This module provides the main entry point: the [`Climo`] client, which
//! runs the fetch -> clean -> select -> build pipeline for one calendar day
//! at one station.

use crate::config::ClimoConfig;
use crate::dashboard::DashboardState;
use crate::error::ClimoError;
use crate::filtering::{select_day, DaySlice};
use crate::observations::frame_fetcher::FrameFetcher;
use crate::observations::loader::{ObservationLoader, ObservationSource};
use crate::observations::preprocess::clean;
use crate::render::view::{build_view, RenderedView};
use crate::stations::directory::{StationDirectory, StationDirectoryLoader, StationSource};
use crate::stations::networks::default_networks;
use crate::types::station::StationEntry;
use crate::types::variable::WeatherVariable;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::DataFrame;
use reqwest::Client;
use std::sync::Arc;

/// The main client for building daily climatology views.
///
/// Observation tables and station lists are memoized for the lifetime of
/// the client, so repeated requests for the same parameters do not hit the
/// network again.
///
/// # Examples
///
/// ```no_run
/// # use climo::{Climo, ClimoError, WeatherVariable};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), ClimoError> {
/// let climo = Climo::new()?;
/// let view = climo
///     .view()
///     .date(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())
///     .network("CO_ASOS")
///     .station("DEN")
///     .variable(WeatherVariable::MaxTempF)
///     .call()
///     .await?;
/// println!("{}", view.title());
/// # Ok(())
/// # }
/// ```
pub struct Climo {
    config: ClimoConfig,
    fetcher: FrameFetcher,
    directory: StationDirectory,
}

#[bon]
impl Climo {
    /// Creates a client talking to the public IEM endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ClimoError::HttpClient`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ClimoError> {
        Self::with_config(ClimoConfig::default())
    }

    /// Creates a client with custom endpoints and rendering settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClimoError::HttpClient`] if the HTTP client cannot be built.
    pub fn with_config(config: ClimoConfig) -> Result<Self, ClimoError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ClimoError::HttpClient)?;
        let observations = Arc::new(ObservationLoader::new(&config, client.clone()));
        let stations = Arc::new(StationDirectoryLoader::new(&config, client));
        Ok(Self::with_sources(config, observations, stations))
    }

    /// Creates a client over arbitrary data sources.
    pub fn with_sources(
        config: ClimoConfig,
        observations: Arc<dyn ObservationSource>,
        stations: Arc<dyn StationSource>,
    ) -> Self {
        Self {
            config,
            fetcher: FrameFetcher::new(observations),
            directory: StationDirectory::new(stations),
        }
    }

    pub fn config(&self) -> &ClimoConfig {
        &self.config
    }

    /// Every selectable network, one per region.
    pub fn networks(&self) -> Vec<String> {
        default_networks(&self.config.network_token)
    }

    /// Stations of `network`, memoized per network.
    ///
    /// # Errors
    ///
    /// Returns [`ClimoError::StationDirectory`] if the listing cannot be
    /// fetched or parsed.
    pub async fn stations(&self, network: &str) -> Result<Vec<StationEntry>, ClimoError> {
        Ok(self.directory.list_stations(network).await?)
    }

    /// The raw observation table from the start year through `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ClimoError::DataUnavailable`] on any transport or parse
    /// failure. There are no retries.
    #[builder]
    pub async fn observations(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
    ) -> Result<DataFrame, ClimoError> {
        self.fetcher
            .get_cached_frame(date, network, station)
            .await
            .map_err(|source| ClimoError::DataUnavailable {
                network: network.to_string(),
                station: station.to_string(),
                source,
            })
    }

    /// The cleaned rows for `date`'s month and day across every year.
    #[builder]
    pub async fn day_slice(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
    ) -> Result<DaySlice, ClimoError> {
        let table = self
            .observations()
            .date(date)
            .network(network)
            .station(station)
            .call()
            .await?;
        let cleaned = clean(table)?;
        let slice = select_day(date, &cleaned)?;
        debug!(
            "Selected {} rows for {} at {}/{}",
            slice.height(),
            date.format("%m-%d"),
            network,
            station
        );
        Ok(slice)
    }

    /// Runs the full pipeline and builds the view for `variable`.
    #[builder]
    pub async fn view(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
        variable: WeatherVariable,
    ) -> Result<RenderedView, ClimoError> {
        let slice = self
            .day_slice()
            .date(date)
            .network(network)
            .station(station)
            .call()
            .await?;
        Ok(build_view()
            .date(date)
            .network(network)
            .station(station)
            .slice(&slice)
            .variable(variable)
            .config(&self.config)
            .call()?)
    }

    /// The view for a dashboard state.
    pub async fn render(&self, state: &DashboardState) -> Result<RenderedView, ClimoError> {
        self.view()
            .date(state.date)
            .network(&state.network)
            .station(&state.station)
            .variable(state.variable)
            .call()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::frame_fetcher::tests::CountingSource;
    use crate::render::view::tests::QUARTET_CSV;
    use crate::stations::directory::tests::FakeStations;
    use crate::types::year_value::YearValue;

    fn test_client(source: Arc<CountingSource>) -> Climo {
        Climo::with_sources(
            ClimoConfig::default(),
            source,
            Arc::new(FakeStations::new(&[("CO_ASOS", &[("DEN", "Denver")])])),
        )
    }

    fn july_4th() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    #[tokio::test]
    async fn test_view_runs_the_pipeline() -> Result<(), ClimoError> {
        let climo = test_client(Arc::new(CountingSource::new(QUARTET_CSV)));
        let view = climo
            .view()
            .date(july_4th())
            .network("CO_ASOS")
            .station("DEN")
            .variable(WeatherVariable::MaxTempF)
            .call()
            .await?;

        let stats = view.stats().expect("quartet has data");
        assert_eq!(stats.percentile, 75.0);
        assert_eq!(stats.current, YearValue::new(2024, 40.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_day_slice_excludes_other_days() -> Result<(), ClimoError> {
        let climo = test_client(Arc::new(CountingSource::new(QUARTET_CSV)));
        let slice = climo
            .day_slice()
            .date(july_4th())
            .network("CO_ASOS")
            .station("DEN")
            .call()
            .await?;
        assert_eq!(slice.height(), 4);
        assert!(slice.frame.column("station").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_failure_is_data_unavailable() {
        let climo = test_client(Arc::new(CountingSource::new("not,a\ncsv")));
        let err = climo
            .observations()
            .date(july_4th())
            .network("CO_ASOS")
            .station("DEN")
            .call()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClimoError::DataUnavailable { ref network, ref station, .. }
                if network == "CO_ASOS" && station == "DEN"
        ));
    }

    #[tokio::test]
    async fn test_variables_share_one_fetch() -> Result<(), ClimoError> {
        let source = Arc::new(CountingSource::new(QUARTET_CSV));
        let climo = test_client(source.clone());
        for variable in [WeatherVariable::MaxTempF, WeatherVariable::PrecipIn] {
            climo
                .view()
                .date(july_4th())
                .network("CO_ASOS")
                .station("DEN")
                .variable(variable)
                .call()
                .await?;
        }
        assert_eq!(source.calls(), 1);
        Ok(())
    }

    #[test]
    fn test_networks_use_configured_token() {
        let climo = Climo::with_sources(
            ClimoConfig::builder().network_token("COOP").build(),
            Arc::new(CountingSource::new(QUARTET_CSV)),
            Arc::new(FakeStations::new(&[])),
        );
        assert!(climo.networks().contains(&"IA_COOP".to_string()));
    }
}
