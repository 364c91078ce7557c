use crate::config::ClimoConfig;
use crate::observations::error::ObservationError;
use crate::observations::{DATE_COLUMN, STATION_COLUMN};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use log::{debug, info, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::task;

/// Anything able to produce the full daily observation table for one
/// station, from the configured start year through `date`.
#[async_trait]
pub trait ObservationSource: Send + Sync {
    async fn fetch(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
    ) -> Result<DataFrame, ObservationError>;
}

/// Builds the daily-summary request for `network`/`station` covering
/// January 1st of `start_year` through `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use climo::observation_url;
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
/// let url = observation_url("https://example.org/daily.py", "CO_ASOS", "DEN", 1928, date);
/// assert_eq!(
///     url,
///     "https://example.org/daily.py?network=CO_ASOS&stations=DEN&year1=1928&month1=1&day1=1&year2=2024&month2=7&day2=4"
/// );
/// ```
pub fn observation_url(
    base_url: &str,
    network: &str,
    station: &str,
    start_year: i32,
    date: NaiveDate,
) -> String {
    format!(
        "{base_url}?network={network}&stations={station}&year1={start_year}&month1=1&day1=1&year2={}&month2={}&day2={}",
        date.year(),
        date.month(),
        date.day()
    )
}

/// HTTP implementation of [`ObservationSource`] against the IEM daily service.
pub struct ObservationLoader {
    base_url: String,
    start_year: i32,
    download_client: Client,
}

impl ObservationLoader {
    pub fn new(config: &ClimoConfig, download_client: Client) -> ObservationLoader {
        ObservationLoader {
            base_url: config.observations_url.clone(),
            start_year: config.start_year,
            download_client,
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, ObservationError> {
        let response = self
            .download_client
            .get(url)
            .send()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ObservationError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    ObservationError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ObservationError::NetworkRequest(url.to_string(), e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ObservationSource for ObservationLoader {
    async fn fetch(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
    ) -> Result<DataFrame, ObservationError> {
        if network.trim().is_empty() || station.trim().is_empty() {
            return Err(ObservationError::EmptyIdentifier {
                network: network.to_string(),
                station: station.to_string(),
            });
        }

        let url = observation_url(&self.base_url, network, station, self.start_year, date);
        debug!("Requesting observations from {}", url);

        let raw_bytes = self.download(&url).await?;
        info!(
            "Downloaded {} bytes of observations for {}/{}",
            raw_bytes.len(),
            network,
            station
        );

        let station_owned = station.to_string();
        task::spawn_blocking(move || parse_observation_csv(&raw_bytes, &station_owned)).await?
    }
}

/// Parses a daily-summary CSV body (with header) into an observation table
/// sorted by `day`.
pub(crate) fn parse_observation_csv(
    bytes: &[u8],
    station: &str,
) -> Result<DataFrame, ObservationError> {
    let csv_io = |source| ObservationError::CsvReadIo {
        station: station.to_string(),
        source,
    };
    let csv_polars = |source| ObservationError::CsvReadPolars {
        station: station.to_string(),
        source,
    };

    let mut temp_file = NamedTempFile::new().map_err(csv_io)?;
    temp_file.write_all(bytes).map_err(csv_io)?;
    temp_file.flush().map_err(csv_io)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| {
            opts.with_try_parse_dates(true)
                .with_null_values(Some(NullValues::AllColumns(vec![
                    "None".into(),
                    "M".into(),
                    "".into(),
                ])))
        })
        .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
        .map_err(csv_polars)?
        .finish()
        .map_err(csv_polars)?;

    let date_dtype = match df.column(DATE_COLUMN) {
        Ok(column) => column.dtype().clone(),
        Err(_) => {
            return Err(ObservationError::MissingColumn {
                station: station.to_string(),
                column: DATE_COLUMN.to_string(),
            })
        }
    };

    let lazy = match date_dtype {
        DataType::Date => df.lazy(),
        // A header-only body carries no values to infer dates from.
        DataType::String if df.height() == 0 => df
            .lazy()
            .with_column(col(DATE_COLUMN).cast(DataType::Date)),
        _ => {
            return Err(ObservationError::UnparsedDates {
                station: station.to_string(),
                column: DATE_COLUMN.to_string(),
            })
        }
    };

    let mut df = lazy
        .sort(
            [DATE_COLUMN],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    // One row per day: a repeated day keeps its last occurrence in the body.
    let unique_days = df.column(DATE_COLUMN)?.as_materialized_series().n_unique()?;
    if unique_days != df.height() {
        warn!(
            "Observation table for station {} has {} rows but only {} distinct days, keeping the last row per day",
            station,
            df.height(),
            unique_days
        );
        df = df
            .lazy()
            .unique_stable(Some(vec![DATE_COLUMN.into()]), UniqueKeepStrategy::Last)
            .collect()?;
    }
    if df.column(STATION_COLUMN).is_err() {
        debug!("Observation table for station {} has no '{}' column", station, STATION_COLUMN);
    }

    Ok(df)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const DEN_CSV: &str = "\
station,day,max_temp_f,min_temp_f,precip_in,snow_in
DEN,2022-07-04,91,60,0.00,0.0
DEN,2021-07-04,88,None,T,0.0
DEN,2023-07-03,85,57,0.10,M
DEN,2023-07-04,95,62,0.00,0.0
DEN,2024-07-04,,59,0.02,0.0
";

    #[test]
    fn test_observation_url_uses_fixed_start() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let url = observation_url(
            "https://mesonet.agron.iastate.edu/cgi-bin/request/daily.py",
            "IA_ASOS",
            "DSM",
            1928,
            date,
        );
        assert!(url.contains("network=IA_ASOS"));
        assert!(url.contains("stations=DSM"));
        assert!(url.contains("year1=1928&month1=1&day1=1"));
        assert!(url.ends_with("year2=2023&month2=12&day2=31"));
    }

    #[test]
    fn test_parse_observation_csv_indexes_by_day() -> Result<(), Box<dyn std::error::Error>> {
        let df = parse_observation_csv(DEN_CSV.as_bytes(), "DEN")?;

        assert_eq!(df.height(), 5);
        assert_eq!(df.column(DATE_COLUMN)?.dtype(), &DataType::Date);

        // Sorted ascending regardless of the body order.
        let days: Vec<i32> = df.column(DATE_COLUMN)?.date()?.into_iter().flatten().collect();
        let mut sorted = days.clone();
        sorted.sort();
        assert_eq!(days, sorted);

        // "None" is read as missing rather than text.
        assert_eq!(df.column("min_temp_f")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_observation_csv_requires_day_column() {
        let body = "station,date,max_temp_f\nDEN,2024-01-01,40\n";
        let err = parse_observation_csv(body.as_bytes(), "DEN").unwrap_err();
        assert!(matches!(err, ObservationError::MissingColumn { column, .. } if column == "day"));
    }

    #[test]
    fn test_parse_observation_csv_rejects_undated_rows() {
        let body = "station,day,max_temp_f\nDEN,yesterday,40\n";
        let err = parse_observation_csv(body.as_bytes(), "DEN").unwrap_err();
        assert!(matches!(err, ObservationError::UnparsedDates { .. }));
    }

    #[test]
    fn test_parse_observation_csv_header_only_is_empty_table() -> Result<(), Box<dyn std::error::Error>>
    {
        let body = "station,day,max_temp_f\n";
        let df = parse_observation_csv(body.as_bytes(), "DEN")?;
        assert_eq!(df.height(), 0);
        assert_eq!(df.column(DATE_COLUMN)?.dtype(), &DataType::Date);
        Ok(())
    }

    #[test]
    fn test_parse_observation_csv_keeps_one_row_per_day() -> Result<(), Box<dyn std::error::Error>> {
        let body = "\
station,day,max_temp_f
DEN,2023-07-04,10
DEN,2024-07-04,40
DEN,2023-07-04,12
";
        let df = parse_observation_csv(body.as_bytes(), "DEN")?;
        assert_eq!(df.height(), 2);

        let highs: Vec<i64> = df
            .column("max_temp_f")?
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(highs, vec![12, 40]);
        Ok(())
    }

    #[tokio::test]
    async fn test_loader_rejects_empty_identifiers() {
        let loader = ObservationLoader::new(&ClimoConfig::default(), Client::new());
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = loader.fetch(date, "CO_ASOS", " ").await.unwrap_err();
        assert!(matches!(err, ObservationError::EmptyIdentifier { .. }));
    }

    #[tokio::test]
    async fn test_loader_surfaces_transport_failure() {
        // Nothing listens on the discard port; the request fails before any body arrives.
        let config = ClimoConfig::builder()
            .observations_url("http://127.0.0.1:9/daily.py")
            .build();
        let loader = ObservationLoader::new(&config, Client::new());
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let err = loader.fetch(date, "CO_ASOS", "DEN").await.unwrap_err();
        assert!(matches!(err, ObservationError::NetworkRequest(..)));
    }
}
