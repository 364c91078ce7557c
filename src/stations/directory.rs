use crate::config::ClimoConfig;
use crate::stations::error::StationDirectoryError;
use crate::types::station::StationEntry;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Anything able to list the stations of a network.
#[async_trait]
pub trait StationSource: Send + Sync {
    async fn list(&self, network: &str) -> Result<Vec<StationEntry>, StationDirectoryError>;
}

pub fn station_directory_url(base_url: &str, network: &str) -> String {
    format!("{base_url}?network={network}&format=csv&nohtml=on")
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    stid: String,
    station_name: String,
}

/// Parses the network listing CSV. Only `stid` and `station_name` are
/// read; other columns are ignored.
pub(crate) fn parse_station_csv(
    body: &[u8],
    network: &str,
) -> Result<Vec<StationEntry>, StationDirectoryError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body);

    reader
        .deserialize::<StationRecord>()
        .filter(|record| !matches!(record, Ok(r) if r.stid.is_empty()))
        .map(|record| {
            record
                .map(|r| StationEntry::new(r.stid, r.station_name))
                .map_err(|source| StationDirectoryError::CsvParse {
                    network: network.to_string(),
                    source,
                })
        })
        .collect()
}

/// HTTP implementation of [`StationSource`] against the IEM network listing.
pub struct StationDirectoryLoader {
    base_url: String,
    client: Client,
}

impl StationDirectoryLoader {
    pub fn new(config: &ClimoConfig, client: Client) -> Self {
        Self {
            base_url: config.stations_url.clone(),
            client,
        }
    }
}

#[async_trait]
impl StationSource for StationDirectoryLoader {
    async fn list(&self, network: &str) -> Result<Vec<StationEntry>, StationDirectoryError> {
        if network.trim().is_empty() {
            return Err(StationDirectoryError::EmptyNetwork);
        }
        let url = station_directory_url(&self.base_url, network);
        debug!("Requesting station list from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StationDirectoryError::NetworkRequest(url.clone(), e))?;
        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(match e.status() {
                    Some(status) => StationDirectoryError::HttpStatus {
                        url,
                        status,
                        source: e,
                    },
                    None => StationDirectoryError::NetworkRequest(url, e),
                });
            }
        };
        let body = response
            .bytes()
            .await
            .map_err(|e| StationDirectoryError::NetworkRequest(url.clone(), e))?;

        parse_station_csv(&body, network)
    }
}

/// Station lists memoized per network for the life of the process.
pub struct StationDirectory {
    source: Arc<dyn StationSource>,
    cache: Mutex<HashMap<String, Vec<StationEntry>>>,
}

impl StationDirectory {
    pub fn new(source: Arc<dyn StationSource>) -> Self {
        Self {
            source,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Stations of `network`, fetched once per network.
    pub async fn list_stations(
        &self,
        network: &str,
    ) -> Result<Vec<StationEntry>, StationDirectoryError> {
        if let Some(cached) = self.cache.lock().await.get(network) {
            return Ok(cached.clone());
        }

        let stations = self.source.list(network).await?;
        info!("Loaded {} stations for network {}", stations.len(), network);

        self.cache
            .lock()
            .await
            .entry(network.to_string())
            .or_insert_with(|| stations.clone());
        Ok(stations)
    }
}
