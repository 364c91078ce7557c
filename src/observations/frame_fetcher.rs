use crate::observations::error::ObservationError;
use crate::observations::loader::ObservationSource;
use chrono::NaiveDate;
use log::{debug, info};
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

type FrameKey = (NaiveDate, String, String);

/// Process-wide memo of observation tables keyed by (date, network, station).
///
/// Entries are never evicted: the upstream record changes at most daily and
/// the key space of a session is small.
pub struct FrameFetcher {
    source: Arc<dyn ObservationSource>,
    frame_cache: Mutex<HashMap<FrameKey, DataFrame>>,
}

impl FrameFetcher {
    pub fn new(source: Arc<dyn ObservationSource>) -> Self {
        Self {
            source,
            frame_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the observation table, fetching it only on a cache miss.
    pub async fn get_cached_frame(
        &self,
        date: NaiveDate,
        network: &str,
        station: &str,
    ) -> Result<DataFrame, ObservationError> {
        let key = (date, network.to_string(), station.to_string());

        {
            let cache = self.frame_cache.lock().await;
            if let Some(cached) = cache.get(&key) {
                debug!("Cache hit for {}/{} as of {}", network, station, date);
                return Ok(cached.clone());
            }
        }

        // Fetch outside the lock so other keys are not blocked behind a slow request.
        info!("Cache miss for {}/{} as of {}, fetching", network, station, date);
        let loaded_frame = self.source.fetch(date, network, station).await?;

        let mut cache = self.frame_cache.lock().await;
        match cache.entry(key) {
            // Another caller finished first; keep a single copy.
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(loaded_frame.clone());
                Ok(loaded_frame)
            }
        }
    }

    /// Number of memoized tables.
    pub async fn cached_len(&self) -> usize {
        self.frame_cache.lock().await.len()
    }
}
