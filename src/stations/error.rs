use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationDirectoryError {
    #[error("Network identifier must be non-empty")]
    EmptyNetwork,

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse station listing for network '{network}'")]
    CsvParse {
        network: String,
        #[source]
        source: csv::Error,
    },

    #[error("Network '{0}' lists no stations")]
    NoStations(String),
}
