use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error("Network and station identifiers must be non-empty (network '{network}', station '{station}')")]
    EmptyIdentifier { network: String, station: String },

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    // Errors while spooling the CSV body (inside blocking task)
    #[error("I/O error processing CSV data for station '{station}'")]
    CsvReadIo {
        station: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parsing error processing CSV data for station '{station}'")]
    CsvReadPolars {
        station: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' for station {station}")]
    MissingColumn { station: String, column: String },

    #[error("Column '{column}' for station {station} could not be read as dates")]
    UnparsedDates { station: String, column: String },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
