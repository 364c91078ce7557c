use crate::observations::error::ObservationError;
use crate::stations::error::StationDirectoryError;
use plotters::drawing::DrawingAreaErrorKind;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimoError {
    /// The observation table for a network/station could not be fetched or parsed.
    #[error("Observations unavailable for station '{station}' in network '{network}'")]
    DataUnavailable {
        network: String,
        station: String,
        #[source]
        source: ObservationError,
    },

    #[error(transparent)]
    StationDirectory(#[from] StationDirectoryError),

    #[error("Failed processing observation table: {0}")]
    Polars(#[from] PolarsError),

    #[error("Failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("Unknown weather variable '{0}'")]
    UnknownVariable(String),

    #[error("Station '{station}' is not listed in network '{network}'")]
    UnknownStation { network: String, station: String },

    #[error("Failed to render view")]
    Render(#[from] std::fmt::Error),

    #[error("Failed to draw chart")]
    Chart(#[from] DrawingAreaErrorKind<std::io::Error>),
}
