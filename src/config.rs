//! Runtime configuration for the [`crate::Climo`] client.
//!
//! Every knob has a default matching the public IEM endpoints, so
//! `ClimoConfig::default()` is enough for normal use.

use bon::Builder;

/// IEM daily summary service.
pub const DEFAULT_OBSERVATIONS_URL: &str = "https://mesonet.agron.iastate.edu/cgi-bin/request/daily.py";
/// IEM network station listing.
pub const DEFAULT_STATIONS_URL: &str = "https://mesonet.agron.iastate.edu/sites/networks.php";
/// First year requested from the daily service.
pub const DEFAULT_START_YEAR: i32 = 1928;
/// Network type appended to each region code (`CO` -> `CO_ASOS`).
pub const DEFAULT_NETWORK_TOKEN: &str = "ASOS";

/// Settings shared by the fetch, statistics and rendering stages.
///
/// # Examples
///
/// ```
/// use climo::ClimoConfig;
///
/// let config = ClimoConfig::builder().era_width(10).histogram_bins(30).build();
/// assert_eq!(config.era_width, 10);
/// assert_eq!(config.start_year, 1928);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ClimoConfig {
    /// Base URL of the daily observation service.
    #[builder(into, default = DEFAULT_OBSERVATIONS_URL.to_string())]
    pub observations_url: String,
    /// Base URL of the station directory service.
    #[builder(into, default = DEFAULT_STATIONS_URL.to_string())]
    pub stations_url: String,
    /// Start of every observation query (January 1st of this year).
    #[builder(default = DEFAULT_START_YEAR)]
    pub start_year: i32,
    /// Network type token used to build the selectable network list.
    #[builder(into, default = DEFAULT_NETWORK_TOKEN.to_string())]
    pub network_token: String,
    /// Width in years of one era bucket.
    #[builder(default = 20)]
    pub era_width: u16,
    /// Number of histogram bins.
    #[builder(default = 20)]
    pub histogram_bins: usize,
    /// Number of evaluation points per density curve.
    #[builder(default = 128)]
    pub density_points: usize,
    #[builder(into, default = concat!("climo/", env!("CARGO_PKG_VERSION")).to_string())]
    pub user_agent: String,
}

impl Default for ClimoConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
