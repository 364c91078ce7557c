//! The measurement columns served by the IEM daily summary service.

use crate::error::ClimoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A selectable weather measurement. Each variant maps to one column of the
/// upstream CSV; the column names are kept verbatim for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherVariable {
    MaxTempF,
    MinTempF,
    MaxDewpointF,
    MinDewpointF,
    PrecipIn,
    AvgWindSpeedKts,
    AvgWindDrct,
    MinRh,
    AvgRh,
    MaxRh,
    ClimoHighF,
    ClimoLowF,
    ClimoPrecipIn,
    SnowIn,
    SnowdIn,
    MinFeel,
    AvgFeel,
    MaxFeel,
    MaxWindSpeedKts,
    MaxWindGustKts,
    SradMj,
}

impl WeatherVariable {
    pub const ALL: [WeatherVariable; 21] = [
        WeatherVariable::MaxTempF,
        WeatherVariable::MinTempF,
        WeatherVariable::MaxDewpointF,
        WeatherVariable::MinDewpointF,
        WeatherVariable::PrecipIn,
        WeatherVariable::AvgWindSpeedKts,
        WeatherVariable::AvgWindDrct,
        WeatherVariable::MinRh,
        WeatherVariable::AvgRh,
        WeatherVariable::MaxRh,
        WeatherVariable::ClimoHighF,
        WeatherVariable::ClimoLowF,
        WeatherVariable::ClimoPrecipIn,
        WeatherVariable::SnowIn,
        WeatherVariable::SnowdIn,
        WeatherVariable::MinFeel,
        WeatherVariable::AvgFeel,
        WeatherVariable::MaxFeel,
        WeatherVariable::MaxWindSpeedKts,
        WeatherVariable::MaxWindGustKts,
        WeatherVariable::SradMj,
    ];

    /// Column name in the upstream CSV.
    pub fn column(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF => "max_temp_f",
            WeatherVariable::MinTempF => "min_temp_f",
            WeatherVariable::MaxDewpointF => "max_dewpoint_f",
            WeatherVariable::MinDewpointF => "min_dewpoint_f",
            WeatherVariable::PrecipIn => "precip_in",
            WeatherVariable::AvgWindSpeedKts => "avg_wind_speed_kts",
            WeatherVariable::AvgWindDrct => "avg_wind_drct",
            WeatherVariable::MinRh => "min_rh",
            WeatherVariable::AvgRh => "avg_rh",
            WeatherVariable::MaxRh => "max_rh",
            WeatherVariable::ClimoHighF => "climo_high_f",
            WeatherVariable::ClimoLowF => "climo_low_f",
            WeatherVariable::ClimoPrecipIn => "climo_precip_in",
            WeatherVariable::SnowIn => "snow_in",
            WeatherVariable::SnowdIn => "snowd_in",
            WeatherVariable::MinFeel => "min_feel",
            WeatherVariable::AvgFeel => "avg_feel",
            WeatherVariable::MaxFeel => "max_feel",
            WeatherVariable::MaxWindSpeedKts => "max_wind_speed_kts",
            WeatherVariable::MaxWindGustKts => "max_wind_gust_kts",
            WeatherVariable::SradMj => "srad_mj",
        }
    }

    /// Human readable label used in chart titles and readouts.
    pub fn label(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF => "High temperature",
            WeatherVariable::MinTempF => "Low temperature",
            WeatherVariable::MaxDewpointF => "High dew point",
            WeatherVariable::MinDewpointF => "Low dew point",
            WeatherVariable::PrecipIn => "Precipitation",
            WeatherVariable::AvgWindSpeedKts => "Average wind speed",
            WeatherVariable::AvgWindDrct => "Average wind direction",
            WeatherVariable::MinRh => "Minimum relative humidity",
            WeatherVariable::AvgRh => "Average relative humidity",
            WeatherVariable::MaxRh => "Maximum relative humidity",
            WeatherVariable::ClimoHighF => "Climatological high",
            WeatherVariable::ClimoLowF => "Climatological low",
            WeatherVariable::ClimoPrecipIn => "Climatological precipitation",
            WeatherVariable::SnowIn => "Snowfall",
            WeatherVariable::SnowdIn => "Snow depth",
            WeatherVariable::MinFeel => "Minimum feels-like",
            WeatherVariable::AvgFeel => "Average feels-like",
            WeatherVariable::MaxFeel => "Maximum feels-like",
            WeatherVariable::MaxWindSpeedKts => "Peak wind speed",
            WeatherVariable::MaxWindGustKts => "Peak wind gust",
            WeatherVariable::SradMj => "Solar radiation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::MaxTempF
            | WeatherVariable::MinTempF
            | WeatherVariable::MaxDewpointF
            | WeatherVariable::MinDewpointF
            | WeatherVariable::ClimoHighF
            | WeatherVariable::ClimoLowF
            | WeatherVariable::MinFeel
            | WeatherVariable::AvgFeel
            | WeatherVariable::MaxFeel => "°F",
            WeatherVariable::PrecipIn
            | WeatherVariable::ClimoPrecipIn
            | WeatherVariable::SnowIn
            | WeatherVariable::SnowdIn => "in",
            WeatherVariable::AvgWindSpeedKts
            | WeatherVariable::MaxWindSpeedKts
            | WeatherVariable::MaxWindGustKts => "kt",
            WeatherVariable::AvgWindDrct => "°",
            WeatherVariable::MinRh | WeatherVariable::AvgRh | WeatherVariable::MaxRh => "%",
            WeatherVariable::SradMj => "MJ/m²",
        }
    }
}

impl Default for WeatherVariable {
    fn default() -> Self {
        WeatherVariable::MaxTempF
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for WeatherVariable {
    type Err = ClimoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        WeatherVariable::ALL
            .iter()
            .copied()
            .find(|variable| variable.column().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ClimoError::UnknownVariable(s.to_string()))
    }
}
