//! Explicit-state dashboard session.
//!
//! The four inputs (date, network, station, variable) live in a
//! [`DashboardState`]. Each [`DashboardEvent`] updates the state and recomputes
//! the view through [`Climo::render`].

use crate::climo::Climo;
use crate::error::ClimoError;
use crate::render::view::RenderedView;
use crate::stations::error::StationDirectoryError;
use crate::types::station::StationEntry;
use crate::types::variable::WeatherVariable;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub date: NaiveDate,
    pub network: String,
    pub station: String,
    pub variable: WeatherVariable,
}

impl DashboardState {
    /// State for today's date with the default variable.
    pub fn today(network: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            date: Local::now().date_naive(),
            network: network.into(),
            station: station.into(),
            variable: WeatherVariable::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    DateChanged(NaiveDate),
    NetworkChanged(String),
    StationChanged(String),
    VariableChanged(WeatherVariable),
}

pub struct Dashboard {
    climo: Climo,
    state: DashboardState,
    stations: Vec<StationEntry>,
    view: Option<RenderedView>,
}

impl Dashboard {
    /// A session for `state` with no station list and no view yet. Nothing
    /// is fetched until [`Dashboard::load`] or the first event.
    pub fn new(climo: Climo, state: DashboardState) -> Self {
        Self {
            climo,
            state,
            stations: Vec::new(),
            view: None,
        }
    }

    /// Loads the station list for the current network and renders the
    /// first view.
    ///
    /// A failure here ends this attempt only: the session stays usable and
    /// a later event (or another `load`) can recover.
    ///
    /// # Errors
    ///
    /// Fails if the station list cannot be loaded, if the current station is
    /// not part of it, or if the render fails.
    pub async fn load(&mut self) -> Result<&RenderedView, ClimoError> {
        self.stations = self.climo.stations(&self.state.network).await?;
        let Some(code) = self.find_station(&self.state.station).map(|e| e.code.clone()) else {
            return Err(ClimoError::UnknownStation {
                network: self.state.network.clone(),
                station: self.state.station.clone(),
            });
        };
        self.state.station = code;
        self.refresh().await
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Stations of the current network, in listing order.
    pub fn stations(&self) -> &[StationEntry] {
        &self.stations
    }

    /// The last successfully computed view.
    pub fn view(&self) -> Option<&RenderedView> {
        self.view.as_ref()
    }

    pub fn climo(&self) -> &Climo {
        &self.climo
    }

    /// Case-insensitive lookup in the current network's station list.
    fn find_station(&self, code: &str) -> Option<&StationEntry> {
        self.stations
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    /// Applies `event` and recomputes the view.
    ///
    /// A rejected event leaves the state untouched. A failed recompute keeps
    /// the new state but also keeps the previous view.
    pub async fn dispatch(&mut self, event: DashboardEvent) -> Result<&RenderedView, ClimoError> {
        info!("Dashboard event: {:?}", event);
        match event {
            DashboardEvent::DateChanged(date) => self.state.date = date,
            DashboardEvent::VariableChanged(variable) => self.state.variable = variable,
            DashboardEvent::StationChanged(station) => {
                let Some(code) = self.find_station(&station).map(|e| e.code.clone()) else {
                    return Err(ClimoError::UnknownStation {
                        network: self.state.network.clone(),
                        station,
                    });
                };
                self.state.station = code;
            }
            DashboardEvent::NetworkChanged(network) => {
                let stations = self.climo.stations(&network).await?;
                let Some(first) = stations.first() else {
                    return Err(StationDirectoryError::NoStations(network).into());
                };
                self.state.station = first.code.clone();
                self.state.network = network;
                self.stations = stations;
            }
        }
        self.refresh().await
    }

    /// Recomputes the view for the current state.
    pub async fn refresh(&mut self) -> Result<&RenderedView, ClimoError> {
        match self.climo.render(&self.state).await {
            Ok(view) => Ok(&*self.view.insert(view)),
            Err(e) => {
                warn!("Keeping previous view after failed recompute: {}", e);
                Err(e)
            }
        }
    }
}
