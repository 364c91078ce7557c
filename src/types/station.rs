//! Station directory entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One observing site within a network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StationEntry {
    /// Short station identifier (e.g. "DEN").
    pub code: String,
    /// Display name (e.g. "Denver Intl Airport").
    pub name: String,
}

impl StationEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for StationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}
