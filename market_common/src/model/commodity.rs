//! Commodity price series (`COPPER` and friends).
use serde::Deserialize;

/// Marker the API uses for "no data point".
pub const MISSING_VALUE: &str = ".";

/// A commodity price series, newest observation first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommoditySeries {
    /// Series name, e.g. `Global Price of Copper`.
    pub name: Option<String>,
    /// Sampling interval, e.g. `monthly`.
    pub interval: Option<String>,
    /// Price unit, e.g. `dollar per metric ton`.
    pub unit: Option<String>,
    /// Observations, newest first.
    pub data: Option<Vec<Observation>>,
}

/// A single dated observation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Observation {
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Decimal string, or [`MISSING_VALUE`].
    pub value: Option<String>,
}

impl Observation {
    /// The value, unless it is absent or the missing marker.
    pub fn present_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| *v != MISSING_VALUE)
    }
}
