//! Raw location payload.

use serde::{Deserialize, Serialize};

/// A point on the map, possibly a live (moving) location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Radius of uncertainty, in meters.
    #[serde(default)]
    pub horizontal_accuracy: Option<f64>,
    /// Seconds the location can be updated for; present and positive
    /// only for live locations.
    #[serde(default)]
    pub live_period: Option<i64>,
    /// Direction of movement in degrees, for live locations.
    #[serde(default)]
    pub heading: Option<u16>,
    /// Proximity alert radius in meters, for live locations.
    #[serde(default)]
    pub proximity_alert_radius: Option<u32>,
}
