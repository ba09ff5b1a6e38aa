//! Typed view over a location payload, with great-circle helpers.

use crate::client::Bot;
use crate::geo;
use crate::model::RawLocation;
use crate::registry::register_entity;

/// A point on the map, possibly live.
#[derive(Clone)]
pub struct LocationContext {
    #[allow(dead_code)]
    bot: Bot,
    raw: RawLocation,
}

impl LocationContext {
    /// Wraps a raw location.
    pub fn new(bot: Bot, raw: RawLocation) -> Self {
        Self { bot, raw }
    }

    /// The underlying raw payload.
    pub fn raw(&self) -> &RawLocation {
        &self.raw
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.raw.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.raw.longitude
    }

    /// Radius of uncertainty in meters, when reported.
    pub fn horizontal_accuracy(&self) -> Option<f64> {
        self.raw.horizontal_accuracy
    }

    /// Whether this is a live (moving) location: a live period is
    /// present and positive.
    pub fn is_live(&self) -> bool {
        self.raw.live_period.is_some_and(|period| period > 0)
    }

    /// Great-circle distance in meters to another point.
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        geo::haversine_distance(self.raw.latitude, self.raw.longitude, latitude, longitude)
    }

    /// Initial bearing in degrees towards another point, in `[0, 360)`.
    pub fn bearing_to(&self, latitude: f64, longitude: f64) -> f64 {
        geo::initial_bearing(self.raw.latitude, self.raw.longitude, latitude, longitude)
    }

    /// Whether this location lies within `radius_m` meters of a center
    /// point.
    pub fn within(&self, latitude: f64, longitude: f64, radius_m: f64) -> bool {
        self.distance_to(latitude, longitude) <= radius_m
    }
}

register_entity!("location", RawLocation, LocationContext);
