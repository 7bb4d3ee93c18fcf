#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Write payloads and query parameter definitions.
//!
//! These types describe what the database layer accepts: validated inserts,
//! partial updates, and the optional filters for volume listings. They are
//! distinct from the stored entities in `traffic_map_traffic_models` and from
//! the wire types in `traffic_map_server_models`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use traffic_map_traffic_models::{Intersection, TrafficVolume};

/// Optional filters for listing traffic volumes.
///
/// Each filter that is `Some` narrows the result; with neither set every
/// reading is returned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeQuery {
    /// Only readings of this intersection.
    pub intersection_id: Option<i64>,
    /// Only readings taken on this date.
    pub date: Option<NaiveDate>,
}

/// An inclusive range of calendar dates.
///
/// No ordering is enforced between the bounds; a range whose start is after
/// its end matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included.
    pub start: NaiveDate,
    /// Last date included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Fields for creating (or fully replacing) an intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIntersection {
    /// Display name.
    pub name: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// Partial update of an intersection; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPatch {
    /// New display name.
    pub name: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
}

impl IntersectionPatch {
    /// Returns `current` with the patched fields replaced.
    #[must_use]
    pub fn apply(self, current: Intersection) -> NewIntersection {
        NewIntersection {
            name: self.name.unwrap_or(current.name),
            latitude: self.latitude.unwrap_or(current.latitude),
            longitude: self.longitude.unwrap_or(current.longitude),
        }
    }
}

/// Fields for creating (or fully replacing) a traffic volume reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrafficVolume {
    /// ID of the owning intersection.
    pub intersection: i64,
    /// Calendar date of the reading.
    pub date: NaiveDate,
    /// Time of day of the reading.
    pub time: NaiveTime,
    /// Northbound count.
    pub volume_north: u32,
    /// Southbound count.
    pub volume_south: u32,
    /// Eastbound count.
    pub volume_east: u32,
    /// Westbound count.
    pub volume_west: u32,
}

/// Partial update of a reading; `None` fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficVolumePatch {
    /// New owning intersection.
    pub intersection: Option<i64>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New time of day.
    pub time: Option<NaiveTime>,
    /// New northbound count.
    pub volume_north: Option<u32>,
    /// New southbound count.
    pub volume_south: Option<u32>,
    /// New eastbound count.
    pub volume_east: Option<u32>,
    /// New westbound count.
    pub volume_west: Option<u32>,
}

impl TrafficVolumePatch {
    /// Returns `current` with the patched fields replaced.
    #[must_use]
    pub fn apply(self, current: &TrafficVolume) -> NewTrafficVolume {
        NewTrafficVolume {
            intersection: self.intersection.unwrap_or(current.intersection),
            date: self.date.unwrap_or(current.date),
            time: self.time.unwrap_or(current.time),
            volume_north: self.volume_north.unwrap_or(current.volume_north),
            volume_south: self.volume_south.unwrap_or(current.volume_south),
            volume_east: self.volume_east.unwrap_or(current.volume_east),
            volume_west: self.volume_west.unwrap_or(current.volume_west),
        }
    }
}
