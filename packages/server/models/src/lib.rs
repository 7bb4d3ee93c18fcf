#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the traffic map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the stored entity types to allow independent evolution of the API
//! contract. Field names stay `snake_case` because the map front end reads
//! `volume_north`, `start_date`, and so on verbatim.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use traffic_map_database_models::{
    IntersectionPatch, NewIntersection, NewTrafficVolume, TrafficVolumePatch, VolumeQuery,
};
use traffic_map_traffic_models::{
    Intersection, InvalidDateError, InvalidTimeError, TrafficVolume, VolumeSnapshot, parse_date,
    parse_time,
};

/// A traffic volume reading as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTrafficVolume {
    /// Unique reading ID.
    pub id: i64,
    /// ID of the intersection the reading belongs to.
    pub intersection: i64,
    /// Date of the reading (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Time of day of the reading (`HH:MM:SS`).
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

impl From<TrafficVolume> for ApiTrafficVolume {
    fn from(row: TrafficVolume) -> Self {
        Self {
            id: row.id,
            intersection: row.intersection,
            date: row.date,
            time: row.time,
            volume_north: row.volume_north,
            volume_south: row.volume_south,
            volume_east: row.volume_east,
            volume_west: row.volume_west,
        }
    }
}

/// An intersection as returned by the API, with the directional counts of
/// its latest reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiIntersection {
    /// Unique intersection ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Northbound count of the latest reading (0 without readings).
    pub volume_north: u32,
    /// Southbound count of the latest reading.
    pub volume_south: u32,
    /// Eastbound count of the latest reading.
    pub volume_east: u32,
    /// Westbound count of the latest reading.
    pub volume_west: u32,
}

impl ApiIntersection {
    /// Combines an intersection with its latest-volume snapshot.
    #[must_use]
    pub fn new(intersection: Intersection, latest: VolumeSnapshot) -> Self {
        Self {
            id: intersection.id,
            name: intersection.name,
            latitude: intersection.latitude,
            longitude: intersection.longitude,
            volume_north: latest.north,
            volume_south: latest.south,
            volume_east: latest.east,
            volume_west: latest.west,
        }
    }
}

/// An intersection with its latest reading summarized for the map markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiIntersectionLatestVolume {
    /// The intersection and its latest directional counts.
    #[serde(flatten)]
    pub intersection: ApiIntersection,
    /// Sum of the four directional counts.
    pub total_volume: u64,
    /// When the latest reading was taken, if there is one.
    pub datetime: Option<NaiveDateTime>,
}

impl ApiIntersectionLatestVolume {
    /// Builds the summary from an intersection and its latest reading.
    #[must_use]
    pub fn new(intersection: Intersection, latest: Option<&TrafficVolume>) -> Self {
        let snapshot = latest.map(TrafficVolume::snapshot).unwrap_or_default();
        Self {
            intersection: ApiIntersection::new(intersection, snapshot),
            total_volume: snapshot.total(),
            datetime: latest.map(TrafficVolume::recorded_at),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Short human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Errors converting a request payload into a database write.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// A date field was not `YYYY-MM-DD`.
    #[error(transparent)]
    Date(#[from] InvalidDateError),

    /// A time field was not `HH:MM[:SS]`.
    #[error(transparent)]
    Time(#[from] InvalidTimeError),

    /// A volume was negative or too large.
    #[error("{field} must be a non-negative integer, got {value}")]
    Volume {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },

    /// An `intersection_id` filter was not an integer.
    #[error("Invalid intersection_id '{value}': expected an integer")]
    IntersectionId {
        /// The rejected input.
        value: String,
    },
}

fn volume(field: &'static str, value: Option<i64>) -> Result<Option<u32>, PayloadError> {
    value
        .map(|v| u32::try_from(v).map_err(|_| PayloadError::Volume { field, value: v }))
        .transpose()
}

/// Drops blank query values, which clients send for "no filter".
fn present(param: Option<&str>) -> Option<&str> {
    param.map(str::trim).filter(|s| !s.is_empty())
}

/// Query parameters for the volume listing endpoint.
///
/// Both filters are kept as raw strings so that `intersection_id=` and
/// `date=` mean "not filtered" instead of failing to deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeQueryParams {
    /// Only readings of this intersection.
    pub intersection_id: Option<String>,
    /// Only readings on this date (`YYYY-MM-DD`).
    pub date: Option<String>,
}

impl TryFrom<VolumeQueryParams> for VolumeQuery {
    type Error = PayloadError;

    fn try_from(params: VolumeQueryParams) -> Result<Self, Self::Error> {
        let intersection_id = present(params.intersection_id.as_deref())
            .map(|id| {
                id.parse::<i64>().map_err(|_| PayloadError::IntersectionId {
                    value: id.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            intersection_id,
            date: present(params.date.as_deref()).map(parse_date).transpose()?,
        })
    }
}

/// Query parameters for the by-date endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQueryParams {
    /// Date to match (`YYYY-MM-DD`). Required.
    pub date: Option<String>,
}

/// Query parameters for the by-date-range endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQueryParams {
    /// First date included (`YYYY-MM-DD`). Required.
    pub start_date: Option<String>,
    /// Last date included (`YYYY-MM-DD`). Required.
    pub end_date: Option<String>,
}

/// Request body for creating or replacing an intersection.
#[derive(Debug, Clone, Deserialize)]
pub struct IntersectionBody {
    /// Display name.
    pub name: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl From<IntersectionBody> for NewIntersection {
    fn from(body: IntersectionBody) -> Self {
        Self {
            name: body.name,
            latitude: body.latitude,
            longitude: body.longitude,
        }
    }
}

/// Request body for partially updating an intersection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntersectionPatchBody {
    /// New display name.
    pub name: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
}

impl From<IntersectionPatchBody> for IntersectionPatch {
    fn from(body: IntersectionPatchBody) -> Self {
        Self {
            name: body.name,
            latitude: body.latitude,
            longitude: body.longitude,
        }
    }
}

/// Request body for creating or replacing a traffic volume reading.
///
/// Omitted volumes default to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct TrafficVolumeBody {
    /// ID of the owning intersection.
    pub intersection: i64,
    /// Date of the reading (`YYYY-MM-DD`).
    pub date: String,
    /// Time of day of the reading (`HH:MM[:SS]`).
    pub time: String,
    /// Northbound count.
    pub volume_north: Option<i64>,
    /// Southbound count.
    pub volume_south: Option<i64>,
    /// Eastbound count.
    pub volume_east: Option<i64>,
    /// Westbound count.
    pub volume_west: Option<i64>,
}

impl TryFrom<TrafficVolumeBody> for NewTrafficVolume {
    type Error = PayloadError;

    fn try_from(body: TrafficVolumeBody) -> Result<Self, Self::Error> {
        Ok(Self {
            intersection: body.intersection,
            date: parse_date(&body.date)?,
            time: parse_time(&body.time)?,
            volume_north: volume("volume_north", body.volume_north)?.unwrap_or(0),
            volume_south: volume("volume_south", body.volume_south)?.unwrap_or(0),
            volume_east: volume("volume_east", body.volume_east)?.unwrap_or(0),
            volume_west: volume("volume_west", body.volume_west)?.unwrap_or(0),
        })
    }
}

/// Request body for partially updating a traffic volume reading.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrafficVolumePatchBody {
    /// New owning intersection.
    pub intersection: Option<i64>,
    /// New date (`YYYY-MM-DD`).
    pub date: Option<String>,
    /// New time of day (`HH:MM[:SS]`).
    pub time: Option<String>,
    /// New northbound count.
    pub volume_north: Option<i64>,
    /// New southbound count.
    pub volume_south: Option<i64>,
    /// New eastbound count.
    pub volume_east: Option<i64>,
    /// New westbound count.
    pub volume_west: Option<i64>,
}

impl TryFrom<TrafficVolumePatchBody> for TrafficVolumePatch {
    type Error = PayloadError;

    fn try_from(body: TrafficVolumePatchBody) -> Result<Self, Self::Error> {
        Ok(Self {
            intersection: body.intersection,
            date: body.date.as_deref().map(parse_date).transpose()?,
            time: body.time.as_deref().map(parse_time).transpose()?,
            volume_north: volume("volume_north", body.volume_north)?,
            volume_south: volume("volume_south", body.volume_south)?,
            volume_east: volume("volume_east", body.volume_east)?,
            volume_west: volume("volume_west", body.volume_west)?,
        })
    }
}
