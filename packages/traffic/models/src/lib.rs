#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Intersection and traffic volume domain types.
//!
//! This crate defines the two entities the traffic map is built around:
//! [`Intersection`] (a road junction with fixed coordinates) and
//! [`TrafficVolume`] (a timestamped four-direction vehicle count at one
//! intersection), along with the date and time formats they are stored and
//! exchanged in.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Wire and storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for times of day.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Shorter time format accepted on input.
const SHORT_TIME_FORMAT: &str = "%H:%M";

/// Error returned when a string is not a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date '{value}': expected format YYYY-MM-DD")]
pub struct InvalidDateError {
    /// The rejected input.
    pub value: String,
}

/// Error returned when a string is not an `HH:MM[:SS]` time of day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time '{value}': expected format HH:MM:SS")]
pub struct InvalidTimeError {
    /// The rejected input.
    pub value: String,
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if the input is not a valid date in that
/// format (for example `03-01-2024` or `2024-02-30`).
pub fn parse_date(value: &str) -> Result<NaiveDate, InvalidDateError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| InvalidDateError {
        value: value.to_string(),
    })
}

/// Parses a time of day in `HH:MM:SS` or `HH:MM` form.
///
/// # Errors
///
/// Returns [`InvalidTimeError`] if the input matches neither format.
pub fn parse_time(value: &str) -> Result<NaiveTime, InvalidTimeError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, SHORT_TIME_FORMAT))
        .map_err(|_| InvalidTimeError {
            value: value.to_string(),
        })
}

/// One of the four approaches into an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Northbound approach.
    North,
    /// Southbound approach.
    South,
    /// Eastbound approach.
    East,
    /// Westbound approach.
    West,
}

impl Direction {
    /// All directions, in the order they appear in API payloads.
    pub const ALL: &[Self] = &[Self::North, Self::South, Self::East, Self::West];

    /// Returns the storage column holding this direction's count.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::North => "volume_north",
            Self::South => "volume_south",
            Self::East => "volume_east",
            Self::West => "volume_west",
        }
    }
}

/// A road junction with fixed geocoordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    /// Server-assigned primary key.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

/// The four directional counts of a single reading.
///
/// The default value (all zeros) is what an intersection without any
/// reading reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeSnapshot {
    /// Vehicles counted on the northbound approach.
    pub north: u32,
    /// Vehicles counted on the southbound approach.
    pub south: u32,
    /// Vehicles counted on the eastbound approach.
    pub east: u32,
    /// Vehicles counted on the westbound approach.
    pub west: u32,
}

impl VolumeSnapshot {
    /// Returns the count for one direction.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> u32 {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Sum of all four directions.
    #[must_use]
    pub fn total(&self) -> u64 {
        Direction::ALL
            .iter()
            .map(|d| u64::from(self.get(*d)))
            .sum()
    }
}

/// A timestamped vehicle count at one intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficVolume {
    /// Primary key.
    pub id: i64,
    /// ID of the owning [`Intersection`].
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

impl TrafficVolume {
    /// Returns the four directional counts of this reading.
    #[must_use]
    pub const fn snapshot(&self) -> VolumeSnapshot {
        VolumeSnapshot {
            north: self.volume_north,
            south: self.volume_south,
            east: self.volume_east,
            west: self.volume_west,
        }
    }

    /// Date and time of the reading combined.
    #[must_use]
    pub fn recorded_at(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date, self.time)
    }
}
