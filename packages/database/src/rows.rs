//! Decoding of stored rows into domain types.

use moosicbox_json_utils::database::ToValue as _;
use switchy_database::Row;
use traffic_map_traffic_models::{
    Direction, Intersection, TrafficVolume, parse_date, parse_time,
};

use crate::DbError;

/// Columns selected for every intersection query.
pub const INTERSECTION_COLUMNS: &str = "id, name, latitude, longitude";

/// Columns selected for every traffic volume query.
pub const VOLUME_COLUMNS: &str = "id, intersection_id, date, time, \
     volume_north, volume_south, volume_east, volume_west";

/// Decodes an `intersections` row.
pub fn intersection_from_row(row: &Row) -> Intersection {
    Intersection {
        id: row.to_value("id").unwrap_or(0),
        name: row.to_value("name").unwrap_or_default(),
        latitude: row.to_value("latitude").unwrap_or(0.0),
        longitude: row.to_value("longitude").unwrap_or(0.0),
    }
}

/// Decodes a `traffic_volumes` row.
///
/// Dates and times that fail to parse mean the stored data is corrupt, so
/// they surface as [`DbError::Conversion`] rather than a validation error.
pub fn volume_from_row(row: &Row) -> Result<TrafficVolume, DbError> {
    let date: String = row.to_value("date").unwrap_or_default();
    let time: String = row.to_value("time").unwrap_or_default();

    Ok(TrafficVolume {
        id: row.to_value("id").unwrap_or(0),
        intersection: row.to_value("intersection_id").unwrap_or(0),
        date: parse_date(&date).map_err(|e| DbError::Conversion {
            message: e.to_string(),
        })?,
        time: parse_time(&time).map_err(|e| DbError::Conversion {
            message: e.to_string(),
        })?,
        volume_north: count(row, Direction::North),
        volume_south: count(row, Direction::South),
        volume_east: count(row, Direction::East),
        volume_west: count(row, Direction::West),
    })
}

/// Decodes a batch of `traffic_volumes` rows, failing on the first bad one.
pub fn volumes_from_rows(rows: &[Row]) -> Result<Vec<TrafficVolume>, DbError> {
    rows.iter().map(volume_from_row).collect()
}

fn count(row: &Row, direction: Direction) -> u32 {
    let value: i64 = row.to_value(direction.column()).unwrap_or(0);
    u32::try_from(value).unwrap_or(0)
}
