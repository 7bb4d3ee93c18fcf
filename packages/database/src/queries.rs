//! Read queries over intersections and their traffic volumes.
//!
//! These implement the filtering and aggregation rules the API exposes:
//! which intersections count as having observed traffic, the latest reading
//! per intersection, and volume listings by intersection, date, and date
//! range.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use switchy_database::{Database, DatabaseValue};
use traffic_map_database_models::{DateRange, VolumeQuery};
use traffic_map_traffic_models::{
    DATE_FORMAT, Intersection, TrafficVolume, VolumeSnapshot, parse_date,
};

use crate::DbError;
use crate::rows::{
    INTERSECTION_COLUMNS, VOLUME_COLUMNS, intersection_from_row, volume_from_row,
    volumes_from_rows,
};

fn date_value(date: NaiveDate) -> DatabaseValue {
    DatabaseValue::String(date.format(DATE_FORMAT).to_string())
}

/// Lists intersections that have at least one reading with traffic in any
/// direction.
///
/// Intersections without readings, or whose readings are all zero in all
/// four directions, are left out. Each intersection appears once, ordered
/// by ID.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_observed_intersections(db: &dyn Database) -> Result<Vec<Intersection>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {INTERSECTION_COLUMNS} FROM intersections i
                 WHERE EXISTS (
                     SELECT 1 FROM traffic_volumes v
                     WHERE v.intersection_id = i.id
                       AND NOT (v.volume_north = 0 AND v.volume_south = 0
                                AND v.volume_east = 0 AND v.volume_west = 0)
                 )
                 ORDER BY i.id"
            ),
            &[],
        )
        .await?;

    Ok(rows.iter().map(intersection_from_row).collect())
}

/// Returns the most recent reading of an intersection, ordered by date,
/// then time, then ID.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn latest_volume(
    db: &dyn Database,
    intersection_id: i64,
) -> Result<Option<TrafficVolume>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {VOLUME_COLUMNS} FROM traffic_volumes
                 WHERE intersection_id = $1
                 ORDER BY date DESC, time DESC, id DESC
                 LIMIT 1"
            ),
            &[DatabaseValue::Int64(intersection_id)],
        )
        .await?;

    rows.first().map(volume_from_row).transpose()
}

/// Latest-volume snapshot of an intersection: the four directional counts
/// of its most recent reading, or zeros if it has none.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn latest_snapshot(
    db: &dyn Database,
    intersection_id: i64,
) -> Result<VolumeSnapshot, DbError> {
    Ok(latest_volume(db, intersection_id)
        .await?
        .as_ref()
        .map(TrafficVolume::snapshot)
        .unwrap_or_default())
}

/// Returns the most recent reading of every intersection that has one,
/// keyed by intersection ID.
///
/// The latest row per intersection is picked in SQL with the same ordering
/// as [`latest_volume`], so only one row per intersection is read.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn latest_volumes(db: &dyn Database) -> Result<BTreeMap<i64, TrafficVolume>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {VOLUME_COLUMNS} FROM (
                     SELECT *, ROW_NUMBER() OVER (
                         PARTITION BY intersection_id
                         ORDER BY date DESC, time DESC, id DESC
                     ) AS recency
                     FROM traffic_volumes
                 )
                 WHERE recency = 1"
            ),
            &[],
        )
        .await?;

    Ok(volumes_from_rows(&rows)?
        .into_iter()
        .map(|v| (v.intersection, v))
        .collect())
}

/// Lists every reading of one intersection in ID order.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn volumes_for_intersection(
    db: &dyn Database,
    intersection_id: i64,
) -> Result<Vec<TrafficVolume>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {VOLUME_COLUMNS} FROM traffic_volumes
                 WHERE intersection_id = $1
                 ORDER BY id"
            ),
            &[DatabaseValue::Int64(intersection_id)],
        )
        .await?;

    volumes_from_rows(&rows)
}

/// Lists readings matching the optional intersection and date filters,
/// ordered ascending by time of day.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn query_volumes(
    db: &dyn Database,
    query: &VolumeQuery,
) -> Result<Vec<TrafficVolume>, DbError> {
    let mut sql = format!("SELECT {VOLUME_COLUMNS} FROM traffic_volumes WHERE 1=1");

    let mut params: Vec<DatabaseValue> = Vec::new();
    let mut param_idx = 1u32;

    if let Some(intersection_id) = query.intersection_id {
        write!(sql, " AND intersection_id = ${param_idx}").unwrap();
        params.push(DatabaseValue::Int64(intersection_id));
        param_idx += 1;
    }

    if let Some(date) = query.date {
        write!(sql, " AND date = ${param_idx}").unwrap();
        params.push(date_value(date));
    }

    sql.push_str(" ORDER BY time, id");

    log::debug!("query_volumes: {query:?}");

    let rows = db.query_raw_params(&sql, &params).await?;
    volumes_from_rows(&rows)
}

/// Lists the readings taken on exactly `date`.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn volumes_on(db: &dyn Database, date: NaiveDate) -> Result<Vec<TrafficVolume>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {VOLUME_COLUMNS} FROM traffic_volumes
                 WHERE date = $1
                 ORDER BY id"
            ),
            &[date_value(date)],
        )
        .await?;

    volumes_from_rows(&rows)
}

/// Lists the readings whose date falls within `range`, inclusive.
///
/// A reversed range returns nothing.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn volumes_between(
    db: &dyn Database,
    range: DateRange,
) -> Result<Vec<TrafficVolume>, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "SELECT {VOLUME_COLUMNS} FROM traffic_volumes
                 WHERE date >= $1 AND date <= $2
                 ORDER BY date, time, id"
            ),
            &[date_value(range.start), date_value(range.end)],
        )
        .await?;

    volumes_from_rows(&rows)
}

/// Lists the readings for a raw `YYYY-MM-DD` date parameter.
///
/// # Errors
///
/// Returns [`DbError::Validation`] if the parameter is missing, empty, or
/// not a `YYYY-MM-DD` date, and [`DbError`] if the database operation
/// fails.
pub async fn volumes_by_date(
    db: &dyn Database,
    date: Option<&str>,
) -> Result<Vec<TrafficVolume>, DbError> {
    let date = required(date).ok_or_else(|| DbError::validation("Date parameter is required"))?;
    volumes_on(db, parse_date(date)?).await
}

/// Lists the readings between raw `YYYY-MM-DD` start and end parameters,
/// inclusive.
///
/// # Errors
///
/// Returns [`DbError::Validation`] if either bound is missing, empty, or
/// malformed, and [`DbError`] if the database operation fails.
pub async fn volumes_by_date_range(
    db: &dyn Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<TrafficVolume>, DbError> {
    let (Some(start), Some(end)) = (required(start_date), required(end_date)) else {
        return Err(DbError::validation(
            "Start date and end date parameters are required",
        ));
    };

    let range = DateRange::new(parse_date(start)?, parse_date(end)?);
    volumes_between(db, range).await
}

fn required(param: Option<&str>) -> Option<&str> {
    param.filter(|s| !s.trim().is_empty())
}
