//! Create, read, update, and delete operations for intersections and
//! traffic volumes.

use switchy_database::{Database, DatabaseValue};
use traffic_map_database_models::{
    IntersectionPatch, NewIntersection, NewTrafficVolume, TrafficVolumePatch,
};
use traffic_map_traffic_models::{DATE_FORMAT, Intersection, TIME_FORMAT, TrafficVolume};

use crate::DbError;
use crate::rows::{INTERSECTION_COLUMNS, VOLUME_COLUMNS, intersection_from_row, volume_from_row};

const INTERSECTION: &str = "Intersection";
const TRAFFIC_VOLUME: &str = "Traffic volume";

/// Lists all intersections in ID order, with or without readings.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn list_intersections(db: &dyn Database) -> Result<Vec<Intersection>, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {INTERSECTION_COLUMNS} FROM intersections ORDER BY id"),
            &[],
        )
        .await?;

    Ok(rows.iter().map(intersection_from_row).collect())
}

/// Fetches one intersection.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no intersection has this ID, or
/// [`DbError`] if the database operation fails.
pub async fn get_intersection(db: &dyn Database, id: i64) -> Result<Intersection, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {INTERSECTION_COLUMNS} FROM intersections WHERE id = $1"),
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    rows.first()
        .map(intersection_from_row)
        .ok_or(DbError::NotFound {
            entity: INTERSECTION,
            id,
        })
}

/// Inserts a new intersection and returns it with its assigned ID.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn create_intersection(
    db: &dyn Database,
    new: &NewIntersection,
) -> Result<Intersection, DbError> {
    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO intersections (name, latitude, longitude)
                 VALUES ($1, $2, $3)
                 RETURNING {INTERSECTION_COLUMNS}"
            ),
            &intersection_values(new),
        )
        .await?;

    let intersection = rows
        .first()
        .map(intersection_from_row)
        .ok_or_else(|| DbError::Conversion {
            message: "Failed to get intersection from insert".to_string(),
        })?;

    log::debug!("Created intersection {}", intersection.id);

    Ok(intersection)
}

/// Overwrites every field of an existing intersection.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no intersection has this ID, or
/// [`DbError`] if the database operation fails.
pub async fn replace_intersection(
    db: &dyn Database,
    id: i64,
    new: &NewIntersection,
) -> Result<Intersection, DbError> {
    let mut params = intersection_values(new);
    params.push(DatabaseValue::Int64(id));

    let rows = db
        .query_raw_params(
            &format!(
                "UPDATE intersections SET name = $1, latitude = $2, longitude = $3
                 WHERE id = $4
                 RETURNING {INTERSECTION_COLUMNS}"
            ),
            &params,
        )
        .await?;

    rows.first()
        .map(intersection_from_row)
        .ok_or(DbError::NotFound {
            entity: INTERSECTION,
            id,
        })
}

/// Applies a partial update to an intersection.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no intersection has this ID, or
/// [`DbError`] if the database operation fails.
pub async fn update_intersection(
    db: &dyn Database,
    id: i64,
    patch: IntersectionPatch,
) -> Result<Intersection, DbError> {
    let current = get_intersection(db, id).await?;
    replace_intersection(db, id, &patch.apply(current)).await
}

/// Deletes an intersection together with all of its readings, in one
/// transaction.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no intersection has this ID, or
/// [`DbError`] if the database operation fails.
pub async fn delete_intersection(db: &dyn Database, id: i64) -> Result<(), DbError> {
    let txn = db.begin_transaction().await?;

    match delete_intersection_rows(txn.as_ref(), id).await {
        Ok(readings) => {
            txn.commit().await?;
            log::info!("Deleted intersection {id} and {readings} readings");
            Ok(())
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                log::error!("Failed to roll back delete of intersection {id}: {rollback}");
            }
            Err(e)
        }
    }
}

/// Deletes the readings, then the intersection. Returns the number of
/// readings removed.
async fn delete_intersection_rows(db: &dyn Database, id: i64) -> Result<u64, DbError> {
    get_intersection(db, id).await?;

    let readings = db
        .exec_raw_params(
            "DELETE FROM traffic_volumes WHERE intersection_id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    db.exec_raw_params(
        "DELETE FROM intersections WHERE id = $1",
        &[DatabaseValue::Int64(id)],
    )
    .await?;

    Ok(readings)
}

/// Fetches one traffic volume reading.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no reading has this ID, or [`DbError`]
/// if the database operation fails.
pub async fn get_volume(db: &dyn Database, id: i64) -> Result<TrafficVolume, DbError> {
    let rows = db
        .query_raw_params(
            &format!("SELECT {VOLUME_COLUMNS} FROM traffic_volumes WHERE id = $1"),
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    rows.first()
        .map(volume_from_row)
        .transpose()?
        .ok_or(DbError::NotFound {
            entity: TRAFFIC_VOLUME,
            id,
        })
}

/// Inserts a new reading and returns it with its assigned ID.
///
/// The intersection check and the insert share a transaction, so a
/// concurrent delete cannot leave the reading orphaned.
///
/// # Errors
///
/// Returns [`DbError::Validation`] if the referenced intersection does not
/// exist, or [`DbError`] if the database operation fails.
pub async fn create_volume(
    db: &dyn Database,
    new: &NewTrafficVolume,
) -> Result<TrafficVolume, DbError> {
    let txn = db.begin_transaction().await?;

    match insert_volume(txn.as_ref(), new).await {
        Ok(volume) => {
            txn.commit().await?;
            Ok(volume)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                log::error!("Failed to roll back traffic volume insert: {rollback}");
            }
            Err(e)
        }
    }
}

async fn insert_volume(db: &dyn Database, new: &NewTrafficVolume) -> Result<TrafficVolume, DbError> {
    ensure_intersection_exists(db, new.intersection).await?;

    let rows = db
        .query_raw_params(
            &format!(
                "INSERT INTO traffic_volumes (
                    intersection_id, date, time,
                    volume_north, volume_south, volume_east, volume_west
                 ) VALUES ($1, $2, $3, $4, $5, $6, $7)
                 RETURNING {VOLUME_COLUMNS}"
            ),
            &volume_values(new),
        )
        .await?;

    rows.first()
        .map(volume_from_row)
        .transpose()?
        .ok_or_else(|| DbError::Conversion {
            message: "Failed to get traffic volume from insert".to_string(),
        })
}

/// Overwrites every field of an existing reading.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no reading has this ID,
/// [`DbError::Validation`] if the referenced intersection does not exist,
/// or [`DbError`] if the database operation fails.
pub async fn replace_volume(
    db: &dyn Database,
    id: i64,
    new: &NewTrafficVolume,
) -> Result<TrafficVolume, DbError> {
    let txn = db.begin_transaction().await?;

    match overwrite_volume(txn.as_ref(), id, new).await {
        Ok(volume) => {
            txn.commit().await?;
            Ok(volume)
        }
        Err(e) => {
            if let Err(rollback) = txn.rollback().await {
                log::error!("Failed to roll back update of traffic volume {id}: {rollback}");
            }
            Err(e)
        }
    }
}

async fn overwrite_volume(
    db: &dyn Database,
    id: i64,
    new: &NewTrafficVolume,
) -> Result<TrafficVolume, DbError> {
    get_volume(db, id).await?;
    ensure_intersection_exists(db, new.intersection).await?;

    let mut params = volume_values(new);
    params.push(DatabaseValue::Int64(id));

    let rows = db
        .query_raw_params(
            &format!(
                "UPDATE traffic_volumes SET
                    intersection_id = $1, date = $2, time = $3,
                    volume_north = $4, volume_south = $5,
                    volume_east = $6, volume_west = $7
                 WHERE id = $8
                 RETURNING {VOLUME_COLUMNS}"
            ),
            &params,
        )
        .await?;

    rows.first()
        .map(volume_from_row)
        .transpose()?
        .ok_or(DbError::NotFound {
            entity: TRAFFIC_VOLUME,
            id,
        })
}

/// Applies a partial update to a reading.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no reading has this ID,
/// [`DbError::Validation`] if the patch points at a missing intersection,
/// or [`DbError`] if the database operation fails.
pub async fn update_volume(
    db: &dyn Database,
    id: i64,
    patch: TrafficVolumePatch,
) -> Result<TrafficVolume, DbError> {
    let current = get_volume(db, id).await?;
    replace_volume(db, id, &patch.apply(&current)).await
}

/// Deletes a reading.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no reading has this ID, or [`DbError`]
/// if the database operation fails.
pub async fn delete_volume(db: &dyn Database, id: i64) -> Result<(), DbError> {
    let deleted = db
        .exec_raw_params(
            "DELETE FROM traffic_volumes WHERE id = $1",
            &[DatabaseValue::Int64(id)],
        )
        .await?;

    if deleted == 0 {
        return Err(DbError::NotFound {
            entity: TRAFFIC_VOLUME,
            id,
        });
    }

    Ok(())
}

async fn ensure_intersection_exists(db: &dyn Database, id: i64) -> Result<(), DbError> {
    match get_intersection(db, id).await {
        Ok(_) => Ok(()),
        Err(DbError::NotFound { .. }) => Err(DbError::validation(format!(
            "Intersection {id} does not exist"
        ))),
        Err(e) => Err(e),
    }
}

fn intersection_values(new: &NewIntersection) -> Vec<DatabaseValue> {
    vec![
        DatabaseValue::String(new.name.clone()),
        DatabaseValue::Real64(new.latitude),
        DatabaseValue::Real64(new.longitude),
    ]
}

fn volume_values(new: &NewTrafficVolume) -> Vec<DatabaseValue> {
    vec![
        DatabaseValue::Int64(new.intersection),
        DatabaseValue::String(new.date.format(DATE_FORMAT).to_string()),
        DatabaseValue::String(new.time.format(TIME_FORMAT).to_string()),
        DatabaseValue::Int64(i64::from(new.volume_north)),
        DatabaseValue::Int64(i64::from(new.volume_south)),
        DatabaseValue::Int64(i64::from(new.volume_east)),
        DatabaseValue::Int64(i64::from(new.volume_west)),
    ]
}
