//! Shared fixtures for database tests.

use std::path::PathBuf;

use switchy_database::Database;
use traffic_map_database_models::{NewIntersection, NewTrafficVolume};
use traffic_map_traffic_models::{Intersection, TrafficVolume, parse_date, parse_time};

use crate::{crud, db};

/// A throwaway `SQLite` database file, removed on drop.
pub struct TestDb {
    db: Box<dyn Database>,
    path: PathBuf,
}

impl TestDb {
    pub async fn open() -> Self {
        let path = std::env::temp_dir().join(format!("traffic_map_test_{}.db", uuid::Uuid::new_v4()));
        let db = db::open_db(&path).await.unwrap();
        Self { db, path }
    }

    pub fn db(&self) -> &dyn Database {
        self.db.as_ref()
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub async fn seed_intersection(db: &dyn Database, name: &str) -> Intersection {
    crud::create_intersection(
        db,
        &NewIntersection {
            name: name.to_string(),
            latitude: 37.5665,
            longitude: 126.978,
        },
    )
    .await
    .unwrap()
}

/// Inserts a reading with `[north, south, east, west]` counts.
pub async fn seed_volume(
    db: &dyn Database,
    intersection: i64,
    date: &str,
    time: &str,
    [north, south, east, west]: [u32; 4],
) -> TrafficVolume {
    crud::create_volume(
        db,
        &NewTrafficVolume {
            intersection,
            date: parse_date(date).unwrap(),
            time: parse_time(time).unwrap(),
            volume_north: north,
            volume_south: south,
            volume_east: east,
            volume_west: west,
        },
    )
    .await
    .unwrap()
}
