//! HTTP handler functions for the traffic map API.

use actix_web::{HttpResponse, web};
use traffic_map_database::{DbError, crud, queries};
use traffic_map_database_models::{NewTrafficVolume, TrafficVolumePatch, VolumeQuery};
use traffic_map_server_models::{
    ApiError, ApiHealth, ApiIntersection, ApiIntersectionLatestVolume, ApiTrafficVolume,
    DateQueryParams, DateRangeQueryParams, IntersectionBody, IntersectionPatchBody,
    TrafficVolumeBody, TrafficVolumePatchBody, VolumeQueryParams,
};
use traffic_map_traffic_models::{Intersection, TrafficVolume, VolumeSnapshot};

use crate::AppState;

/// Maps a database error to its HTTP response.
///
/// Validation failures are the caller's fault (400) and unknown IDs are 404.
/// Storage failures are logged and answered with `failure` only, so internal
/// details never reach the client.
fn error_response(failure: &str, e: &DbError) -> HttpResponse {
    match e {
        DbError::Validation { .. } => HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
        DbError::NotFound { .. } => HttpResponse::NotFound().json(ApiError::new(e.to_string())),
        _ => {
            log::error!("{failure}: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(failure))
        }
    }
}

fn volumes_response(result: Result<Vec<TrafficVolume>, DbError>, failure: &str) -> HttpResponse {
    match result {
        Ok(rows) => {
            let api_volumes: Vec<ApiTrafficVolume> =
                rows.into_iter().map(ApiTrafficVolume::from).collect();
            HttpResponse::Ok().json(api_volumes)
        }
        Err(e) => error_response(failure, &e),
    }
}

/// Serializes one intersection with its latest-volume snapshot.
async fn intersection_with_snapshot(
    state: &AppState,
    intersection: Intersection,
) -> Result<ApiIntersection, DbError> {
    let snapshot = queries::latest_snapshot(state.db.as_ref(), intersection.id).await?;
    Ok(ApiIntersection::new(intersection, snapshot))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/intersections`
///
/// Lists intersections with observed traffic, each with the directional
/// counts of its latest reading.
pub async fn list_intersections(state: web::Data<AppState>) -> HttpResponse {
    let db = state.db.as_ref();

    let result = async {
        let intersections = queries::list_observed_intersections(db).await?;
        let latest = queries::latest_volumes(db).await?;

        Ok::<_, DbError>(
            intersections
                .into_iter()
                .map(|i| {
                    let snapshot = latest
                        .get(&i.id)
                        .map(TrafficVolume::snapshot)
                        .unwrap_or_default();
                    ApiIntersection::new(i, snapshot)
                })
                .collect::<Vec<_>>(),
        )
    }
    .await;

    match result {
        Ok(api_intersections) => HttpResponse::Ok().json(api_intersections),
        Err(e) => error_response("Failed to query intersections", &e),
    }
}

/// `GET /api/intersections/latest_volume`
///
/// Lists every intersection with its latest reading's counts, total, and
/// timestamp, for the map markers.
pub async fn intersections_latest_volume(state: web::Data<AppState>) -> HttpResponse {
    let db = state.db.as_ref();

    let result = async {
        let intersections = crud::list_intersections(db).await?;
        let latest = queries::latest_volumes(db).await?;

        Ok::<_, DbError>(
            intersections
                .into_iter()
                .map(|i| {
                    let reading = latest.get(&i.id);
                    ApiIntersectionLatestVolume::new(i, reading)
                })
                .collect::<Vec<_>>(),
        )
    }
    .await;

    match result {
        Ok(summaries) => HttpResponse::Ok().json(summaries),
        Err(e) => error_response("Failed to query latest volumes", &e),
    }
}

/// `POST /api/intersections`
pub async fn create_intersection(
    state: web::Data<AppState>,
    body: web::Json<IntersectionBody>,
) -> HttpResponse {
    match crud::create_intersection(state.db.as_ref(), &body.into_inner().into()).await {
        Ok(intersection) => {
            // A new intersection has no readings yet.
            HttpResponse::Created().json(ApiIntersection::new(intersection, VolumeSnapshot::default()))
        }
        Err(e) => error_response("Failed to create intersection", &e),
    }
}

/// `GET /api/intersections/{id}`
pub async fn get_intersection(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let result = match crud::get_intersection(state.db.as_ref(), path.into_inner()).await {
        Ok(intersection) => intersection_with_snapshot(&state, intersection).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(api) => HttpResponse::Ok().json(api),
        Err(e) => error_response("Failed to query intersection", &e),
    }
}

/// `PUT /api/intersections/{id}`
pub async fn replace_intersection(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<IntersectionBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = match crud::replace_intersection(state.db.as_ref(), id, &body.into_inner().into())
        .await
    {
        Ok(intersection) => intersection_with_snapshot(&state, intersection).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(api) => HttpResponse::Ok().json(api),
        Err(e) => error_response("Failed to update intersection", &e),
    }
}

/// `PATCH /api/intersections/{id}`
pub async fn update_intersection(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<IntersectionPatchBody>,
) -> HttpResponse {
    let id = path.into_inner();
    let result = match crud::update_intersection(state.db.as_ref(), id, body.into_inner().into())
        .await
    {
        Ok(intersection) => intersection_with_snapshot(&state, intersection).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(api) => HttpResponse::Ok().json(api),
        Err(e) => error_response("Failed to update intersection", &e),
    }
}

/// `DELETE /api/intersections/{id}`
///
/// Also deletes the intersection's readings.
pub async fn delete_intersection(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    match crud::delete_intersection(state.db.as_ref(), path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("Failed to delete intersection", &e),
    }
}

/// `GET /api/intersections/{id}/volumes`
pub async fn intersection_volumes(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> HttpResponse {
    volumes_response(
        queries::volumes_for_intersection(state.db.as_ref(), path.into_inner()).await,
        "Failed to query intersection volumes",
    )
}

/// `GET /api/volumes?intersection_id=&date=`
///
/// Readings matching the optional filters, ordered by time of day.
pub async fn list_volumes(
    state: web::Data<AppState>,
    params: web::Query<VolumeQueryParams>,
) -> HttpResponse {
    let query = match VolumeQuery::try_from(params.into_inner()) {
        Ok(query) => query,
        Err(e) => return HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    };

    volumes_response(
        queries::query_volumes(state.db.as_ref(), &query).await,
        "Failed to query volumes",
    )
}

/// `POST /api/volumes`
pub async fn create_volume(
    state: web::Data<AppState>,
    body: web::Json<TrafficVolumeBody>,
) -> HttpResponse {
    let new = match NewTrafficVolume::try_from(body.into_inner()) {
        Ok(new) => new,
        Err(e) => return HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    };

    match crud::create_volume(state.db.as_ref(), &new).await {
        Ok(volume) => HttpResponse::Created().json(ApiTrafficVolume::from(volume)),
        Err(e) => error_response("Failed to create volume", &e),
    }
}

/// `GET /api/volumes/by-date?date=YYYY-MM-DD`
pub async fn volumes_by_date(
    state: web::Data<AppState>,
    params: web::Query<DateQueryParams>,
) -> HttpResponse {
    volumes_response(
        queries::volumes_by_date(state.db.as_ref(), params.date.as_deref()).await,
        "Failed to query volumes by date",
    )
}

/// `GET /api/volumes/by-date-range?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn volumes_by_date_range(
    state: web::Data<AppState>,
    params: web::Query<DateRangeQueryParams>,
) -> HttpResponse {
    volumes_response(
        queries::volumes_by_date_range(
            state.db.as_ref(),
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        )
        .await,
        "Failed to query volumes by date range",
    )
}

/// `GET /api/volumes/{id}`
pub async fn get_volume(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    match crud::get_volume(state.db.as_ref(), path.into_inner()).await {
        Ok(volume) => HttpResponse::Ok().json(ApiTrafficVolume::from(volume)),
        Err(e) => error_response("Failed to query volume", &e),
    }
}

/// `PUT /api/volumes/{id}`
pub async fn replace_volume(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<TrafficVolumeBody>,
) -> HttpResponse {
    let new = match NewTrafficVolume::try_from(body.into_inner()) {
        Ok(new) => new,
        Err(e) => return HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    };

    match crud::replace_volume(state.db.as_ref(), path.into_inner(), &new).await {
        Ok(volume) => HttpResponse::Ok().json(ApiTrafficVolume::from(volume)),
        Err(e) => error_response("Failed to update volume", &e),
    }
}

/// `PATCH /api/volumes/{id}`
pub async fn update_volume(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<TrafficVolumePatchBody>,
) -> HttpResponse {
    let patch = match TrafficVolumePatch::try_from(body.into_inner()) {
        Ok(patch) => patch,
        Err(e) => return HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    };

    match crud::update_volume(state.db.as_ref(), path.into_inner(), patch).await {
        Ok(volume) => HttpResponse::Ok().json(ApiTrafficVolume::from(volume)),
        Err(e) => error_response("Failed to update volume", &e),
    }
}

/// `DELETE /api/volumes/{id}`
pub async fn delete_volume(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    match crud::delete_volume(state.db.as_ref(), path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("Failed to delete volume", &e),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, middleware, test};
    use switchy_database::Database;
    use traffic_map_database::db::open_db;
    use traffic_map_database_models::NewIntersection;
    use traffic_map_traffic_models::{parse_date, parse_time};

    use super::*;
    use crate::configure;

    struct TempDbPath(PathBuf);

    impl Drop for TempDbPath {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    async fn temp_db() -> (Arc<dyn Database>, TempDbPath) {
        let path = std::env::temp_dir().join(format!(
            "traffic_map_server_test_{}.db",
            uuid::Uuid::new_v4()
        ));
        let db = open_db(&path).await.unwrap();
        (Arc::from(db), TempDbPath(path))
    }

    async fn seed_intersection(db: &dyn Database, name: &str) -> Intersection {
        crud::create_intersection(
            db,
            &NewIntersection {
                name: name.to_string(),
                latitude: 37.5,
                longitude: 127.0,
            },
        )
        .await
        .unwrap()
    }

    async fn seed_volume(db: &dyn Database, intersection: i64, date: &str, time: &str, north: u32) {
        crud::create_volume(
            db,
            &NewTrafficVolume {
                intersection,
                date: parse_date(date).unwrap(),
                time: parse_time(time).unwrap(),
                volume_north: north,
                volume_south: 0,
                volume_east: 0,
                volume_west: 0,
            },
        )
        .await
        .unwrap();
    }

    macro_rules! app {
        ($db:expr) => {
            test::init_service(
                App::new()
                    .wrap(middleware::NormalizePath::trim())
                    .app_data(web::Data::new(AppState { db: $db.clone() }))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn lists_only_intersections_with_observed_traffic() {
        let (db, _path) = temp_db().await;
        let busy = seed_intersection(db.as_ref(), "Busy").await;
        let idle = seed_intersection(db.as_ref(), "Idle").await;
        seed_intersection(db.as_ref(), "Unmeasured").await;
        seed_volume(db.as_ref(), busy.id, "2024-01-01", "08:00", 5).await;
        seed_volume(db.as_ref(), busy.id, "2024-01-02", "07:00", 9).await;
        seed_volume(db.as_ref(), idle.id, "2024-01-01", "08:00", 0).await;

        let app = app!(db);
        let req = test::TestRequest::get().uri("/api/intersections").to_request();
        let body: Vec<ApiIntersection> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0].id, busy.id);
        assert_eq!(body[0].volume_north, 9);
    }

    #[actix_web::test]
    async fn by_date_rejects_malformed_date() {
        let (db, _path) = temp_db().await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri("/api/volumes/by-date?date=03-01-2024")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.error.contains("03-01-2024"));

        let req = test::TestRequest::get().uri("/api/volumes/by-date").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Date parameter is required");
    }

    #[actix_web::test]
    async fn by_date_range_returns_inclusive_interval() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        for date in ["2023-12-31", "2024-01-01", "2024-01-31", "2024-02-01"] {
            seed_volume(db.as_ref(), a.id, date, "08:00", 1).await;
        }
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri("/api/volumes/by-date-range?start_date=2024-01-01&end_date=2024-01-31")
            .to_request();
        let body: Vec<ApiTrafficVolume> = test::call_and_read_body_json(&app, req).await;
        let dates: Vec<String> = body.iter().map(|v| v.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-31"]);

        let req = test::TestRequest::get()
            .uri("/api/volumes/by-date-range?start_date=2024-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn volume_list_filters_and_orders_by_time() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        let b = seed_intersection(db.as_ref(), "B").await;
        seed_volume(db.as_ref(), a.id, "2024-03-01", "18:00", 1).await;
        seed_volume(db.as_ref(), a.id, "2024-03-01", "07:00", 2).await;
        seed_volume(db.as_ref(), b.id, "2024-03-01", "06:00", 3).await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri(&format!("/api/volumes?intersection_id={}&date=2024-03-01", a.id))
            .to_request();
        let body: Vec<ApiTrafficVolume> = test::call_and_read_body_json(&app, req).await;
        let norths: Vec<u32> = body.iter().map(|v| v.volume_north).collect();
        assert_eq!(norths, vec![2, 1]);

        let req = test::TestRequest::get()
            .uri("/api/volumes?intersection_id=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Invalid intersection_id 'abc': expected an integer");
    }

    #[actix_web::test]
    async fn blank_volume_filters_are_ignored() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        let b = seed_intersection(db.as_ref(), "B").await;
        seed_volume(db.as_ref(), a.id, "2024-03-01", "09:00", 1).await;
        seed_volume(db.as_ref(), b.id, "2024-03-01", "08:00", 2).await;
        seed_volume(db.as_ref(), b.id, "2024-03-02", "08:00", 3).await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri("/api/volumes?intersection_id=&date=2024-03-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<ApiTrafficVolume> = test::read_body_json(resp).await;
        let norths: Vec<u32> = body.iter().map(|v| v.volume_north).collect();
        assert_eq!(norths, vec![2, 1]);

        let req = test::TestRequest::get()
            .uri("/api/volumes?intersection_id=&date=")
            .to_request();
        let body: Vec<ApiTrafficVolume> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 3);
    }

    #[actix_web::test]
    async fn trailing_slash_paths_reach_the_same_routes() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        seed_volume(db.as_ref(), a.id, "2024-01-02", "07:00", 9).await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri("/api/intersections/latest_volume/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<ApiIntersectionLatestVolume> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].total_volume, 9);

        let req = test::TestRequest::get()
            .uri("/api/intersections/")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Vec<ApiIntersection> = test::read_body_json(resp).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].id, a.id);
    }

    #[actix_web::test]
    async fn storage_failures_hide_details() {
        let (db, _path) = temp_db().await;
        db.exec_raw("DROP TABLE traffic_volumes").await.unwrap();
        let app = app!(db);

        let req = test::TestRequest::get().uri("/api/volumes").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "error": "Failed to query volumes" }));
    }

    #[actix_web::test]
    async fn malformed_json_body_is_a_bad_request() {
        let (db, _path) = temp_db().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/intersections")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\": \"A\", \"latitude\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert!(!body.error.is_empty());

        let req = test::TestRequest::get().uri("/api/intersections").to_request();
        let body: Vec<ApiIntersection> = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn volume_crud_over_http() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/volumes")
            .set_json(serde_json::json!({
                "intersection": a.id,
                "date": "2024-03-01",
                "time": "08:00",
                "volume_north": 7,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: ApiTrafficVolume = test::read_body_json(resp).await;
        assert_eq!(created.volume_north, 7);
        assert_eq!(created.volume_west, 0);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/volumes/{}", created.id))
            .set_json(serde_json::json!({ "volume_west": 4 }))
            .to_request();
        let patched: ApiTrafficVolume = test::call_and_read_body_json(&app, req).await;
        assert_eq!(patched.volume_north, 7);
        assert_eq!(patched.volume_west, 4);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/volumes/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/volumes/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn volume_for_unknown_intersection_is_rejected() {
        let (db, _path) = temp_db().await;
        let app = app!(db);

        let req = test::TestRequest::post()
            .uri("/api/volumes")
            .set_json(serde_json::json!({
                "intersection": 404,
                "date": "2024-03-01",
                "time": "08:00",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, "Intersection 404 does not exist");
    }

    #[actix_web::test]
    async fn intersection_detail_includes_latest_snapshot() {
        let (db, _path) = temp_db().await;
        let a = seed_intersection(db.as_ref(), "A").await;
        seed_volume(db.as_ref(), a.id, "2024-01-02", "07:00", 9).await;
        seed_volume(db.as_ref(), a.id, "2024-01-01", "08:00", 5).await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri(&format!("/api/intersections/{}", a.id))
            .to_request();
        let body: ApiIntersection = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.volume_north, 9);

        let req = test::TestRequest::get()
            .uri("/api/intersections/latest_volume")
            .to_request();
        let body: Vec<ApiIntersectionLatestVolume> =
            test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].total_volume, 9);

        let req = test::TestRequest::get()
            .uri(&format!("/api/intersections/{}/volumes", a.id))
            .to_request();
        let body: Vec<ApiTrafficVolume> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.len(), 2);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/intersections/{}", a.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/intersections/{}", a.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.error, format!("Intersection {} not found", a.id));
    }

    #[actix_web::test]
    async fn non_numeric_id_is_a_bad_request() {
        let (db, _path) = temp_db().await;
        let app = app!(db);

        let req = test::TestRequest::get()
            .uri("/api/intersections/abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
