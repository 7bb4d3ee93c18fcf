#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the traffic map application.
//!
//! Serves the REST API for intersections and their traffic volume readings
//! under `/api`, and the built map front end from `app/dist` when it is
//! present. Storage is a `SQLite` database opened through
//! `switchy_database`.

mod handlers;
pub mod interactive;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, middleware, web};
use switchy_database::Database;
use traffic_map_database::db;
use traffic_map_server_models::ApiError;

/// Directory holding the built front end.
const FRONTEND_DIR: &str = "app/dist";

/// Shared application state.
pub struct AppState {
    /// Traffic database connection.
    pub db: Arc<dyn Database>,
}

/// Registers the `/api` scope with all routes and extractor error handlers.
///
/// Literal paths (`/intersections/latest_volume`, `/volumes/by-date`, ...)
/// are registered before the `{id}` resources they would otherwise be
/// captured by. Routes are declared without trailing slashes; the app is
/// expected to be wrapped in [`middleware::NormalizePath::trim`] so that
/// `/api/intersections/` resolves too.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .route("/health", web::get().to(handlers::health))
            .service(
                web::resource("/intersections")
                    .route(web::get().to(handlers::list_intersections))
                    .route(web::post().to(handlers::create_intersection)),
            )
            .route(
                "/intersections/latest_volume",
                web::get().to(handlers::intersections_latest_volume),
            )
            .service(
                web::resource("/intersections/{id}")
                    .route(web::get().to(handlers::get_intersection))
                    .route(web::put().to(handlers::replace_intersection))
                    .route(web::patch().to(handlers::update_intersection))
                    .route(web::delete().to(handlers::delete_intersection)),
            )
            .route(
                "/intersections/{id}/volumes",
                web::get().to(handlers::intersection_volumes),
            )
            .service(
                web::resource("/volumes")
                    .route(web::get().to(handlers::list_volumes))
                    .route(web::post().to(handlers::create_volume)),
            )
            .route("/volumes/by-date", web::get().to(handlers::volumes_by_date))
            .route(
                "/volumes/by-date-range",
                web::get().to(handlers::volumes_by_date_range),
            )
            .service(
                web::resource("/volumes/{id}")
                    .route(web::get().to(handlers::get_volume))
                    .route(web::put().to(handlers::replace_volume))
                    .route(web::patch().to(handlers::update_volume))
                    .route(web::delete().to(handlers::delete_volume)),
            ),
    );
}

fn bad_request(cause: impl std::fmt::Debug + std::fmt::Display + 'static) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ApiError::new(cause.to_string()));
    InternalError::from_response(cause, response).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

/// Starts the traffic map API server.
///
/// Opens the database named by `DATABASE_PATH` (creating the schema if
/// needed) and starts the Actix-Web HTTP server on `BIND_ADDR:PORT`. This is
/// a regular async function; the caller provides the async runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the database cannot be opened, or
/// if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to database...");
    let db_conn = db::connect_from_env()
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to open database: {e}")))?;

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    let serve_frontend = Path::new(FRONTEND_DIR).is_dir();
    if !serve_frontend {
        log::info!("{FRONTEND_DIR} not found, serving the API only");
    }

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .configure(configure);

        if serve_frontend {
            app.service(Files::new("/", FRONTEND_DIR).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
