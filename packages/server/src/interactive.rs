//! Interactive mode for the server.
//!
//! Prompts the user for the database location, bind address, and port
//! before starting the server.

use dialoguer::{Confirm, Input};
use traffic_map_database::db::{DEFAULT_DB_PATH, db_path_from_env};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks the user for a database path, bind address, and port, sets the
/// corresponding environment variables (`DATABASE_PATH`, `BIND_ADDR`,
/// `PORT`), and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Traffic Map Server");
    println!();

    let default_db = db_path_from_env().display().to_string();
    let db_path: String = Input::new()
        .with_prompt("Database path")
        .default(default_db)
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8000".to_string())
        .validate_with(|input: &String| {
            input
                .parse::<u16>()
                .map(|_| ())
                .map_err(|_| "Port must be a number between 0 and 65535")
        })
        .interact_text()
        .unwrap_or_else(|_| "8000".to_string());

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("DATABASE_PATH", &db_path);
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!(
            "Start server on {bind_addr}:{port_str} using {db_path}?"
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
