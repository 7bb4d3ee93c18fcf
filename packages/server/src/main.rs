#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Traffic map API server binary.
//!
//! Configuration comes from `DATABASE_PATH`, `BIND_ADDR`, `PORT`, and
//! `RUST_LOG`; `--interactive` prompts for the first three instead.

use clap::Parser;

#[derive(Parser)]
#[command(name = "traffic_map_server", about = "Traffic volume API for the map front end")]
struct Cli {
    /// Prompt for the database path, bind address, and port before starting.
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    if cli.interactive {
        traffic_map_server::interactive::run().await
    } else {
        traffic_map_server::run_server().await
    }
}
