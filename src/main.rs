// src/main.rs
mod api;
mod catalog;
mod config;
mod model;
mod placement;
mod state;
mod types;

use config::AppConfig;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();

    println!("🚀 Packaging visualizer starting...");
    api::start_api_server(app_config.api, app_config.planner).await;
}
