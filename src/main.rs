use std::sync::Arc;

use contacts_app::build_application;
use contacts_persistence_sea_orm::{connect, contacts::ContactRepositoryImpl, create_tables};
use log::{error, info};

use crate::{config::ServerConfig, logs::init_logger};

mod config;
mod logs;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received. Preparing graceful exit...");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _log_handle = match init_logger(&config.log) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logger: {}", e);
            std::process::exit(1);
        }
    };

    let db = match connect(&config.database_url, config.db_max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!("Database connection error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = create_tables(&db).await {
        error!("Failed to create contacts table: {}", e);
        std::process::exit(1);
    }

    let contact_repo = Arc::new(ContactRepositoryImpl::new(db));
    let app = Arc::new(build_application(contact_repo));

    info!("Starting application");

    if let Err(e) = contacts_http_api::run(app, &config.http_addr(), shutdown_signal()).await {
        error!("HTTP API failed: {}", e);
        std::process::exit(1);
    }
}
