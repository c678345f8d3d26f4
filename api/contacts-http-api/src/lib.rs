use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use contacts_app::Application;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

mod contacts;
mod error;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/contacts/{id}",
            put(contacts::update_contact).delete(contacts::delete_contact),
        )
        .layer(CorsLayer::permissive())
        .with_state(AppState { app })
}

pub async fn run(
    app: Arc<Application>,
    addr: &str,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);
    serve(app, listener, shutdown_signal).await
}

pub async fn serve(
    app: Arc<Application>,
    listener: TcpListener,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
