use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::ItineraryService;
use crate::api::{self, AppState};
use crate::config::ServerConfig;

pub fn app(service: Arc<ItineraryService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(AppState { service }))
        .layer(cors)
}

pub async fn run(config: &ServerConfig, service: Arc<ItineraryService>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        mode = ?service.mode(),
        "Web server running at http://{}",
        listener.local_addr()?
    );
    axum::serve(listener, app(service)).await?;
    Ok(())
}
