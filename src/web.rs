use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::infer::{Client, Completion, Transport};

pub mod dto;
mod handlers;
pub mod page;

pub struct AppState<C = Transport> {
    pub client: Client<C>,
}

pub fn build_router<C: Completion + 'static>(state: Arc<AppState<C>>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([http::header::CONTENT_TYPE]);

    // Build router
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit::<C>))
        .route("/check_author", post(handlers::check_author::<C>))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve<C: Completion + 'static>(port: u16, client: Client<C>) -> anyhow::Result<()> {
    let state = Arc::new(AppState { client });
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, router.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
