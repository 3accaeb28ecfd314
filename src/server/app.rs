use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::routes::{quiz_router, results_router};
use crate::quiz::QuestionStore;
use crate::reports::CsvExporter;
use crate::settings::Settings;

#[derive(FromRef, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub questions: QuestionStore,
    pub exporter: CsvExporter,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: &Settings) -> Self {
        AppState {
            pool,
            questions: QuestionStore::new(&settings.questions_dir),
            exporter: CsvExporter::new(&settings.export_path, settings.export_headers()),
            static_dir: settings.static_dir.clone(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(&state.static_dir))
        .merge(quiz_router(state.clone()))
        .merge(results_router(state.clone()))
        .fallback(|| async {
            tracing::info!("Fallback");
            StatusCode::NOT_FOUND
        })
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: &Settings, pool: SqlitePool) -> anyhow::Result<()> {
    let state = AppState::new(pool, settings);
    let app = router(state);
    let listener = TcpListener::bind(&settings.bind_addr).await?;

    tracing::info!("Serving on {}", settings.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    if let Err(e) = encoder.encode(&metrics, &mut buf) {
        tracing::error!("Failed to encode metrics: {e}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        buf,
    )
        .into_response()
}
