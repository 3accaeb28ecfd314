use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::header, response::IntoResponse, routing::get, Router};
use sqlx::SqlitePool;

use crate::{
    db::queries::results::get_all_results,
    reports::{CsvExporter, Summary},
    server::app::AppState,
};

use super::ApiResponse;

#[derive(Template, WebTemplate)]
#[template(path = "results.html")]
struct ResultsPage {
    summary: Summary,
}

async fn results_page(State(pool): State<SqlitePool>) -> ApiResponse<ResultsPage> {
    let results = get_all_results(&pool).await?;
    Ok(ResultsPage {
        summary: Summary::from_results(results),
    })
}

async fn export(
    State(pool): State<SqlitePool>,
    State(exporter): State<CsvExporter>,
) -> ApiResponse<impl IntoResponse> {
    let data = exporter.export(&pool).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", exporter.file_name()),
        ),
    ];
    Ok((headers, data))
}

pub fn results_router(state: AppState) -> Router {
    Router::new()
        .route("/results", get(results_page))
        .route("/export", get(export))
        .with_state(state)
}
