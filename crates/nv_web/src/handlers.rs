use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use nv_core::AnalysisResult;
use crate::error::ApiError;
use crate::pages;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    #[serde(default)]
    pub company_name: String,
}

async fn run(state: &AppState, company_name: &str) -> Result<AnalysisResult, ApiError> {
    if company_name.trim().is_empty() {
        return Err(ApiError::BadRequest("company_name must not be empty".to_string()));
    }
    info!("📨 Analysis requested for \"{}\"", company_name);
    state.pipeline.run(company_name).await.map_err(|e| {
        error!("❌ Analysis of \"{}\" failed: {}", company_name, e);
        ApiError::from(e)
    })
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalysisResult>, ApiError> {
    Ok(Json(run(&state, &params.company_name).await?))
}

pub async fn form() -> Html<String> {
    Html(pages::form_page(""))
}

pub async fn submit(State(state): State<Arc<AppState>>, Form(params): Form<AnalyzeParams>) -> Response {
    match run(&state, &params.company_name).await {
        Ok(result) => {
            let report = serde_json::to_string_pretty(&result).unwrap_or_else(|e| e.to_string());
            let audio = state.audio_url(&result.audio_file);
            Html(pages::report_page(&params.company_name, &report, audio.as_deref())).into_response()
        }
        Err(e) => (e.status(), Html(pages::error_page(&params.company_name, &e.message()))).into_response(),
    }
}
