//! HTTP endpoint handlers

use super::response::ApiError;
use super::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use blastgate_core::{SearchMode, SearchPayload, VERSION};
use blastgate_tools::Tool;
use blastgate_utils::IndexKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// `POST /blastn`
pub async fn blastn(State(state): State<AppState>, body: Bytes) -> Result<Html<String>, ApiError> {
    search(state, SearchMode::Nucleotide, &body).await
}

/// `POST /blastp`
pub async fn blastp(State(state): State<AppState>, body: Bytes) -> Result<Html<String>, ApiError> {
    search(state, SearchMode::Protein, &body).await
}

async fn search(state: AppState, mode: SearchMode, body: &[u8]) -> Result<Html<String>, ApiError> {
    let payload = SearchPayload::from_slice(body).map_err(|e| {
        tracing::warn!("Rejected {} request: {}", mode, e);
        e
    })?;
    let report = state.service.search(mode, payload).await?;
    Ok(Html(report))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tools: BTreeMap<String, bool>,
    pub database_dir: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let tools = Tool::ALL
        .iter()
        .map(|tool| (tool.binary_name().to_string(), state.service.tool_available(*tool)))
        .collect();

    Json(HealthResponse {
        status: "ok",
        version: VERSION,
        tools,
        database_dir: state.config.database.database_dir.display().to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct DatabaseEntry {
    pub name: String,
    pub kind: IndexKind,
}

#[derive(Debug, Serialize)]
pub struct DatabasesResponse {
    pub databases: Vec<DatabaseEntry>,
}

/// `GET /databases`
pub async fn databases(State(state): State<AppState>) -> Result<Json<DatabasesResponse>, ApiError> {
    let databases = state
        .service
        .resolver()
        .list_databases()?
        .into_iter()
        .map(|db| DatabaseEntry {
            name: db.name,
            kind: db.kind,
        })
        .collect();

    Ok(Json(DatabasesResponse { databases }))
}
