use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::composer::ComposedDocument;
use crate::errors::AppError;
use crate::layout::{render, RenderPlan, TextRenderer};
use crate::models::document::{DocumentKind, DocumentRequest};
use crate::pricing::Totals;
use crate::state::AppState;

#[derive(Serialize)]
pub struct PlanResponse {
    pub kind: DocumentKind,
    pub file_stem: String,
    pub page_count: usize,
    pub totals: Totals,
    pub plan: RenderPlan,
}

/// POST /api/v1/documents/plan
pub async fn handle_plan(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<PlanResponse>, AppError> {
    let doc = build(&state, payload).await?;
    Ok(Json(PlanResponse {
        kind: doc.kind,
        file_stem: doc.file_stem,
        page_count: doc.plan.page_count(),
        totals: doc.totals,
        plan: doc.plan,
    }))
}

/// POST /api/v1/documents/preview
/// Returns the plain-text rendering as a download.
pub async fn handle_preview(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let doc = build(&state, payload).await?;
    let text = render(&doc.plan, TextRenderer::new(doc.plan.geometry));
    let disposition = format!("attachment; filename=\"{}.txt\"", doc.file_stem);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
        .into_response())
}

/// Runs one build on the blocking pool. Layout is CPU-bound.
async fn build(
    state: &AppState,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<ComposedDocument, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let build_id = Uuid::new_v4();
    let today = Local::now().date_naive();
    info!(
        %build_id,
        kind = %req.kind,
        items = req.items.len(),
        "Document build requested"
    );

    let composer = state.composer.clone();
    let doc = tokio::task::spawn_blocking(move || composer.compose(&req, today))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in build: {e}")))??;

    info!(
        %build_id,
        file_stem = %doc.file_stem,
        pages = doc.plan.page_count(),
        "Document build finished"
    );
    Ok(doc)
}
