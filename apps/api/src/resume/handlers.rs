//! Axum route handlers for the resume form and PDF download.

use axum::{
    extract::{Multipart, Query, State},
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderMap, HeaderName, HeaderValue,
    },
    response::{Html, IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::render::{render, RenderedResume};
use crate::resume::form::ResumeForm;
use crate::resume::form_page::{clamp_groups, render_form_page};
use crate::state::AppState;

/// Every download is offered under the same name.
pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"resume.pdf\"";

static PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");
static RENDER_WARNING_HEADER: HeaderName = HeaderName::from_static("x-render-warning");

#[derive(Debug, Deserialize)]
pub struct FormPageQuery {
    pub jobs: Option<usize>,
    pub education: Option<usize>,
}

/// GET /
///
/// The resume form, with as many job/education groups as the query asks for.
pub async fn handle_form_page(Query(query): Query<FormPageQuery>) -> Html<String> {
    Html(render_form_page(
        clamp_groups(query.jobs),
        clamp_groups(query.education),
    ))
}

/// POST /api/v1/resumes/pdf
///
/// Multipart submission of the form. Responds with the PDF as a download.
pub async fn handle_render_form(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = ResumeForm::from_multipart(multipart).await?;
    let (record, image) = form.into_parts();
    render_download(&state, record, image).await
}

/// POST /api/v1/resumes/pdf/json
///
/// Same document from a JSON `ResumeRecord`. No picture on this route.
pub async fn handle_render_json(
    State(state): State<AppState>,
    Json(record): Json<ResumeRecord>,
) -> Result<Response, AppError> {
    render_download(&state, record, None).await
}

/// Runs the renderer off the async executor. The uploaded picture is moved
/// into the blocking task and dropped with it, whatever the outcome.
async fn render_download(
    state: &AppState,
    record: ResumeRecord,
    image: Option<Bytes>,
) -> Result<Response, AppError> {
    let render_id = Uuid::new_v4();
    let config = state.page_config.clone();
    let created_at = Utc::now();

    info!(
        %render_id,
        jobs = record.experience.len(),
        education = record.education.len(),
        has_image = image.is_some(),
        "Rendering resume"
    );

    let rendered = tokio::task::spawn_blocking(move || {
        render(&record, image.as_deref(), &config, Some(created_at))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    for warning in &rendered.warnings {
        warn!(%render_id, "Resume rendered without profile image: {warning}");
    }
    info!(
        %render_id,
        pages = rendered.page_count,
        bytes = rendered.pdf.len(),
        "Resume rendered"
    );

    Ok(pdf_download(rendered))
}

fn pdf_download(rendered: RenderedResume) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static(DOWNLOAD_DISPOSITION),
    );
    headers.insert(
        PAGE_COUNT_HEADER.clone(),
        HeaderValue::from(rendered.page_count),
    );
    for warning in &rendered.warnings {
        if let Ok(value) = HeaderValue::from_str(&warning.to_string()) {
            headers.append(RENDER_WARNING_HEADER.clone(), value);
        }
    }

    (headers, rendered.pdf).into_response()
}
