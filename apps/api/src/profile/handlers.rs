use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::ExtractionError;
use crate::models::document::RawDocument;
use crate::models::profile::{RawCandidateFields, ValidatedProfileFragment};
use crate::profile::demo::{demo_output, DEMO_NOTICE};
use crate::state::AppState;
use crate::validation::validate;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub extraction_id: Uuid,
    pub extracted_at: DateTime<Utc>,
    pub demo_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,
    pub fragment: ValidatedProfileFragment,
}

#[derive(Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

struct Upload {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/profile/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractionResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let upload = read_upload(multipart, limit).await?;
    if upload.bytes.len() > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }

    let doc = RawDocument::new(upload.bytes, upload.content_type, upload.file_name);
    let demo_mode = state.config.demo_mode;

    let output = if demo_mode {
        demo_output(&doc, state.observer.as_ref())?
    } else {
        let pipeline = state.pipeline.clone();
        let observer = state.observer.clone();
        tokio::task::spawn_blocking(move || pipeline.run(&doc, observer.as_ref()))
            .await
            .map_err(|e| ExtractionError::unavailable(format!("extraction worker failed: {e}")))??
    };

    let extraction_id = Uuid::new_v4();
    if output.fragment.is_empty() {
        info!("Extraction {extraction_id} produced no usable fields; user fills the form manually");
    } else {
        info!(
            "Extraction {extraction_id} pre-filled {} fields",
            output.fragment.extracted_fields.len()
        );
    }

    Ok(Json(ExtractionResponse {
        extraction_id,
        extracted_at: Utc::now(),
        demo_mode,
        notice: demo_mode.then_some(DEMO_NOTICE),
        page_count: output.page_count,
        fragment: output.fragment,
    }))
}

/// Pulls the `file` part out of the form; other parts are ignored.
async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        return Ok(Upload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(
        "Der blev ikke sendt nogen fil. Vælg dit CV som PDF eller DOCX.".to_string(),
    ))
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Ugyldig upload: {}", e.body_text()))
    }
}

/// POST /api/v1/profile/parse-text
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> Result<Json<ValidatedProfileFragment>, AppError> {
    if req.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Teksten er tom. Indsæt indholdet af dit CV.".to_string(),
        ));
    }
    Ok(Json(state.pipeline.run_text(&req.text, state.observer.as_ref())))
}

/// POST /api/v1/profile/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    Json(raw): Json<RawCandidateFields>,
) -> Json<ValidatedProfileFragment> {
    Json(validate(&raw, state.observer.as_ref()))
}
