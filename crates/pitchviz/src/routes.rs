use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pitchviz_core::{AnalysisResult, AppContext, Upload, UploadOutcome};
use serde::Serialize;

use crate::page;

/// Multipart form field carrying the CSV file.
pub const UPLOAD_FIELD: &str = "file";

pub type SharedContext = Arc<AppContext>;

pub fn router(context: AppContext) -> Router {
    let upload_limit = context.config().max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/api/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(Arc::new(context))
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApiResponse {
    Analyzed {
        result: AnalysisResult,
        message: Option<String>,
    },
    Rejected {
        message: String,
    },
}

struct ReceivedFile {
    file_name: String,
    content: Bytes,
}

impl ReceivedFile {
    fn as_upload(&self) -> Upload<'_> {
        Upload {
            file_name: &self.file_name,
            content: &self.content[..],
        }
    }
}

async fn index() -> Html<String> {
    Html(page::render(None))
}

async fn upload(
    State(context): State<SharedContext>,
    multipart: Multipart,
) -> Result<Response, MultipartError> {
    let file = read_upload(multipart).await?;
    let outcome = context.on_upload(file.as_ref().map(ReceivedFile::as_upload));

    let status = outcome_status(&outcome);
    Ok((status, Html(page::render(Some(&outcome)))).into_response())
}

async fn analyze(
    State(context): State<SharedContext>,
    multipart: Multipart,
) -> Result<Response, MultipartError> {
    let file = read_upload(multipart).await?;

    let response = match context.analyze_upload(file.as_ref().map(ReceivedFile::as_upload)) {
        Ok(result) => {
            let status = result_status(&result);
            let message = result.error_message();
            (status, Json(ApiResponse::Analyzed { result, message }))
        }
        Err(err) => {
            tracing::info!(error = %err, "upload rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::Rejected {
                    message: err.to_string(),
                }),
            )
        }
    };

    Ok(response.into_response())
}

/// First `file` field of the form. A field without a file name means nothing was chosen.
async fn read_upload(mut multipart: Multipart) -> Result<Option<ReceivedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        if file_name.is_empty() {
            return Ok(None);
        }
        return Ok(Some(ReceivedFile { file_name, content }));
    }

    Ok(None)
}

fn outcome_status(outcome: &UploadOutcome) -> StatusCode {
    match outcome {
        UploadOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        UploadOutcome::Analyzed { result, .. } => result_status(result),
        UploadOutcome::DrawFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn result_status(result: &AnalysisResult) -> StatusCode {
    match result {
        AnalysisResult::SchemaError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisResult::NoInputYet | AnalysisResult::Success(_) => StatusCode::OK,
    }
}
