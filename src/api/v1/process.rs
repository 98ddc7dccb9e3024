//! Document question endpoint

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::document::{DocumentInput, DocumentKind};
use crate::domain::FinalResponse;

const QUERY_FIELD: &str = "query";
const FILE_FIELD: &str = "file";

/// POST /v1/process - answer a question about an uploaded policy document
///
/// Expects `multipart/form-data` with a `query` text field and a `file`
/// field holding a PDF or plain-text document.
pub async fn process_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FinalResponse>, ApiError> {
    let (document, query) = read_upload(multipart).await?;

    debug!(
        filename = document.filename().unwrap_or("-"),
        content_type = document.content_type().unwrap_or("-"),
        bytes = document.bytes().len(),
        "Processing uploaded document"
    );

    let response = state
        .advisor
        .process_document_and_query(&document, &query)
        .await
        .map_err(|e| {
            error!(error = %e, "Policy pipeline failed");
            ApiError::from(e)
        })?;

    Ok(Json(response))
}

async fn read_upload(mut multipart: Multipart) -> Result<(DocumentInput, String), ApiError> {
    let mut query: Option<String> = None;
    let mut document: Option<DocumentInput> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);

        match name.as_deref() {
            Some(QUERY_FIELD) => {
                query = Some(field.text().await.map_err(multipart_error)?);
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;

                let mut input = DocumentInput::new(bytes);
                if let Some(name) = filename {
                    input = input.with_filename(name);
                }
                if let Some(ct) = content_type {
                    input = input.with_content_type(ct);
                }
                document = Some(input);
            }
            _ => {}
        }
    }

    let query = query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            ApiError::bad_request("A non-empty query is required").with_param(QUERY_FIELD)
        })?;

    let document = document.ok_or_else(|| {
        ApiError::bad_request("A policy document file is required").with_param(FILE_FIELD)
    })?;

    if document.kind() == DocumentKind::Unknown {
        return Err(
            ApiError::bad_request("Only PDF or plain-text files are supported")
                .with_param(FILE_FIELD)
                .with_code("unsupported_file_type"),
        );
    }

    Ok((document, query))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(err.body_text())
    } else {
        ApiError::bad_request(err.body_text())
    }
}
