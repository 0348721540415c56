use axum::{
    body::Body,
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub company_name: String,
    pub url: Url,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    detail: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// Service banner
pub async fn root_handler(Extension(state): Extension<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        detail: format!("Welcome to the Root of the {} Service!", state.app_name),
    })
}

/// Streams a company summary as plain text
///
/// Crawling, selection and aggregation finish before the response starts, so
/// their failures still produce a 500 with a JSON error body. Once streaming
/// has begun, a completion failure can only cut the body short.
pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    tracing::info!(
        "Analyze request for {}: {}",
        request.company_name,
        request.url
    );

    match state
        .generator
        .stream(&request.company_name, request.url.as_str())
        .await
    {
        Ok(fragments) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            Body::from_stream(fragments),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Analyze request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to generate summary: {}", e),
                }),
            )
                .into_response()
        }
    }
}
