use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;
use warren_redirector::ResolveOutcome;

pub const EXPIRED_BODY: &str = "This URL has expired.";

pub async fn create_url_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<CreateUrlResponse>> {
    let Json(request) = body.map_err(|e| AppError::MalformedBody(e.body_text()))?;

    let original_url = request.original_url()?;
    let lifetime = request.lifetime()?;

    let code = state.shortener().shorten(original_url, lifetime).await?;

    Ok(Json(CreateUrlResponse {
        short_url: code.to_url(state.base_url()),
        code: code.to_string(),
    }))
}

pub async fn resolve_url_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let outcome = state.redirector().resolve(uri.path()).await?;

    let response = match outcome {
        ResolveOutcome::Redirect { url } => {
            let location = HeaderValue::try_from(url).map_err(|_| AppError::UnusableTarget)?;
            (StatusCode::FOUND, [(LOCATION, location)]).into_response()
        }
        ResolveOutcome::Expired => (StatusCode::GONE, EXPIRED_BODY).into_response(),
        ResolveOutcome::NotFound => {
            debug!(path = uri.path(), "no record for short code");
            StatusCode::NOT_FOUND.into_response()
        }
        ResolveOutcome::InvalidCode => {
            debug!(path = uri.path(), "path does not hold a short code");
            StatusCode::NOT_FOUND.into_response()
        }
    };

    Ok(response)
}
