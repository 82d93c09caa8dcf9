//! HTTP error response mapping.

use askama::Template;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;

use clinikit_domain::error::ClinikitError;

fn status_of(err: &ClinikitError) -> StatusCode {
    match err {
        ClinikitError::Validation(_) => StatusCode::BAD_REQUEST,
        ClinikitError::NotFound(_) => StatusCode::NOT_FOUND,
        ClinikitError::Forbidden(_) => StatusCode::FORBIDDEN,
        ClinikitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message safe to show to a client. Storage details are logged, never sent.
fn public_message(err: &ClinikitError) -> String {
    match err {
        ClinikitError::Validation(err) => err.to_string(),
        ClinikitError::NotFound(err) => err.to_string(),
        ClinikitError::Forbidden(err) => err.to_string(),
        ClinikitError::Storage(err) => {
            tracing::error!(error = %err, "storage error");
            "internal server error".to_string()
        }
    }
}

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`ClinikitError`] to a JSON response with appropriate status code.
pub struct ApiError(ClinikitError);

impl From<ClinikitError> for ApiError {
    fn from(err: ClinikitError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let error = public_message(&self.0);
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    heading: String,
    message: String,
}

/// Maps [`ClinikitError`] to an HTML error page.
pub struct PageError(ClinikitError);

impl From<ClinikitError> for PageError {
    fn from(err: ClinikitError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        let page = ErrorTemplate {
            heading: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: public_message(&self.0),
        };
        (status, Html(page.to_string())).into_response()
    }
}
