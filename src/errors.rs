use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

use crate::backend::BackendError;

#[derive(Debug)]
pub enum AppError {
    Backend(BackendError),
    Template(askama::Error),
    Session(String),
    Hash(String),
    Csrf,
    PermissionDenied(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Backend(e) => write!(f, "Backend error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::Session(_) => StatusCode::SEE_OTHER,
            AppError::Csrf | AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Template(_) | AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Csrf => HttpResponse::Forbidden().body(self.to_string()),
            AppError::PermissionDenied(what) => {
                log::warn!("Permission denied: {what}");
                HttpResponse::Forbidden()
                    .content_type("text/html; charset=utf-8")
                    .body(include_str!("../templates/errors/403.html"))
            }
            AppError::NotFound => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(include_str!("../templates/errors/404.html")),
            AppError::Session(e) => {
                log::warn!("{e}; redirecting to login");
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }
            AppError::Backend(e) => {
                log::error!("{e}");
                HttpResponse::BadGateway().body("Backend unavailable")
            }
            AppError::Template(_) | AppError::Hash(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        AppError::Backend(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Fallback for paths outside the route table.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

/// Render a template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    render_with_status(tmpl, StatusCode::OK)
}

/// Render a template with an explicit status, e.g. 502 for a page whose
/// query failed.
pub fn render_with_status(tmpl: impl Template, status: StatusCode) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}
