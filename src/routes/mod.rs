use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::services::ServiceError;

pub mod contact;

/// Uniform error body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Formatted `yyyy-MM-ddTHH:mm:ss`.
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub reason: String,
    pub path: String,
}

impl ErrorBody {
    pub fn new(status: StatusCode, reason: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            status: status.as_u16(),
            error: status_name(status),
            reason: reason.into(),
            path: path.into(),
        }
    }
}

/// `NOT_FOUND`-style constant name for a status code.
fn status_name(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("UNKNOWN")
        .to_uppercase()
        .replace(' ', "_")
}

/// Translates a domain error into its HTTP response.
pub fn error_response(err: &ServiceError, path: &str) -> HttpResponse {
    let status = match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::AlreadyExists(_) | ServiceError::StaleRecord => StatusCode::CONFLICT,
        ServiceError::InvalidArgument(_) | ServiceError::InvalidRoleTransition(_) => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Repository(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        log::error!("{path}: {err}");
    }

    HttpResponse::build(status).json(ErrorBody::new(status, err.to_string(), path))
}

/// Maps JSON payload failures (including unrecognized enum strings) onto the
/// uniform error body instead of actix's plain-text default.
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    let body = ErrorBody::new(StatusCode::BAD_REQUEST, err.to_string(), req.path());
    let response = HttpResponse::BadRequest().json(body);
    error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_match_the_wire_contract() {
        assert_eq!(status_name(StatusCode::NOT_FOUND), "NOT_FOUND");
        assert_eq!(status_name(StatusCode::BAD_REQUEST), "BAD_REQUEST");
        assert_eq!(
            status_name(StatusCode::INTERNAL_SERVER_ERROR),
            "INTERNAL_SERVER_ERROR"
        );
    }

    #[test]
    fn error_body_carries_status_and_path() {
        let body = ErrorBody::new(StatusCode::CONFLICT, "duplicate", "/api/contacts");
        assert_eq!(body.status, 409);
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.reason, "duplicate");
        assert_eq!(body.path, "/api/contacts");
    }
}
