use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use categoryinfo_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                CoreError::Database(DatabaseError::Timeout(_)) => {
                    (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
            ApiError::Internal(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason.clone()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_map_to_server_errors() {
        let query = ApiError::from(CoreError::Database(DatabaseError::QueryFailed(
            "no such table: terms".into(),
        )));
        assert_eq!(
            query.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let timeout = ApiError::from(CoreError::Database(DatabaseError::Timeout(
            "pool exhausted".into(),
        )));
        assert_eq!(
            timeout.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
