use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use investment_goals_core::errors::{DatabaseError, Error as CoreError};
use thiserror::Error;

use crate::models::{ErrorBody, FieldErrorBody};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

const NOT_FOUND_MESSAGE: &str = "Investment goal not found";
const INTERNAL_MESSAGE: &str = "Internal server error";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            ApiError::Core(CoreError::Validation(v)) => {
                let details: Vec<FieldErrorBody> =
                    v.field_errors().into_iter().map(Into::into).collect();
                (StatusCode::BAD_REQUEST, self.to_string(), Some(details))
            }
            ApiError::Core(CoreError::Division(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
            ApiError::Core(CoreError::Database(DatabaseError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string(), None)
            }
            ApiError::Core(e) => {
                tracing::error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone(), None),
            ApiError::Internal(reason) => {
                tracing::error!("Request failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error: message,
            details: details.filter(|d| !d.is_empty()),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use investment_goals_core::errors::{FieldError, ValidationError};

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(CoreError::from(DatabaseError::NotFound("goal 9".into())));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn field_errors_map_to_400() {
        let err = ApiError::from(CoreError::from(ValidationError::Fields(vec![
            FieldError::new("name", "name is required"),
        ])));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_are_hidden_behind_500() {
        let err = ApiError::from(CoreError::from(DatabaseError::QueryFailed(
            "disk I/O error".into(),
        )));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
