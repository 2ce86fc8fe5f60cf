use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cepbolt_core::LookupError;
use serde::Serialize;
use thiserror::Error;

/// Client-facing failure of an HTTP endpoint.
///
/// Messages are fixed strings; provider details stay in the logs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("invalid zipcode")]
    InvalidZipcode,
    #[error("can not find zipcode")]
    ZipcodeNotFound,
    #[error("failed to fetch temperature")]
    TemperatureUnavailable,
    #[error("failed to fetch address")]
    AddressUnavailable,
    #[error("address lookup timed out")]
    AddressTimeout,
}

impl ApiError {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ZipcodeNotFound => StatusCode::NOT_FOUND,
            Self::TemperatureUnavailable | Self::AddressUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::AddressTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<&LookupError> for ApiError {
    fn from(error: &LookupError) -> Self {
        match error {
            LookupError::Validation(_) => Self::InvalidZipcode,
            LookupError::NotFound(_) => Self::ZipcodeNotFound,
            LookupError::Upstream(_) => Self::TemperatureUnavailable,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepbolt_core::{SourceError, ValidationError};

    #[test]
    fn lookup_errors_map_to_fixed_statuses() {
        let invalid = LookupError::Validation(ValidationError::InvalidCep {
            value: String::from("123"),
            expected: 8,
        });
        let missing = LookupError::NotFound(SourceError::not_found("nope"));
        let down = LookupError::Upstream(SourceError::transport("reset", true));

        assert_eq!(ApiError::from(&invalid).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::from(&missing).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(&down).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
