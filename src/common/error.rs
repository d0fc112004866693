use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

pub type ServiceResult<T> = Result<T, AppError>;
pub type ServiceResponse<T> = ServiceResult<Json<T>>;

#[track_caller]
pub fn unexpected<T, E: Into<anyhow::Error>>(e: E) -> ServiceResult<T> {
    let caller = std::panic::Location::caller();
    error!("An unexpected error has occurred at {caller}: {}", e.into());
    Err(AppError::Unexpected)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    Unexpected,
    InternalServerError(&'static str),

    MissingCommand,
    UnknownCommand,
    InvalidPayload,
    TeamNotInMatch,

    MatchNotFound,
    PlayerNotFound,
    PlayerGroupNotFound,
    GoalTypeNotFound,

    MatchPaused,
    NoActivePart,
    MatchNotActive,
    MaxSubstitutions,
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    #[track_caller]
    fn from(e: E) -> Self {
        unexpected::<(), E>(e).unwrap_err()
    }
}

impl AppError {
    pub const fn as_str(&self) -> &str {
        self.code()
    }

    pub const fn code(&self) -> &'static str {
        match self {
            AppError::Unexpected | AppError::InternalServerError(_) => "server_error",

            AppError::MissingCommand
            | AppError::UnknownCommand
            | AppError::InvalidPayload
            | AppError::TeamNotInMatch => "bad_request",

            AppError::MatchNotFound
            | AppError::PlayerNotFound
            | AppError::PlayerGroupNotFound
            | AppError::GoalTypeNotFound => "not_found",

            AppError::MatchPaused => "match_paused",
            AppError::NoActivePart => "no_active_part",
            AppError::MatchNotActive => "match_not_active",
            AppError::MaxSubstitutions => "max_substitutions",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            AppError::Unexpected => "An unexpected error has occurred.",
            AppError::InternalServerError(message) => message,

            AppError::MissingCommand => "No command was provided.",
            AppError::UnknownCommand => "Unknown command.",
            AppError::InvalidPayload => "The command payload is invalid.",
            AppError::TeamNotInMatch => "The team does not play in this match.",

            AppError::MatchNotFound => "The match could not be found.",
            AppError::PlayerNotFound => "The player could not be found.",
            AppError::PlayerGroupNotFound => "The player group could not be found.",
            AppError::GoalTypeNotFound => "The goal type could not be found.",

            AppError::MatchPaused => "The match is paused.",
            AppError::NoActivePart => "There is no active part.",
            AppError::MatchNotActive => "The match is not active.",
            AppError::MaxSubstitutions => "The maximum number of substitutions has been reached.",
        }
    }

    pub const fn http_status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCommand
            | AppError::UnknownCommand
            | AppError::InvalidPayload
            | AppError::TeamNotInMatch => StatusCode::BAD_REQUEST,

            AppError::MatchNotFound
            | AppError::PlayerNotFound
            | AppError::PlayerGroupNotFound
            | AppError::GoalTypeNotFound => StatusCode::NOT_FOUND,

            AppError::MatchPaused
            | AppError::NoActivePart
            | AppError::MatchNotActive
            | AppError::MaxSubstitutions => StatusCode::CONFLICT,

            AppError::Unexpected | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub const fn response_parts(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = self.http_status_code();
        let response = ErrorResponse {
            detail: self.message(),
            code: self.code(),
        };
        (status, Json(response))
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: &'static str,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.response_parts().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::UnknownCommand.http_status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MatchNotFound.http_status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MatchPaused.http_status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::MaxSubstitutions.http_status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Unexpected.http_status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_finer_variants_share_wire_codes() {
        assert_eq!(AppError::PlayerNotFound.code(), "not_found");
        assert_eq!(AppError::GoalTypeNotFound.code(), "not_found");
        assert_eq!(AppError::InvalidPayload.code(), "bad_request");
        assert_eq!(AppError::InternalServerError("pause").code(), "server_error");
    }

    #[test]
    fn test_foreign_errors_become_unexpected() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err, AppError::Unexpected);
        assert_eq!(err.code(), "server_error");
    }
}
