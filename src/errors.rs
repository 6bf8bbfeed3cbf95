use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display("Invalid ID")]
    InvalidId,

    #[display("Task not found")]
    TaskNotFound,

    #[display("User not found")]
    UserNotFound,

    #[display("Email and password are required")]
    MissingCredentials,

    #[display("Unauthorized")]
    Unauthorized,

    #[display("internal error")]
    Internal,
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }

    // Lookup misses answer 400 rather than 404; existing clients depend
    // on that status.
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::InvalidId
            | ApiError::TaskNotFound
            | ApiError::UserNotFound
            | ApiError::MissingCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        log::error!("store error: {err}");
        ApiError::Internal
    }
}
