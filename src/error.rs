use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::nbu_client::TransportError;
use crate::nbu_rate::ParseError;

pub type Result<T> = std::result::Result<T, RatesError>;

#[derive(Debug, Error)]
pub enum RatesError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to parse NBU response: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("database operation failed: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for RatesError {
    fn status_code(&self) -> StatusCode {
        match self {
            RatesError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            RatesError::Transport(_) | RatesError::Parse(_) => StatusCode::BAD_GATEWAY,
            RatesError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
