use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Signing secret must not be empty")]
    EmptySecret,
    #[error("Token ttl out of range")]
    InvalidTtl,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JWT token")]
    InvalidToken,
    #[error("JWT token expired")]
    TokenExpired,
    #[error("JWT token already used")]
    TokenAlreadyUsed,
    #[error("Invalid API Key")]
    InvalidApiKey,
    #[error("Missing JWT token")]
    MissingToken,
    #[error("Validation error: {0}")]
    Validation(&'static str),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid JWT token"),
            Error::TokenExpired => (StatusCode::UNAUTHORIZED, "JWT token expired"),
            Error::TokenAlreadyUsed => (StatusCode::UNAUTHORIZED, "JWT token already used"),
            Error::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API Key"),
            Error::MissingToken => (StatusCode::UNAUTHORIZED, "Missing JWT token"),
            Error::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            Error::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "JWT error"),
        };

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, message).into_response()
    }
}
