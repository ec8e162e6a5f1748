use std::io;

use {
    axum::{
        body::Body,
        http::{Response as HttpResponse, StatusCode},
        response::{IntoResponse, Response},
    },
    sqlx::migrate::MigrateError,
    thiserror::Error,
    tokio::task::JoinError,
    tracing::error,
    url::ParseError,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("\"{0}\" is required in credentials")]
    MissingField(&'static str),

    #[error("No secret configured for signing session tokens")]
    MissingSecret,

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("SQLx migrate error: {0}")]
    SqlxMigrate(#[from] MigrateError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Session token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] JoinError),

    #[error("Cannot parse URL")]
    ParseError(#[from] ParseError),

    #[error("Failed to serialize session data: {0}")]
    SerializationError(String),

    #[error("Failed to format session expiry: {0}")]
    TimeFormat(#[from] time::error::Format),

    #[error("Session expiry out of range: {0}")]
    TimestampOutOfRange(#[from] time::error::ComponentRange),

    #[error("Session max age must be positive and keep expiry in range, got {0}s")]
    InvalidSessionAge(i64),
}

impl From<argon2::password_hash::Error> for Error {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ProviderNotFound(msg) => (
                StatusCode::NOT_FOUND,
                format!("Auth provider not found: {msg}"),
            ),
            Self::SerializationError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialize session data: {msg}"),
            ),
            _ => {
                error!(err = %self, "Unhandled error in auth handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let full_message = format!("{status}: {error_message}");

        HttpResponse::builder()
            .status(status)
            .body(Body::from(full_message))
            .map_or_else(|_| status.into_response(), IntoResponse::into_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            Error::MissingField("email").to_string(),
            "\"email\" is required in credentials"
        );
        assert_eq!(
            Error::MissingField("password").to_string(),
            "\"password\" is required in credentials"
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            Error::ProviderNotFound("github".into())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::MissingSecret.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
