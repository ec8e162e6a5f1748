use {askama::Template, axum::{http::StatusCode, routing::get}};

use super::AuthRouter;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
    pub signin_url: String,
}

pub fn router(error_path: &str) -> AuthRouter {
    AuthRouter::new().route(error_path, get(self::get::error))
}

fn describe(code: Option<&str>) -> (StatusCode, &'static str) {
    match code {
        Some("Configuration") => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "There is a problem with the server configuration.",
        ),
        Some("AccessDenied") => (
            StatusCode::FORBIDDEN,
            "You do not have permission to sign in.",
        ),
        _ => (StatusCode::OK, "Unable to sign in."),
    }
}

mod get {
    use std::sync::Arc;

    use {
        askama_axum::IntoResponse,
        axum::{
            extract::{Query, State},
            response::Response,
        },
        serde::Deserialize,
    };

    use crate::AuthOptions;

    use super::{describe, ErrorTemplate};

    #[derive(Debug, Deserialize)]
    pub struct ErrorQuery {
        error: Option<String>,
    }

    pub async fn error(
        State(options): State<Arc<AuthOptions>>,
        Query(ErrorQuery { error }): Query<ErrorQuery>,
    ) -> Response {
        let (status, message) = describe(error.as_deref());

        (
            status,
            ErrorTemplate {
                message: message.to_string(),
                signin_url: options.routes.signin.clone(),
            },
        )
            .into_response()
    }
}
