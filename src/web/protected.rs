use std::sync::Arc;

use {
    axum::{
        extract::{OriginalUri, Request, State},
        http::StatusCode,
        middleware::{from_fn_with_state, Next},
        response::{IntoResponse, Redirect, Response},
    },
    tracing::{debug, error},
};

use crate::{session::get_server_auth_session, web::router::with_query, AuthOptions};

use super::AuthRouter;

/// Wraps `router` so that its routes require a session. The session is
/// inserted into request extensions for the handlers.
pub fn protect(router: AuthRouter, options: Arc<AuthOptions>) -> AuthRouter {
    router.route_layer(from_fn_with_state(options, require_session))
}

async fn require_session(
    State(options): State<Arc<AuthOptions>>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request,
    next: Next,
) -> Response {
    match get_server_auth_session(&options, req.headers()) {
        Ok(Some(session)) => {
            debug!("Session present, continuing");
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Ok(None) => {
            let signin_url = with_query(
                &options.routes.signin,
                &[("callbackUrl", &original_uri.to_string())],
            );
            debug!(%signin_url, "No session, redirecting to sign in");
            Redirect::temporary(&signin_url).into_response()
        }
        Err(err) => {
            error!(err = %err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
