use axum::routing::get;

use super::AuthRouter;

pub fn router(signout_path: &str) -> AuthRouter {
    AuthRouter::new().route(
        signout_path,
        get(self::signout::signout).post(self::signout::signout),
    )
}

mod signout {
    use std::sync::Arc;

    use {
        axum::{
            extract::{Query, State},
            response::{IntoResponse, Redirect},
        },
        axum_extra::extract::cookie::CookieJar,
        serde::Deserialize,
        tracing::debug,
    };

    use crate::{app::middleware::session::removal_cookie, AuthOptions};

    #[derive(Debug, Deserialize)]
    pub struct SignOutQuery {
        #[serde(rename = "callbackUrl")]
        callback_url: Option<String>,
    }

    pub async fn signout(
        State(options): State<Arc<AuthOptions>>,
        jar: CookieJar,
        Query(SignOutQuery { callback_url }): Query<SignOutQuery>,
    ) -> impl IntoResponse {
        let target = callback_url.map_or_else(
            || "/".to_string(),
            |url| (options.callbacks.redirect)(&url, &options.base_url),
        );

        debug!("Signing out");
        (
            jar.remove(removal_cookie(&options.session)),
            Redirect::to(&target),
        )
    }
}
