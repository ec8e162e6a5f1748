use {
    axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Redirect, Response},
        routing::post,
    },
    serde_json::json,
};

use super::AuthRouter;

pub fn router(callback_path: &str) -> AuthRouter {
    AuthRouter::new().route(callback_path, post(self::post::callback))
}

/// Redirects to `url`, or reports it in a JSON body when the client asked
/// for one.
fn respond(json: bool, status: StatusCode, url: &str) -> Response {
    if json {
        (status, Json(json!({ "url": url }))).into_response()
    } else {
        Redirect::to(url).into_response()
    }
}

mod post {
    use std::sync::Arc;

    use {
        axum::{
            extract::{Path, State},
            http::StatusCode,
            response::{IntoResponse, Response},
            Form,
        },
        axum_extra::extract::cookie::CookieJar,
        serde::Deserialize,
        time::OffsetDateTime,
        tracing::{info, warn},
    };

    use crate::{
        app::middleware::session::create_session_cookie, credentials::Credentials,
        session::Token, web::router::with_query, AuthOptions, Error,
    };

    use super::respond;

    #[derive(Deserialize)]
    pub struct CallbackForm {
        email: Option<String>,
        password: Option<String>,
        #[serde(rename = "callbackUrl")]
        callback_url: Option<String>,
        #[serde(default)]
        json: bool,
    }

    impl CallbackForm {
        /// A form carrying neither credential field has no credentials.
        fn take_credentials(&mut self) -> Option<Credentials> {
            if self.email.is_none() && self.password.is_none() {
                return None;
            }
            Some(Credentials {
                email: self.email.take(),
                password: self.password.take(),
            })
        }
    }

    pub async fn callback(
        State(options): State<Arc<AuthOptions>>,
        Path(provider): Path<String>,
        jar: CookieJar,
        Form(mut form): Form<CallbackForm>,
    ) -> Result<Response, Error> {
        if provider != options.provider.id {
            return Err(Error::ProviderNotFound(provider));
        }

        let callback_url = form.callback_url.as_deref().map_or_else(
            || options.base_url.to_string(),
            |url| (options.callbacks.redirect)(url, &options.base_url),
        );

        let failure = |error: &str| {
            with_query(
                &options.routes.signin,
                &[("error", error), ("callbackUrl", &callback_url)],
            )
        };

        match options.backend().authorize(form.take_credentials()).await {
            Ok(Some(user)) => {
                let token = Token::new(
                    String::new(),
                    OffsetDateTime::now_utc(),
                    options.session.max_age_secs,
                );
                let token = (options.callbacks.jwt)(token, Some(&user));
                let cookie = create_session_cookie(&options.session, options.codec().encode(&token)?);

                info!(user_id = %user.id, "Signed in with credentials");
                Ok((
                    jar.add(cookie),
                    respond(form.json, StatusCode::OK, &callback_url),
                )
                    .into_response())
            }
            Ok(None) => {
                info!("Credentials sign-in rejected");
                Ok(respond(
                    form.json,
                    StatusCode::UNAUTHORIZED,
                    &failure("CredentialsSignin"),
                ))
            }
            Err(e @ (Error::MissingCredentials | Error::MissingField(_))) => {
                warn!(err = %e, "Malformed credentials sign-in request");
                Ok(respond(
                    form.json,
                    StatusCode::UNAUTHORIZED,
                    &failure(&e.to_string()),
                ))
            }
            Err(e) => Err(e),
        }
    }
}
