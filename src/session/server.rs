use std::sync::Arc;

use {
    axum::{
        async_trait,
        extract::{FromRef, FromRequestParts},
        http::{request::Parts, HeaderMap},
    },
    axum_extra::extract::cookie::CookieJar,
};

use crate::{AuthOptions, Error};

use super::Session;

/// Reads the session for the current request from its session cookie.
///
/// Returns `Ok(None)` when there is no cookie or the token it carries is not
/// accepted.
///
/// # Errors
///
/// Returns an error only if a valid token cannot be turned into a session.
pub fn get_server_auth_session(
    options: &AuthOptions,
    headers: &HeaderMap,
) -> Result<Option<Session>, Error> {
    let jar = CookieJar::from_headers(headers);
    let Some(cookie) = jar.get(&options.session.cookie_name) else {
        return Ok(None);
    };

    let Some(token) = options.codec().decode(cookie.value())? else {
        return Ok(None);
    };

    let token = (options.callbacks.jwt)(token, None);
    let session = Session::from_token(&token)?;
    Ok(Some((options.callbacks.session)(session, &token)))
}

/// Extractor form of [`get_server_auth_session`].
#[derive(Debug, Clone)]
pub struct ServerAuthSession(pub Option<Session>);

#[async_trait]
impl<S> FromRequestParts<S> for ServerAuthSession
where
    Arc<AuthOptions>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let options = Arc::<AuthOptions>::from_ref(state);
        get_server_auth_session(&options, &parts.headers).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::COOKIE;
    use time::OffsetDateTime;

    use crate::{options::tests::test_options, session::Token};

    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn no_cookie_means_no_session() {
        let options = test_options().await;

        assert!(get_server_auth_session(&options, &HeaderMap::new())
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn valid_cookie_yields_session_with_user_id() {
        let options = test_options().await;
        let mut token = Token::new("1", OffsetDateTime::now_utc(), 3600);
        token.email = Some("a@x.com".to_string());
        let raw = options.codec().encode(&token).unwrap();

        let headers = headers_with_cookie(&format!(
            "other=1; {}={raw}",
            options.session.cookie_name
        ));
        let session = get_server_auth_session(&options, &headers)
            .unwrap()
            .unwrap();

        let user = session.user.unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[tokio::test]
    async fn tampered_cookie_means_no_session() {
        let options = test_options().await;
        let token = Token::new("1", OffsetDateTime::now_utc(), 3600);
        let mut raw = options.codec().encode(&token).unwrap();
        raw.push('x');

        let headers = headers_with_cookie(&format!("{}={raw}", options.session.cookie_name));
        assert!(get_server_auth_session(&options, &headers)
            .unwrap()
            .is_none());
    }
}
