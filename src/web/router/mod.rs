use url::form_urlencoded;

use crate::{util::Routes, CREDENTIALS_PROVIDER_ID};

use super::AuthRouter;

mod callback;
mod error;
mod providers;
mod session;
mod signin;
mod signout;

pub fn create_auth_router(routes: &Routes) -> AuthRouter {
    AuthRouter::new()
        .merge(providers::router(&routes.providers))
        .merge(signin::router(&routes.signin))
        .merge(callback::router(&routes.provider_callback(":provider")))
        .merge(session::router(&routes.session))
        .merge(signout::router(&routes.signout))
        .merge(error::router(&routes.error))
}

/// Appends url-encoded query pairs to `path`.
pub(crate) fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{path}?{query}")
}

fn credentials_callback_path(routes: &Routes) -> String {
    routes.provider_callback(CREDENTIALS_PROVIDER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_query_encodes_values() {
        assert_eq!(
            with_query(
                "/api/auth/signin",
                &[("error", "\"email\" is required"), ("callbackUrl", "/a?b=c")]
            ),
            "/api/auth/signin?error=%22email%22+is+required&callbackUrl=%2Fa%3Fb%3Dc"
        );
    }
}
