use {askama::Template, axum::routing::get};

use super::AuthRouter;

#[derive(Template)]
#[template(path = "signin.html")]
pub struct SignInTemplate {
    pub provider_name: String,
    pub action: String,
    pub callback_url: String,
    pub message: Option<String>,
}

pub fn router(signin_path: &str) -> AuthRouter {
    AuthRouter::new().route(signin_path, get(self::get::signin))
}

fn signin_message(code: &str) -> String {
    match code {
        "CredentialsSignin" => {
            "Sign in failed. Check the details you provided are correct.".to_string()
        }
        "SessionRequired" => "Please sign in to access this page.".to_string(),
        other => other.to_string(),
    }
}

mod get {
    use std::sync::Arc;

    use {
        axum::extract::{Query, State},
        serde::Deserialize,
    };

    use crate::AuthOptions;

    use super::{super::credentials_callback_path, signin_message, SignInTemplate};

    #[derive(Debug, Deserialize)]
    pub struct SignInQuery {
        error: Option<String>,
        #[serde(rename = "callbackUrl")]
        callback_url: Option<String>,
    }

    pub async fn signin(
        State(options): State<Arc<AuthOptions>>,
        Query(SignInQuery {
            error,
            callback_url,
        }): Query<SignInQuery>,
    ) -> SignInTemplate {
        let callback_url = callback_url.map_or_else(
            || options.base_url.to_string(),
            |url| (options.callbacks.redirect)(&url, &options.base_url),
        );

        SignInTemplate {
            provider_name: options.provider.name.to_string(),
            action: credentials_callback_path(&options.routes),
            callback_url,
            message: error.as_deref().map(signin_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_get_friendly_messages() {
        assert_eq!(
            signin_message("CredentialsSignin"),
            "Sign in failed. Check the details you provided are correct."
        );
        assert_eq!(
            signin_message("\"email\" is required in credentials"),
            "\"email\" is required in credentials"
        );
    }

    #[test]
    fn template_escapes_message() {
        let page = SignInTemplate {
            provider_name: "Credentials".to_string(),
            action: "/api/auth/callback/credentials".to_string(),
            callback_url: "/".to_string(),
            message: Some("<script>".to_string()),
        }
        .render()
        .unwrap();

        assert!(page.contains("action=\"/api/auth/callback/credentials\""));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
