use {axum_extra::extract::cookie::{Cookie, SameSite}, time::Duration, tracing::debug};

use crate::util::{SameSiteConfig, SessionConfig};

impl From<SameSiteConfig> for SameSite {
    fn from(policy: SameSiteConfig) -> Self {
        match policy {
            SameSiteConfig::Strict => Self::Strict,
            SameSiteConfig::Lax => Self::Lax,
            SameSiteConfig::None => Self::None,
        }
    }
}

/// The cookie that carries a freshly signed session token.
pub fn create_session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    debug!(name = %config.cookie_name, "Creating session cookie");

    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site_policy.into())
        .max_age(Duration::seconds(config.max_age_secs))
        .build()
}

/// A cookie matching the session cookie's name and path, for removal.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_follows_config() {
        let config = SessionConfig {
            secure: true,
            same_site_policy: SameSiteConfig::Strict,
            max_age_secs: 60,
            ..SessionConfig::default()
        };

        let cookie = create_session_cookie(&config, "token".to_string());
        assert_eq!(cookie.name(), "grafton.session-token");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
    }

    #[test]
    fn removal_cookie_targets_same_path() {
        let cookie = removal_cookie(&SessionConfig::default());
        assert_eq!(cookie.name(), "grafton.session-token");
        assert_eq!(cookie.path(), Some("/"));
    }
}
