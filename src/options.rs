use {
    time::{Duration, OffsetDateTime},
    tracing::debug,
    url::Url,
};

use crate::{
    credentials::{backend::Backend, CredentialsProvider},
    session::{Callbacks, JwtCodec},
    util::{Config, Routes, SessionConfig},
    Error,
};

/// Everything the auth handler and the session accessor need, resolved from
/// a [`Config`] once at startup.
#[derive(Debug, Clone)]
pub struct AuthOptions {
    pub session: SessionConfig,
    /// Routes with the root already applied.
    pub routes: Routes,
    pub base_url: Url,
    pub callbacks: Callbacks,
    pub provider: CredentialsProvider,
    codec: JwtCodec,
    backend: Backend,
}

impl AuthOptions {
    /// # Errors
    ///
    /// Returns `MissingSecret` if no signing secret is configured,
    /// `InvalidSessionAge` if tokens issued now would expire at a time that
    /// cannot be represented, or a parse error for an invalid `base_url`.
    pub fn new(config: &Config, backend: Backend) -> Result<Self, Error> {
        let codec = JwtCodec::new(&config.secret)?;
        check_session_age(config.session.max_age_secs)?;
        let base_url = Url::parse(&config.base_url)?;
        let routes = config.routes.with_root();

        debug!(
            strategy = %config.session.strategy,
            root = %routes.root,
            "Auth options resolved"
        );

        Ok(Self {
            session: config.session.clone(),
            routes,
            base_url,
            callbacks: Callbacks::default(),
            provider: CredentialsProvider::default(),
            codec,
            backend,
        })
    }

    #[must_use]
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub const fn codec(&self) -> &JwtCodec {
        &self.codec
    }

    pub const fn backend(&self) -> &Backend {
        &self.backend
    }
}

fn check_session_age(max_age_secs: i64) -> Result<(), Error> {
    if max_age_secs <= 0
        || OffsetDateTime::now_utc()
            .checked_add(Duration::seconds(max_age_secs))
            .is_none()
    {
        return Err(Error::InvalidSessionAge(max_age_secs));
    }
    Ok(())
}
