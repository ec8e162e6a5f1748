use std::sync::Arc;

use {
    axum::async_trait,
    axum_login::{AuthnBackend, UserId},
    tracing::debug,
};

use crate::{
    adapter::SqlxAdapter,
    model::AuthorizedUser,
    password::{hash_password, verify_password},
    Error,
};

use super::Credentials;

const DECOY_PASSWORD: &str = "grafton-credentials-decoy";

#[derive(Debug, Clone)]
pub struct Backend {
    adapter: SqlxAdapter,
    // Verified against when no usable hash exists, so every failed sign-in
    // costs one hash comparison.
    decoy_hash: Arc<str>,
}

impl Backend {
    /// # Errors
    ///
    /// Returns an error if the decoy hash cannot be generated.
    pub async fn new(adapter: SqlxAdapter) -> Result<Self, Error> {
        let decoy_hash = hash_password(DECOY_PASSWORD).await?;
        Ok(Self {
            adapter,
            decoy_hash: decoy_hash.into(),
        })
    }

    pub const fn adapter(&self) -> &SqlxAdapter {
        &self.adapter
    }

    /// Checks submitted credentials against the stored password hash.
    ///
    /// A malformed request is an `Err`. A failed sign-in is `Ok(None)` whether
    /// the email is unknown, the account has no password, or the password is
    /// wrong, so callers cannot tell those cases apart.
    ///
    /// # Errors
    ///
    /// `MissingCredentials` when `credentials` is `None`, `MissingField` when
    /// the email or password is absent or empty, and storage errors from the
    /// lookup.
    pub async fn authorize(
        &self,
        credentials: Option<Credentials>,
    ) -> Result<Option<AuthorizedUser>, Error> {
        let credentials = credentials.ok_or(Error::MissingCredentials)?;
        let email = credentials
            .email
            .filter(|email| !email.is_empty())
            .ok_or(Error::MissingField("email"))?;
        let password = credentials
            .password
            .filter(|password| !password.is_empty())
            .ok_or(Error::MissingField("password"))?;

        let record = self.adapter.find_credential_record(&email).await?;

        let Some((record, stored_hash)) = record.and_then(|record| {
            let hash = record.password.clone().filter(|hash| !hash.is_empty())?;
            Some((record, hash))
        }) else {
            verify_password(&password, &self.decoy_hash).await?;
            debug!("No account with a password for submitted email");
            return Ok(None);
        };

        if !verify_password(&password, &stored_hash).await? {
            debug!(user_id = %record.id, "Password did not match");
            return Ok(None);
        }

        debug!(user_id = %record.id, "Credentials verified");
        Ok(Some(record.into()))
    }
}

#[async_trait]
impl AuthnBackend for Backend {
    type User = AuthorizedUser;
    type Credentials = Credentials;
    type Error = Error;

    async fn authenticate(
        &self,
        creds: Self::Credentials,
    ) -> Result<Option<Self::User>, Self::Error> {
        self.authorize(Some(creds)).await
    }

    async fn get_user(&self, user_id: &UserId<Self>) -> Result<Option<Self::User>, Self::Error> {
        let user = self.adapter.get_user(user_id).await?;

        Ok(user.and_then(|user| {
            user.email.map(|email| AuthorizedUser { id: user.id, email })
        }))
    }
}
