use {
    serde::{Deserialize, Serialize},
    strum::{Display, EnumString, VariantNames},
    time::{format_description::well_known::Rfc3339, OffsetDateTime},
};

use crate::Error;

pub mod callbacks;
mod jwt;
mod server;

pub use {
    callbacks::Callbacks,
    jwt::JwtCodec,
    server::{get_server_auth_session, ServerAuthSession},
};

/// Where session state lives. Only signed tokens held by the client are
/// supported.
#[derive(
    Default, Display, EnumString, VariantNames, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SessionStrategy {
    #[default]
    Jwt,
}

/// Claims carried by the session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Token {
    pub fn new(sub: impl Into<String>, issued_at: OffsetDateTime, max_age_secs: i64) -> Self {
        let iat = issued_at.unix_timestamp();
        Self {
            sub: sub.into(),
            name: None,
            email: None,
            picture: None,
            iat,
            exp: iat.saturating_add(max_age_secs),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user: Option<SessionUser>,
    /// RFC 3339 timestamp at which the session token stops being accepted.
    pub expires: String,
}

impl Session {
    /// The session the session callback receives: profile fields copied from
    /// the token, with the id still unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the token's expiry is not a representable time.
    pub fn from_token(token: &Token) -> Result<Self, Error> {
        let expires = OffsetDateTime::from_unix_timestamp(token.exp)?.format(&Rfc3339)?;

        Ok(Self {
            user: Some(SessionUser {
                id: String::new(),
                name: token.name.clone(),
                email: token.email.clone(),
                image: token.picture.clone(),
            }),
            expires,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn token_expiry_is_offset_from_issue_time() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let token = Token::new("1", now, 60);

        assert_eq!(token.iat, 1_700_000_000);
        assert_eq!(token.exp, 1_700_000_060);
    }

    #[test]
    fn session_from_token_copies_profile_but_not_id() {
        let now = OffsetDateTime::from_unix_timestamp(0).unwrap();
        let mut token = Token::new("1", now, 86_400);
        token.email = Some("a@x.com".to_string());

        let session = Session::from_token(&token).unwrap();
        let user = session.user.unwrap();
        assert_eq!(user.id, "");
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
        assert_eq!(session.expires, "1970-01-02T00:00:00Z");
    }

    #[test]
    fn unrepresentable_expiry_is_a_range_error() {
        let now = OffsetDateTime::from_unix_timestamp(0).unwrap();
        let token = Token::new("1", now, i64::MAX / 2);

        assert!(matches!(
            Session::from_token(&token),
            Err(Error::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn strategy_parses_from_config_text() {
        assert_eq!(SessionStrategy::from_str("jwt").unwrap(), SessionStrategy::Jwt);
        assert!(SessionStrategy::from_str("database").is_err());
    }
}
