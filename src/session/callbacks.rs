use url::Url;

use crate::model::AuthorizedUser;

use super::{Session, Token};

pub type JwtCallback = fn(Token, Option<&AuthorizedUser>) -> Token;
pub type SessionCallback = fn(Session, &Token) -> Session;
pub type RedirectCallback = fn(&str, &Url) -> String;

/// Hooks applied while issuing a token, building a session and choosing where
/// to send the client afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Callbacks {
    pub jwt: JwtCallback,
    pub session: SessionCallback,
    pub redirect: RedirectCallback,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            jwt,
            session,
            redirect,
        }
    }
}

/// Populates the token from the user on sign-in. `user` is `None` when an
/// existing token is being re-read.
pub fn jwt(mut token: Token, user: Option<&AuthorizedUser>) -> Token {
    if let Some(user) = user {
        token.sub.clone_from(&user.id);
        token.email = Some(user.email.clone());
    }
    token
}

/// Copies the token subject onto the session user.
pub fn session(mut session: Session, token: &Token) -> Session {
    if let Some(user) = session.user.as_mut() {
        user.id.clone_from(&token.sub);
    }
    session
}

/// Allows relative paths and URLs on the same origin as `base_url`; anything
/// else falls back to `base_url`.
pub fn redirect(url: &str, base_url: &Url) -> String {
    if url.starts_with('/') && !url.starts_with("//") {
        return url.to_string();
    }

    match Url::parse(url) {
        Ok(parsed) if parsed.origin() == base_url.origin() => parsed.to_string(),
        _ => base_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::session::SessionUser;

    use super::*;

    fn token(sub: &str) -> Token {
        Token::new(sub, OffsetDateTime::now_utc(), 3600)
    }

    #[test]
    fn session_callback_copies_subject_onto_user() {
        let session = Session {
            user: Some(SessionUser {
                email: Some("a@x.com".to_string()),
                ..SessionUser::default()
            }),
            expires: "2030-01-01T00:00:00Z".to_string(),
        };

        let session = super::session(session, &token("42"));
        let user = session.user.unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.email.as_deref(), Some("a@x.com"));
    }

    #[test]
    fn session_callback_leaves_userless_session_alone() {
        let session = Session {
            user: None,
            expires: "2030-01-01T00:00:00Z".to_string(),
        };

        let result = super::session(session.clone(), &token("42"));
        assert_eq!(result, session);
    }

    #[test]
    fn jwt_callback_takes_identity_from_user_on_sign_in() {
        let user = AuthorizedUser {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
        };

        let signed_in = jwt(token(""), Some(&user));
        assert_eq!(signed_in.sub, "1");
        assert_eq!(signed_in.email.as_deref(), Some("a@x.com"));
        assert!(signed_in.name.is_none());

        let reread = jwt(signed_in.clone(), None);
        assert_eq!(reread, signed_in);
    }

    #[test]
    fn redirect_accepts_relative_and_same_origin() {
        let base = Url::parse("http://localhost:3000").unwrap();

        assert_eq!(redirect("/dashboard?tab=1", &base), "/dashboard?tab=1");
        assert_eq!(
            redirect("http://localhost:3000/notes", &base),
            "http://localhost:3000/notes"
        );
    }

    #[test]
    fn redirect_rejects_foreign_targets() {
        let base = Url::parse("http://localhost:3000").unwrap();

        assert_eq!(redirect("https://evil.example/", &base), "http://localhost:3000/");
        assert_eq!(redirect("//evil.example/", &base), "http://localhost:3000/");
        assert_eq!(redirect("http://localhost:4000/", &base), "http://localhost:3000/");
        assert_eq!(redirect("not a url", &base), "http://localhost:3000/");
    }
}
