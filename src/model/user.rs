use {
    axum_login::AuthUser,
    serde::{Deserialize, Serialize},
    sqlx::FromRow,
};

use super::Identifiable;

/// A row of the `users` table.
#[derive(Debug, Default, Clone, Serialize, Deserialize, Eq, PartialEq, Hash, FromRow)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    /// PHC-formatted password hash. `None` for accounts that cannot sign in
    /// with credentials.
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// Projection selected when checking credentials.
#[derive(Debug, Clone, Eq, PartialEq, FromRow)]
pub struct CredentialRecord {
    pub id: String,
    pub email: String,
    pub password: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub password_hash: Option<String>,
}

/// The identity handed to the session layer after a successful sign-in.
/// Only these two fields ever reach the token.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Hash)]
pub struct AuthorizedUser {
    pub id: String,
    pub email: String,
}

impl From<CredentialRecord> for AuthorizedUser {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
        }
    }
}

impl AuthUser for AuthorizedUser {
    type Id = String;

    fn session_auth_hash(&self) -> &[u8] {
        self.id.as_bytes()
    }

    fn id(&self) -> Self::Id {
        Identifiable::id(self)
    }
}

impl Identifiable<String> for AuthorizedUser {
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl Identifiable<String> for User {
    fn id(&self) -> String {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn authorized_user_serializes_only_id_and_email() {
        let user = AuthorizedUser {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": "1", "email": "a@x.com" })
        );
    }

    #[test]
    fn user_never_serializes_password_hash() {
        let user = User {
            id: "1".to_string(),
            email: Some("a@x.com".to_string()),
            password: Some("$argon2id$v=19$...".to_string()),
            ..User::default()
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
    }

    #[test]
    fn credential_record_converts_to_minimal_identity() {
        let record = CredentialRecord {
            id: "7".to_string(),
            email: "b@x.com".to_string(),
            password: Some("hash".to_string()),
        };

        let user = AuthorizedUser::from(record);
        assert_eq!(AuthUser::id(&user), "7");
        assert_eq!(user.email, "b@x.com");
    }
}
