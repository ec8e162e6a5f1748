use std::fmt;

use serde::{Deserialize, Serialize};

pub mod backend;

pub const CREDENTIALS_PROVIDER_ID: &str = "credentials";

/// The fields a client submits to the credentials callback. Either may be
/// missing; `Backend::authorize` decides what that means.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CredentialField {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Declares the credentials sign-in method and the fields it accepts.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CredentialsProvider {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub credentials: Vec<CredentialField>,
}

impl Default for CredentialsProvider {
    fn default() -> Self {
        Self {
            id: CREDENTIALS_PROVIDER_ID,
            name: "Credentials",
            kind: "credentials",
            credentials: vec![
                CredentialField {
                    name: "email",
                    kind: "email",
                },
                CredentialField {
                    name: "password",
                    kind: "password",
                },
            ],
        }
    }
}
