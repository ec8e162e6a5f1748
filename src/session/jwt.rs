use std::{fmt, sync::Arc};

use {
    jsonwebtoken::{
        decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
    },
    tracing::{debug, warn},
};

use crate::Error;

use super::Token;

/// Signs and verifies session tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl JwtCodec {
    /// # Errors
    ///
    /// Returns `MissingSecret` if `secret` is empty.
    pub fn new(secret: &str) -> Result<Self, Error> {
        if secret.is_empty() {
            return Err(Error::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            validation: Arc::new(validation),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the claims cannot be serialized or signed.
    pub fn encode(&self, token: &Token) -> Result<String, Error> {
        Ok(encode(
            &Header::new(Algorithm::HS256),
            token,
            &self.encoding_key,
        )?)
    }

    /// Returns `Ok(None)` for any token that should not yield a session:
    /// expired, wrongly signed, or malformed.
    ///
    /// # Errors
    ///
    /// Only failures unrelated to the token's validity are returned.
    pub fn decode(&self, raw: &str) -> Result<Option<Token>, Error> {
        match decode::<Token>(raw, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(Some(data.claims)),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => {
                    debug!("Session token expired");
                    Ok(None)
                }
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidToken
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::MissingRequiredClaim(_)
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::ImmatureSignature => {
                    warn!(err = %e, "Rejected session token");
                    Ok(None)
                }
                _ => Err(Error::Jwt(e)),
            },
        }
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}
