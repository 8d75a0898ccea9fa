//! Session token utilities.
//!
//! Sessions are bearer JWTs minted by the external auth provider. This
//! service only verifies them: production deployments hold the provider's
//! RS256 public key, and HS256 shared secrets are supported for local
//! development. Issuing is available to tests through the `test-utils`
//! feature.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID). May be empty for sessions without a bound user.
    #[serde(default)]
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

impl SessionClaims {
    /// Account ID from the subject claim, if it is a valid UUID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Verification key and clock-skew tolerance for session tokens.
#[derive(Clone)]
pub struct SessionTokenConfig {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for SessionTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenConfig")
            .field("algorithm", &self.algorithm)
            .field("leeway_secs", &self.leeway_secs)
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl SessionTokenConfig {
    /// Creates an RS256 verifier from the auth provider's PEM public key.
    pub fn from_rsa_public_pem(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            decoding_key,
            algorithm: Algorithm::RS256,
            leeway_secs,
        })
    }

    /// Creates an HS256 verifier from a shared secret.
    pub fn from_secret(secret: &str, leeway_secs: u64) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            leeway_secs,
        }
    }

    /// Verifies a session token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                    _ => JwtError::DecodingError(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use issuer::SessionTokenIssuer;

#[cfg(any(test, feature = "test-utils"))]
mod issuer {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use uuid::Uuid;

    use super::{JwtError, SessionClaims};

    /// Signs session tokens the way the auth provider does.
    #[derive(Clone)]
    pub struct SessionTokenIssuer {
        encoding_key: EncodingKey,
        algorithm: Algorithm,
        /// Token lifetime in seconds; negative values issue expired tokens.
        pub token_expiry_secs: i64,
    }

    impl SessionTokenIssuer {
        /// RS256 issuer from a PEM private key.
        pub fn from_rsa_pem(private_key_pem: &str, token_expiry_secs: i64) -> Result<Self, JwtError> {
            let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
                .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;

            Ok(Self {
                encoding_key,
                algorithm: Algorithm::RS256,
                token_expiry_secs,
            })
        }

        /// HS256 issuer from a shared secret.
        pub fn from_secret(secret: &str, token_expiry_secs: i64) -> Self {
            Self {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                algorithm: Algorithm::HS256,
                token_expiry_secs,
            }
        }

        /// Issues a session token for the given account ID.
        pub fn issue(&self, user_id: Uuid) -> Result<(String, String), JwtError> {
            self.issue_for_subject(&user_id.to_string())
        }

        /// Issues a session token with an arbitrary subject.
        ///
        /// Returns the encoded token and its jti.
        pub fn issue_for_subject(&self, subject: &str) -> Result<(String, String), JwtError> {
            let now = Utc::now();
            let jti = Uuid::new_v4().to_string();

            let claims = SessionClaims {
                sub: subject.to_string(),
                exp: (now + Duration::seconds(self.token_expiry_secs)).timestamp(),
                iat: now.timestamp(),
                jti: jti.clone(),
            };

            let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
                .map_err(|e| JwtError::EncodingError(e.to_string()))?;

            Ok((token, jti))
        }
    }
}
