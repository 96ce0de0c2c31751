//! Password hashing and bearer-token issuance/verification.

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

/// The credential operations the core relies on.
pub trait CredentialService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, ServiceError>;
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError>;
    fn issue(&self, subject: Uuid) -> Result<String, ServiceError>;
    /// Resolve a token to the subject it was issued for; fails `Unauthenticated`.
    fn verify(&self, token: &str) -> Result<Uuid, ServiceError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// argon2 password hashes + HS256 JWTs.
#[derive(Clone)]
pub struct JwtCredentials {
    secret: String,
    ttl: chrono::Duration,
}

impl JwtCredentials {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self { secret: secret.into(), ttl: chrono::Duration::hours(ttl_hours) }
    }

    fn invalid_token() -> ServiceError { ServiceError::Unauthenticated("Token is not valid".into()) }
}

impl CredentialService for JwtCredentials {
    fn hash(&self, password: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Unavailable(format!("hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(hash).map_err(|e| ServiceError::Unavailable(format!("stored hash unreadable: {e}")))?;
        Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
    }

    fn issue(&self, subject: Uuid) -> Result<String, ServiceError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| ServiceError::Unavailable(format!("token encoding failed: {e}")))
    }

    fn verify(&self, token: &str) -> Result<Uuid, ServiceError> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            debug!(err = %e, "token rejected");
            Self::invalid_token()
        })?;
        Uuid::parse_str(&data.claims.sub).map_err(|_| Self::invalid_token())
    }
}

/// Cheap stand-in for tests: reversible "hashes" and `token-<uuid>` tokens.
pub mod mock {
    use super::*;

    #[derive(Default, Clone)]
    pub struct PlainCredentials;

    impl CredentialService for PlainCredentials {
        fn hash(&self, password: &str) -> Result<String, ServiceError> {
            Ok(format!("plain${password}"))
        }

        fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
            Ok(hash.strip_prefix("plain$") == Some(password))
        }

        fn issue(&self, subject: Uuid) -> Result<String, ServiceError> {
            Ok(format!("token-{subject}"))
        }

        fn verify(&self, token: &str) -> Result<Uuid, ServiceError> {
            token
                .strip_prefix("token-")
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| ServiceError::Unauthenticated("Token is not valid".into()))
        }
    }
}
