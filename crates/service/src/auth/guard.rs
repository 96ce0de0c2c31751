//! Access guard: identity resolution and the ownership rule.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::credentials::CredentialService;
use crate::errors::ServiceError;

/// Resolves bearer tokens to subject ids.
#[derive(Clone)]
pub struct AccessGuard {
    credentials: Arc<dyn CredentialService>,
}

impl AccessGuard {
    pub fn new(credentials: Arc<dyn CredentialService>) -> Self { Self { credentials } }

    /// Fails `Unauthenticated` when the token is missing, blank or invalid.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Uuid, ServiceError> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ServiceError::Unauthenticated("No token, authorization denied".into())),
        };
        self.credentials.verify(token).inspect_err(|e| {
            warn!(err = %e, "token verification failed");
        })
    }
}

/// The single ownership rule: only the recorded owner may mutate.
pub fn authorize_owner(owner: Uuid, subject: Uuid) -> Result<(), ServiceError> {
    if owner != subject {
        return Err(ServiceError::Forbidden("User not authorized".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::mock::PlainCredentials;

    fn guard() -> AccessGuard { AccessGuard::new(Arc::new(PlainCredentials)) }

    #[test]
    fn missing_or_blank_token_is_unauthenticated() {
        assert!(matches!(guard().authenticate(None), Err(ServiceError::Unauthenticated(_))));
        assert!(matches!(guard().authenticate(Some("  ")), Err(ServiceError::Unauthenticated(_))));
    }

    #[test]
    fn invalid_token_is_unauthenticated() {
        assert!(matches!(guard().authenticate(Some("bogus")), Err(ServiceError::Unauthenticated(_))));
    }

    #[test]
    fn valid_token_yields_subject() {
        let uid = Uuid::new_v4();
        assert_eq!(guard().authenticate(Some(&format!("token-{uid}"))).unwrap(), uid);
    }

    #[test]
    fn owner_check() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert!(authorize_owner(a, a).is_ok());
        assert!(matches!(authorize_owner(a, b), Err(ServiceError::Forbidden(_))));
    }
}
