use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::avatar::AvatarService;
use super::credentials::CredentialService;
use super::domain::{AuthToken, LoginInput, NewUser, RegisterInput, User};
use super::repository::UserRepository;
use crate::errors::ServiceError;

const MIN_PASSWORD_LEN: usize = 6;

/// Account registration, login and lookup, independent of web framework
#[derive(Clone)]
pub struct UserRegistry {
    repo: Arc<dyn UserRepository>,
    credentials: Arc<dyn CredentialService>,
    avatars: Arc<dyn AvatarService>,
}

impl UserRegistry {
    pub fn new(repo: Arc<dyn UserRepository>, credentials: Arc<dyn CredentialService>, avatars: Arc<dyn AvatarService>) -> Self {
        Self { repo, credentials, avatars }
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{UserRegistry, avatar::Gravatar, credentials::mock::PlainCredentials};
    /// use service::auth::{domain::RegisterInput, repository::mock::MockUserRepository};
    /// let registry = UserRegistry::new(Arc::new(MockUserRepository::default()), Arc::new(PlainCredentials), Arc::new(Gravatar::default()));
    /// let input = RegisterInput { name: "Ann".into(), email: "ann@example.com".into(), password: "secret1".into() };
    /// let user = tokio_test::block_on(registry.register(input)).unwrap();
    /// assert_eq!(user.email, "ann@example.com");
    /// assert!(user.avatar.starts_with("https://www.gravatar.com/avatar/"));
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<User, ServiceError> {
        models::user::validate_name(&input.name)?;
        models::user::validate_email(&input.email)?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation("Please enter a password with 6 or more characters".into()));
        }
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(ServiceError::Conflict("User already exists".into()));
        }

        let avatar = self.avatars.avatar_url(&input.email);
        let password_hash = self.credentials.hash(&input.password)?;
        // create() re-checks uniqueness atomically; a racing registration surfaces as Conflict
        let user = self.repo.create(NewUser { name: input.name, email: input.email, password_hash, avatar }).await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate by email/password and issue a bearer token.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthToken, ServiceError> {
        let invalid = || ServiceError::Validation("Invalid credentials".into());
        let user = self.repo.find_by_email(&input.email).await?.ok_or_else(invalid)?;
        if !self.credentials.verify_password(&input.password, &user.password_hash)? {
            return Err(invalid());
        }
        let token = self.credentials.issue(user.id)?;
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthToken { token })
    }

    /// Look up an account by id.
    pub async fn get(&self, id: Uuid) -> Result<User, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("User"))
    }
}
