//! User service for registration and authentication

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

pub const USER_NOT_FOUND: &str = "User not found for the given email";
pub const INVALID_PASSWORD: &str = "Invalid password";
pub const EMAIL_ALREADY_REGISTERED: &str = "A user with this email is already registered";

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Authenticate a user with email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::authentication(USER_NOT_FOUND))?;

        if !self.hasher.verify(password, user.password_hash()) {
            debug!(user_id = %user.id(), "Password verification failed");
            return Err(DomainError::authentication(INVALID_PASSWORD));
        }

        Ok(user)
    }

    /// Register a new user after checking the email is free
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        self.validate_email_uniqueness(&request.email).await?;

        let password_hash = self.hasher.hash(&request.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: request.name,
                email: request.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id(), "Registered user");

        Ok(user)
    }

    /// Fail if a user with this email already exists
    pub async fn validate_email_uniqueness(&self, email: &str) -> Result<(), DomainError> {
        if self.repository.email_exists(email).await? {
            return Err(DomainError::validation(EMAIL_ALREADY_REGISTERED));
        }

        Ok(())
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }
}
