//! User request types

use serde::Deserialize;

use crate::infrastructure::user::RegisterUserRequest;

/// Login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    pub email: String,
    #[serde(alias = "senha")]
    pub password: String,
}

/// Registration body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, alias = "nome")]
    pub name: String,
    pub email: String,
    #[serde(alias = "senha")]
    pub password: String,
}

impl From<RegisterRequest> for RegisterUserRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}
