//! Authentication and user administration traits.

use async_trait::async_trait;

use super::users_model::{AuthResponse, LoginCredentials, RegisterData, User, UserUpdate};
use crate::errors::Result;

/// Contract for session-establishing operations.
///
/// Implementations persist the returned tokens and user so later requests
/// are authenticated.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthResponse>;

    async fn register(&self, data: RegisterData) -> Result<AuthResponse>;

    /// Ends the session. Local credentials are discarded even if the server call fails.
    async fn logout(&self) -> Result<()>;

    /// Fetches the signed-in user and refreshes the stored copy.
    async fn current_user(&self) -> Result<User>;

    /// Exchanges the stored refresh token for a new access token.
    async fn refresh_token(&self) -> Result<String>;
}

/// Contract for admin user management.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn get_user(&self, user_id: &str) -> Result<User>;

    async fn create_user(&self, data: RegisterData) -> Result<User>;

    async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;
}
