//! Users module - accounts, authentication payloads, and permissions.

mod permissions;
mod users_model;
mod users_traits;


pub use permissions::Permissions;
pub use users_model::{
    AuthResponse, LoginCredentials, RefreshTokenRequest, RefreshTokenResponse, RegisterData, User,
    UserRole, UserUpdate,
};
pub use users_traits::{AuthServiceTrait, UserServiceTrait};
