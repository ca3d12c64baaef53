use async_trait::async_trait;
use log::{debug, info, warn};

use tradeledger_core::errors::{Error, Result};
use tradeledger_core::users::{
    AuthResponse, AuthServiceTrait, LoginCredentials, RefreshTokenRequest, RefreshTokenResponse,
    RegisterData, User,
};

use crate::cache::QueryKey;
use crate::client::ApiClient;
use crate::session::Session;

impl ApiClient {
    /// Replaces the stored session with a fresh sign-in and drops every cached query.
    fn start_session(&self, response: &AuthResponse) -> Result<()> {
        self.save_session(&Session {
            user: Some(response.user.clone()),
            token: Some(response.token.clone()),
            refresh_token: response.refresh_token.clone(),
        })?;
        self.cache().clear();
        info!("[Auth] Signed in as {}", response.user.email);
        Ok(())
    }
}

#[async_trait]
impl AuthServiceTrait for ApiClient {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        debug!("[Auth] Attempting login for {}", credentials.email);
        let response: AuthResponse = self.post("/auth/login", &credentials).await?;
        self.start_session(&response)?;
        Ok(response)
    }

    async fn register(&self, data: RegisterData) -> Result<AuthResponse> {
        data.validate()?;
        let response: AuthResponse = self.post("/auth/register", &data).await?;
        self.start_session(&response)?;
        Ok(response)
    }

    async fn logout(&self) -> Result<()> {
        let result = self
            .post_empty::<serde_json::Value>("/auth/logout")
            .await
            .map(|_| ());
        if let Err(e) = &result {
            warn!("[Auth] Logout request failed, discarding local session anyway: {}", e);
        }
        self.clear_session()?;
        self.cache().clear();
        info!("[Auth] Signed out");
        result
    }

    async fn current_user(&self) -> Result<User> {
        let fetched = self
            .cache()
            .get_or_fetch(QueryKey::current_user(), || self.get::<User>("/auth/me"))
            .await;

        match fetched {
            Ok(user) => {
                let mut session = self.session()?;
                if session.user.as_ref() != Some(&user) {
                    session.user = Some(user.clone());
                    self.save_session(&session)?;
                }
                Ok(user)
            }
            Err(e) => {
                if let Err(clear_err) = self.clear_session() {
                    warn!("[Auth] Failed to clear session: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    async fn refresh_token(&self) -> Result<String> {
        let mut session = self.session()?;
        let refresh_token = session
            .refresh_token
            .clone()
            .ok_or_else(|| Error::Session("No refresh token stored; log in again".into()))?;

        let response: RefreshTokenResponse = self
            .post("/auth/refresh", &RefreshTokenRequest { refresh_token })
            .await?;

        session.token = Some(response.token.clone());
        self.save_session(&session)?;
        debug!("[Auth] Access token refreshed");
        Ok(response.token)
    }
}
