use async_trait::async_trait;

use tradeledger_core::errors::Result;
use tradeledger_core::users::{RegisterData, User, UserServiceTrait, UserUpdate};

use crate::cache::QueryKey;
use crate::client::ApiClient;

#[async_trait]
impl UserServiceTrait for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.cache()
            .get_or_fetch(QueryKey::users(), || self.get("/users"))
            .await
    }

    async fn get_user(&self, user_id: &str) -> Result<User> {
        let path = format!("/users/{}", user_id);
        self.cache()
            .get_or_fetch(QueryKey::user(user_id), || self.get(&path))
            .await
    }

    async fn create_user(&self, data: RegisterData) -> Result<User> {
        data.validate()?;
        let user: User = self.post("/users", &data).await?;
        self.cache()
            .invalidate_all([&QueryKey::users(), &QueryKey::user(&user.id)]);
        Ok(user)
    }

    async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        update.validate()?;
        let user: User = self
            .put(&format!("/users/{}", user_id), &update.normalized())
            .await?;
        self.cache()
            .invalidate_all([&QueryKey::users(), &QueryKey::user(user_id)]);
        Ok(user)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.delete(&format!("/users/{}", user_id)).await?;
        self.cache()
            .invalidate_all([&QueryKey::users(), &QueryKey::user(user_id)]);
        Ok(())
    }
}
