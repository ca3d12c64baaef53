use tradeledger_core::users::{AuthServiceTrait, LoginCredentials, RegisterData};

use crate::main_lib::Context;
use crate::output::{emit, user_detail};

pub async fn login(ctx: &Context, email: String, password: String) -> anyhow::Result<()> {
    let response = ctx
        .client
        .login(LoginCredentials { email, password })
        .await?;
    emit(ctx, &response.user, |u| format!("Signed in as {}", user_detail(u)))
}

pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let response = ctx
        .client
        .register(RegisterData {
            name,
            email,
            password,
            role: None,
        })
        .await?;
    emit(ctx, &response.user, |u| format!("Registered {}", user_detail(u)))
}

pub async fn logout(ctx: &Context) -> anyhow::Result<()> {
    if let Err(e) = ctx.client.logout().await {
        tracing::warn!("Server logout failed: {}", e);
    }
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    if !ctx.client.session()?.is_authenticated() {
        anyhow::bail!("Not signed in. Run `tradeledger login` first.");
    }
    let user = ctx.client.current_user().await?;
    emit(ctx, &user, user_detail)
}

pub async fn refresh(ctx: &Context) -> anyhow::Result<()> {
    ctx.client.refresh_token().await?;
    println!("Access token refreshed.");
    Ok(())
}
