//! Command handlers. Each returns once its output has been printed.

mod auth;
mod calc;
mod portfolios;
mod positions;
mod trades;
mod users;

use tradeledger_core::users::Permissions;

use crate::cli::Command;
use crate::main_lib::Context;

pub async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => auth::login(ctx, email, password).await,
        Command::Register {
            name,
            email,
            password,
        } => auth::register(ctx, name, email, password).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Whoami => auth::whoami(ctx).await,
        Command::Refresh => auth::refresh(ctx).await,
        Command::Portfolios { action } => portfolios::run(ctx, action).await,
        Command::Positions { action } => positions::run(ctx, action).await,
        Command::Trades { action } => trades::run(ctx, action).await,
        Command::Users { action } => users::run(ctx, action).await,
        Command::Calc { action } => calc::run(ctx, action),
    }
}

/// Refuses an action the signed-in user may not perform, before calling the API.
fn ensure_permitted<F>(ctx: &Context, check: F, action: &str) -> anyhow::Result<()>
where
    F: FnOnce(&Permissions<'_>) -> bool,
{
    let session = ctx.client.session()?;
    if !check(&Permissions::for_user(session.user.as_ref())) {
        anyhow::bail!("You are not allowed to {}", action);
    }
    Ok(())
}
