use tradeledger_core::users::{RegisterData, UserServiceTrait, UserUpdate};

use super::ensure_permitted;
use crate::cli::UserAction;
use crate::main_lib::Context;
use crate::output::{emit, user_detail, users_table};

pub async fn run(ctx: &Context, action: UserAction) -> anyhow::Result<()> {
    ensure_permitted(ctx, |p| p.can_manage_users(), "manage users")?;

    let client = &ctx.client;
    match action {
        UserAction::List => {
            let users = client.list_users().await?;
            emit(ctx, &users, |u| users_table(u))
        }
        UserAction::Show { id } => {
            let user = client.get_user(&id).await?;
            emit(ctx, &user, user_detail)
        }
        UserAction::Create {
            name,
            email,
            password,
            role,
        } => {
            let user = client
                .create_user(RegisterData {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            emit(ctx, &user, user_detail)
        }
        UserAction::Update {
            id,
            name,
            email,
            password,
            role,
        } => {
            let update = UserUpdate {
                name,
                email,
                password,
                role,
            };
            if update == UserUpdate::default() {
                anyhow::bail!("Nothing to update");
            }
            let user = client.update_user(&id, update).await?;
            emit(ctx, &user, user_detail)
        }
        UserAction::Delete { id } => {
            client.delete_user(&id).await?;
            println!("Deleted user {}.", id);
            Ok(())
        }
    }
}
