use super::users_model::User;

/// What the signed-in user may do. Admins may do everything; other users
/// may edit and delete only what they own. Without a user nothing is allowed.
#[derive(Debug, Clone, Copy)]
pub struct Permissions<'a> {
    user: Option<&'a User>,
}

impl<'a> Permissions<'a> {
    pub fn for_user(user: Option<&'a User>) -> Self {
        Self { user }
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_some_and(User::is_admin)
    }

    pub fn can_manage_users(&self) -> bool {
        self.is_admin()
    }

    pub fn can_edit_portfolio(&self, owner_id: &str) -> bool {
        self.is_admin_or_owner(owner_id)
    }

    pub fn can_delete_portfolio(&self, owner_id: &str) -> bool {
        self.is_admin_or_owner(owner_id)
    }

    pub fn can_edit_trade(&self, owner_id: &str) -> bool {
        self.is_admin_or_owner(owner_id)
    }

    pub fn can_delete_trade(&self, owner_id: &str) -> bool {
        self.is_admin_or_owner(owner_id)
    }

    fn is_admin_or_owner(&self, owner_id: &str) -> bool {
        self.user
            .is_some_and(|u| u.is_admin() || u.id == owner_id)
    }
}
