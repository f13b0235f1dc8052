use serde::Deserialize;

use crate::auth::validate;

/// Role claim that passes the admin guard.
pub const ADMIN_ROLE: &str = "admin";

/// Stored admin account, including the password hash. Never handed to templates.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl AdminAccount {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Account data ready for insertion; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAdminAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Form data from the create-admin page.
#[derive(Debug, Deserialize)]
pub struct CreateAdminForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub csrf_token: String,
}

impl CreateAdminForm {
    /// Collect every validation error so the form can show them together.
    pub fn validate(&self) -> Vec<String> {
        [
            validate::validate_username(&self.username),
            validate::validate_email(&self.email),
            validate::validate_password(&self.password),
            validate::validate_password_match(&self.password, &self.password_confirm),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
