use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::errors::AppError;
use crate::models::AdminAccount;

const USER_ID_KEY: &str = "user_id";
const USERNAME_KEY: &str = "username";
const ROLE_KEY: &str = "role";
const FLASH_KEY: &str = "flash";

pub const SESSION_COOKIE: &str = "donor_dashboard_session";

/// Encrypted cookie session store shared by the binary and the test app.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_string())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .build()
}

/// Identity and role claim stored in the session cookie at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.role == crate::models::ADMIN_ROLE
    }
}

/// `Ok(None)` for an anonymous session; `Err` when the cookie cannot be decoded.
pub fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    let Some(user_id) = session.get::<i64>(USER_ID_KEY).map_err(session_err(USER_ID_KEY))? else {
        return Ok(None);
    };
    let username = session
        .get::<String>(USERNAME_KEY)
        .map_err(session_err(USERNAME_KEY))?
        .unwrap_or_default();
    let role = session
        .get::<String>(ROLE_KEY)
        .map_err(session_err(ROLE_KEY))?
        .unwrap_or_default();
    Ok(Some(SessionUser { user_id, username, role }))
}

/// The signed-in user, or `AppError::Session` for anonymous sessions.
pub fn require_user(session: &Session) -> Result<SessionUser, AppError> {
    current_user(session)?.ok_or_else(|| AppError::Session("Not authenticated".to_string()))
}

/// Store the account's identity and role claim. The session id is renewed
/// first so a pre-login cookie cannot be fixated.
pub fn sign_in(session: &Session, account: &AdminAccount) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID_KEY, account.id)
        .and_then(|_| session.insert(USERNAME_KEY, &account.username))
        .and_then(|_| session.insert(ROLE_KEY, &account.role))
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

fn session_err<E: std::fmt::Display>(key: &'static str) -> impl Fn(E) -> AppError {
    move |e| AppError::Session(format!("Failed to read '{key}' from session: {e}"))
}
