use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};

use crate::auth::session::{current_user, sign_in, take_flash};
use crate::auth::{csrf, password};
use crate::errors::{AppError, render};
use crate::state::AppState;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

fn login_form(
    state: &AppState,
    session: &Session,
    error: Option<String>,
    username: &str,
) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        app_name: state.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
        error,
        flash: take_flash(session),
        username: username.to_string(),
    };
    render(tmpl)
}

pub async fn login_page(
    state: web::Data<AppState>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    // Already signed in as admin: go straight to the dashboard
    if current_user(&session).ok().flatten().is_some_and(|u| u.is_admin()) {
        return Ok(see_other("/admin"));
    }
    login_form(&state, &session, None, "")
}

pub async fn login_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Throttle check BEFORE any backend access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if state.login_throttle.is_blocked(ip) {
        log::warn!("Login throttled for {ip}");
        let error = "Too many failed login attempts. Please try again later.".to_string();
        return login_form(&state, &session, Some(error), &form.username);
    }

    let username = form.username.trim();
    let account = state.accounts.find_by_username(username).await?;
    let verified = match &account {
        Some(a) => password::verify_password(&form.password, &a.password_hash).unwrap_or_else(|e| {
            log::error!("Stored hash for '{}' is unreadable: {e}", a.username);
            false
        }),
        None => false,
    };

    match account {
        Some(account) if verified => {
            state.login_throttle.clear(ip);
            sign_in(&session, &account)?;
            if account.is_admin() {
                log::info!("'{}' signed in", account.username);
            } else {
                log::warn!(
                    "'{}' signed in without the admin role (role '{}'); admin pages will refuse it",
                    account.username,
                    account.role
                );
            }
            Ok(see_other("/admin"))
        }
        _ => {
            state.login_throttle.record_failure(ip);
            log::warn!("Failed login for '{username}' from {ip}");
            let error = "Invalid username or password".to_string();
            login_form(&state, &session, Some(error), username)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
