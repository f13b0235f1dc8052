//! Shared test infrastructure for the HTTP-level tests.
//!
//! Every test builds its own application around a [`MemoryBackend`], so
//! query caches and the login throttle never leak between tests.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};

use donor_dashboard::auth::password;
use donor_dashboard::auth::session::{SESSION_COOKIE, session_middleware};
use donor_dashboard::backend::memory::MemoryBackend;
use donor_dashboard::config::{AdminCreatePolicy, AppConfig};
use donor_dashboard::errors;
use donor_dashboard::models::{
    AdminAccount, DonorAnalytics, DonorProfile, EngagementLevel, LinkedDonor, MonthlyTrend, TopDonor,
};
use donor_dashboard::routes;
use donor_dashboard::state::AppState;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";
pub const VIEWER_USER: &str = "viewer";
pub const VIEWER_PASS: &str = "viewer123";

// ============================================================================
// APPLICATION SETUP
// ============================================================================

pub fn test_state(backend: Arc<MemoryBackend>, policy: AdminCreatePolicy) -> web::Data<AppState> {
    let config = AppConfig { admin_create_policy: policy, ..AppConfig::default() };
    web::Data::new(AppState::new(&config, backend.clone(), backend))
}

/// Build the routed app the way `main` does, minus static files and logging.
pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let policy = state.admin_create_policy;
    test::init_service(
        App::new()
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state)
            .configure(move |cfg| routes::configure(cfg, policy))
            .default_service(web::to(errors::not_found)),
    )
    .await
}

// ============================================================================
// FIXTURES
// ============================================================================

/// An admin account and a non-admin account, both with real argon2 hashes.
pub fn accounts() -> Vec<AdminAccount> {
    vec![
        account(1, ADMIN_USER, ADMIN_PASS, "admin"),
        account(2, VIEWER_USER, VIEWER_PASS, "viewer"),
    ]
}

pub fn account(id: i64, username: &str, pass: &str, role: &str) -> AdminAccount {
    AdminAccount {
        id,
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password_hash: password::hash_password(pass).expect("Failed to hash password"),
        role: role.to_string(),
    }
}

pub fn profile(
    id: &str,
    first: &str,
    last: &str,
    level: &str,
    total: f64,
    churn: f64,
    next: f64,
) -> DonorProfile {
    DonorProfile {
        id: id.to_string(),
        donor: Some(LinkedDonor {
            first_name: Some(first.to_string()),
            last_org_name: Some(last.to_string()),
            email: None,
        }),
        engagement_level: EngagementLevel::parse(level),
        total_donations: total,
        risk_of_churn: churn,
        next_predicted_donation: next,
    }
}

pub fn analytics() -> DonorAnalytics {
    DonorAnalytics {
        total_donors: Some(1250),
        average_donation: Some(87.5),
        donor_retention_rate: Some(64.2),
        new_donors_this_month: Some(18),
        monthly_trends: vec![
            MonthlyTrend { month: "Jan".to_string(), amount: 100.0 },
            MonthlyTrend { month: "Feb".to_string(), amount: 150.0 },
        ],
        top_donors: vec![
            TopDonor { id: "a".to_string(), name: "Alice".to_string(), total: 500.0 },
            TopDonor { id: "b".to_string(), name: "Bob".to_string(), total: 300.0 },
        ],
    }
}

// ============================================================================
// REQUEST HELPERS
// ============================================================================

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// Pull the hidden CSRF token out of a rendered form.
pub fn csrf_from_body(body: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = body.find(marker).expect("form has no csrf_token field") + marker.len();
    let end = body[start..].find('"').expect("unterminated csrf value") + start;
    body[start..end].to_string()
}

pub async fn body_string<B: MessageBody>(res: ServiceResponse<B>) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("body is not utf-8")
}

pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// GET a form page and return its session cookie and CSRF token.
pub async fn open_form<S, B>(app: &S, path: &str) -> (Cookie<'static>, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, test::TestRequest::get().uri(path).to_request()).await;
    let cookie = session_cookie(&res).expect("form page did not set a session cookie");
    let token = csrf_from_body(&body_string(res).await);
    (cookie, token)
}

/// Sign in through the login form. Returns the response to the POST.
pub async fn submit_login<S, B>(app: &S, username: &str, pass: &str) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (cookie, token) = open_form(app, "/login").await;
    let req = test::TestRequest::post()
        .uri("/login")
        .cookie(cookie)
        .set_form([("username", username), ("password", pass), ("csrf_token", token.as_str())])
        .to_request();
    test::call_service(app, req).await
}

/// Sign in and return the authenticated session cookie.
pub async fn login<S, B>(app: &S, username: &str, pass: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = submit_login(app, username, pass).await;
    assert_eq!(res.status(), 303, "login as '{username}' failed");
    session_cookie(&res).expect("login did not set a session cookie")
}

pub async fn get_with<S, B>(app: &S, path: &str, cookie: Option<Cookie<'static>>) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut req = test::TestRequest::get().uri(path);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie);
    }
    test::call_service(app, req.to_request()).await
}
