// Template context structures for Askama templates, organized by page.

use actix_session::Session;
use actix_web::http::StatusCode;

use crate::auth::csrf;
use crate::auth::session::{require_user, take_flash};
use crate::errors::AppError;
use crate::query_cache::QueryState;
use crate::routes::ADMIN_ROUTES;
use crate::state::AppState;

/// Sidebar link derived from the route table.
pub struct NavLink {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

/// Common context for every page rendered inside the admin layout.
/// Templates access these as `ctx.username`, `ctx.nav`, etc.
pub struct PageContext {
    pub app_name: String,
    pub username: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub nav: Vec<NavLink>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, state: &AppState, current_path: &str) -> Result<Self, AppError> {
        let user = require_user(session)?;
        let avatar_initial = user.username.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            app_name: state.app_name.clone(),
            username: user.username,
            avatar_initial,
            flash: take_flash(session),
            nav: navigation(current_path),
            csrf_token: csrf::get_or_create_token(session),
        })
    }
}

pub fn navigation(current_path: &str) -> Vec<NavLink> {
    ADMIN_ROUTES
        .iter()
        .filter_map(|route| {
            route.nav_label.map(|label| NavLink {
                label: label.to_string(),
                url: route.path.to_string(),
                is_active: route.path == current_path,
            })
        })
        .collect()
}

/// Render-side view of a [`QueryState`]: what the page should show, without
/// the data itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Failed(String),
    Ready,
}

impl ViewState {
    pub fn of<T>(query: &QueryState<T>) -> Self {
        match query {
            QueryState::Loading => ViewState::Loading,
            QueryState::Failed(e) => ViewState::Failed(e.summary()),
            QueryState::Ready(_) => ViewState::Ready,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 502 for a failed query so monitoring sees the backend problem.
    pub fn status(&self) -> StatusCode {
        match self {
            ViewState::Failed(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::OK,
        }
    }
}

mod analytics;
mod common;
mod dashboard;
mod donor;

pub use self::analytics::{EngagementAnalysisTemplate, SummaryCard, TopDonorRow};
pub use self::common::{CreateAdminTemplate, LoginTemplate};
pub use self::dashboard::DashboardTemplate;
pub use self::donor::{DonorListTemplate, DonorProfilingTemplate, DonorRow, ProfileRow};
