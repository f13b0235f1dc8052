use askama::Template;

use super::{NavLink, PageContext};

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    /// Link cards for the other admin pages.
    pub pages: Vec<NavLink>,
}
