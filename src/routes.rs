//! Route table and its mounting on the actix router.

use actix_web::{HttpResponse, Resource, middleware::from_fn, web};

use crate::auth::middleware::require_admin;
use crate::config::AdminCreatePolicy;
use crate::handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPage {
    CreateAdmin,
    Dashboard,
    DonorList,
    DonorProfiling,
    EngagementAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: AdminPage,
    pub access: Access,
    /// Sidebar label; `None` keeps the page out of the admin navigation.
    pub nav_label: Option<&'static str>,
}

impl RouteEntry {
    /// Access after applying the create-admin policy.
    pub fn effective_access(&self, policy: AdminCreatePolicy) -> Access {
        match (self.page, policy) {
            (AdminPage::CreateAdmin, AdminCreatePolicy::Guarded) => Access::Admin,
            _ => self.access,
        }
    }
}

/// Literal paths only; order is the order of the admin sidebar.
pub const ADMIN_ROUTES: [RouteEntry; 5] = [
    RouteEntry {
        path: "/admin/create",
        page: AdminPage::CreateAdmin,
        access: Access::Public,
        nav_label: None,
    },
    RouteEntry {
        path: "/admin",
        page: AdminPage::Dashboard,
        access: Access::Admin,
        nav_label: Some("Dashboard"),
    },
    RouteEntry {
        path: "/admin/donors",
        page: AdminPage::DonorList,
        access: Access::Admin,
        nav_label: Some("Donors"),
    },
    RouteEntry {
        path: "/admin/donor-profiling",
        page: AdminPage::DonorProfiling,
        access: Access::Admin,
        nav_label: Some("Donor Profiling"),
    },
    RouteEntry {
        path: "/admin/engagement-analysis",
        page: AdminPage::EngagementAnalysis,
        access: Access::Admin,
        nav_label: Some("Engagement Analysis"),
    },
];

pub fn find_route(path: &str) -> Option<&'static RouteEntry> {
    ADMIN_ROUTES.iter().find(|r| r.path == path)
}

fn page_resource(entry: &RouteEntry) -> Resource {
    let resource = web::resource(entry.path);
    match entry.page {
        AdminPage::CreateAdmin => resource
            .route(web::get().to(handlers::admin_create::form))
            .route(web::post().to(handlers::admin_create::submit)),
        AdminPage::Dashboard => resource.route(web::get().to(handlers::dashboard::index)),
        AdminPage::DonorList => resource.route(web::get().to(handlers::donor_list::index)),
        AdminPage::DonorProfiling => resource.route(web::get().to(handlers::donor_profiling::index)),
        AdminPage::EngagementAnalysis => {
            resource.route(web::get().to(handlers::engagement_analysis::index))
        }
    }
}

/// Mount login/logout and every entry of [`ADMIN_ROUTES`], wrapping guarded
/// entries in [`require_admin`].
pub fn configure(cfg: &mut web::ServiceConfig, policy: AdminCreatePolicy) {
    cfg.route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        .route("/logout", web::post().to(handlers::auth_handlers::logout))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/admin"))
                    .finish()
            }),
        );

    for entry in &ADMIN_ROUTES {
        let resource = page_resource(entry);
        match entry.effective_access(policy) {
            Access::Public => {
                cfg.service(resource);
            }
            Access::Admin => {
                cfg.service(resource.wrap(from_fn(require_admin)));
            }
        }
    }
}
