//! Per-application state shared by all workers.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::rate_limit::LoginThrottle;
use crate::backend::{AccountStore, DonorBackend};
use crate::config::{AdminCreatePolicy, AppConfig};
use crate::queries::QueryCaches;

/// Backends, query caches and page settings for one application instance.
/// Dropping it drops every cached result.
pub struct AppState {
    pub app_name: String,
    pub backend: Arc<dyn DonorBackend>,
    pub accounts: Arc<dyn AccountStore>,
    pub caches: QueryCaches,
    pub query_wait: Duration,
    pub admin_create_policy: AdminCreatePolicy,
    pub login_throttle: LoginThrottle,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        backend: Arc<dyn DonorBackend>,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            app_name: config.app_name.clone(),
            backend,
            accounts,
            caches: QueryCaches::new(config.query_stale),
            query_wait: config.query_wait,
            admin_create_policy: config.admin_create_policy,
            login_throttle: LoginThrottle::default(),
        }
    }
}
