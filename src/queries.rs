//! Page queries: each binds a fixed cache key to one backend read.

use std::sync::Arc;
use std::time::Duration;

use crate::models::{DonorAnalytics, DonorProfile, DonorSummary};
use crate::query_cache::{QueryCache, QueryState};
use crate::state::AppState;

pub const DONOR_PROFILES_KEY: &str = "donor-profiles";
pub const DONOR_ANALYTICS_KEY: &str = "donor-analytics";
pub const DONORS_KEY: &str = "donors";

/// One cache per query key.
pub struct QueryCaches {
    pub donor_profiles: QueryCache<Vec<DonorProfile>>,
    pub donor_analytics: QueryCache<DonorAnalytics>,
    pub donors: QueryCache<Vec<DonorSummary>>,
}

impl QueryCaches {
    pub fn new(stale_after: Duration) -> Self {
        Self {
            donor_profiles: QueryCache::new(DONOR_PROFILES_KEY, stale_after),
            donor_analytics: QueryCache::new(DONOR_ANALYTICS_KEY, stale_after),
            donors: QueryCache::new(DONORS_KEY, stale_after),
        }
    }

    pub async fn invalidate_all(&self) {
        self.donor_profiles.invalidate().await;
        self.donor_analytics.invalidate().await;
        self.donors.invalidate().await;
    }
}

pub async fn donor_profiles(state: &AppState) -> QueryState<Vec<DonorProfile>> {
    let backend = Arc::clone(&state.backend);
    state
        .caches
        .donor_profiles
        .load(move || async move { backend.donor_profiles().await }, state.query_wait)
        .await
}

pub async fn donor_analytics(state: &AppState) -> QueryState<DonorAnalytics> {
    let backend = Arc::clone(&state.backend);
    state
        .caches
        .donor_analytics
        .load(move || async move { backend.donor_analytics().await }, state.query_wait)
        .await
}

pub async fn donors(state: &AppState) -> QueryState<Vec<DonorSummary>> {
    let backend = Arc::clone(&state.backend);
    state
        .caches
        .donors
        .load(move || async move { backend.donors().await }, state.query_wait)
        .await
}
