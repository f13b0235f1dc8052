//! In-process backend holding fixed rows, with read counters and failure
//! injection for exercising the pages without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{
    AccountStore, BackendError, DONOR_ANALYTICS, DONOR_PROFILES, DONORS, DonorBackend,
    expect_single, validate_analytics, validate_profiles,
};
use crate::models::{AdminAccount, DonorAnalytics, DonorProfile, DonorSummary, NewAdminAccount};

#[derive(Default)]
struct Tables {
    profiles: Vec<DonorProfile>,
    analytics: Vec<DonorAnalytics>,
    donors: Vec<DonorSummary>,
    accounts: Vec<AdminAccount>,
    failure: Option<String>,
    fetches: HashMap<&'static str, usize>,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    delay: Option<Duration>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(self, profiles: Vec<DonorProfile>) -> Self {
        self.lock().profiles = profiles;
        self
    }

    /// Analytics rows as stored; anything but exactly one row fails the read.
    pub fn with_analytics_rows(self, rows: Vec<DonorAnalytics>) -> Self {
        self.lock().analytics = rows;
        self
    }

    pub fn with_donors(self, donors: Vec<DonorSummary>) -> Self {
        self.lock().donors = donors;
        self
    }

    pub fn with_accounts(self, accounts: Vec<AdminAccount>) -> Self {
        self.lock().accounts = accounts;
        self
    }

    /// Sleep this long inside every donor read.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every donor read fail with this message until cleared.
    pub fn set_failure(&self, message: Option<&str>) {
        self.lock().failure = message.map(str::to_string);
    }

    /// Number of reads issued against a table.
    pub fn fetch_count(&self, table: &str) -> usize {
        self.lock().fetches.get(table).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count the read and surface the configured failure, if any.
    async fn begin_read(&self, table: &'static str) -> Result<(), BackendError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut tables = self.lock();
        *tables.fetches.entry(table).or_insert(0) += 1;
        match &tables.failure {
            Some(message) => Err(BackendError::Query { table, message: message.clone() }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DonorBackend for MemoryBackend {
    async fn donor_profiles(&self) -> Result<Vec<DonorProfile>, BackendError> {
        self.begin_read(DONOR_PROFILES.table).await?;
        let profiles = self.lock().profiles.clone();
        validate_profiles(profiles)
    }

    async fn donor_analytics(&self) -> Result<DonorAnalytics, BackendError> {
        self.begin_read(DONOR_ANALYTICS.table).await?;
        let rows = self.lock().analytics.clone();
        validate_analytics(expect_single(&DONOR_ANALYTICS, rows)?)
    }

    async fn donors(&self) -> Result<Vec<DonorSummary>, BackendError> {
        self.begin_read(DONORS.table).await?;
        Ok(self.lock().donors.clone())
    }
}

#[async_trait]
impl AccountStore for MemoryBackend {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, BackendError> {
        Ok(self.lock().accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn create(&self, account: &NewAdminAccount) -> Result<i64, BackendError> {
        let mut tables = self.lock();
        if tables.accounts.iter().any(|a| a.username == account.username) {
            return Err(BackendError::Conflict(format!(
                "username '{}' already exists",
                account.username
            )));
        }
        let id = tables.accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        tables.accounts.push(AdminAccount {
            id,
            username: account.username.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role.clone(),
        });
        Ok(id)
    }
}
