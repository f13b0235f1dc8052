//! Data-access boundary to the hosted backend.
//!
//! Pages never see raw rows: every implementation hands back typed,
//! validated records or a [`BackendError`] describing what went wrong.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{AdminAccount, DonorAnalytics, DonorProfile, DonorSummary, NewAdminAccount};

pub use memory::MemoryBackend;
pub use postgres::PgBackend;

/// How many rows a selection expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Many,
    /// Exactly one row; zero or several rows is a failure.
    Single,
}

/// Request shape of a read: table, projected columns, cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub table: &'static str,
    pub columns: &'static str,
    pub cardinality: Cardinality,
}

pub const DONOR_PROFILES: Selection = Selection {
    table: "donor_profiles",
    columns: "*, donors(first_name, last_org_name, email)",
    cardinality: Cardinality::Many,
};

pub const DONOR_ANALYTICS: Selection = Selection {
    table: "donor_analytics",
    columns: "*",
    cardinality: Cardinality::Single,
};

pub const DONORS: Selection = Selection {
    table: "donors",
    columns: "id, first_name, last_org_name, email",
    cardinality: Cardinality::Many,
};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    Query { table: &'static str, message: String },
    Cardinality { table: &'static str, rows: usize },
    InvalidRow { table: &'static str, id: String, reason: String },
    Conflict(String),
    Task(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Query { table, message } => write!(f, "query on {table} failed: {message}"),
            BackendError::Cardinality { table, rows } => {
                write!(f, "expected exactly one row from {table}, got {rows}")
            }
            BackendError::InvalidRow { table, id, reason } => {
                write!(f, "invalid row {id} in {table}: {reason}")
            }
            BackendError::Conflict(what) => write!(f, "conflict: {what}"),
            BackendError::Task(e) => write!(f, "fetch task failed: {e}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl BackendError {
    /// Short description safe to show in a page: names the table and the
    /// kind of failure, never the driver's message.
    pub fn summary(&self) -> String {
        match self {
            BackendError::Query { table, .. } => format!("query on {table} failed"),
            BackendError::Cardinality { table, rows } => {
                format!("expected exactly one row from {table}, got {rows}")
            }
            BackendError::InvalidRow { table, id, .. } => format!("invalid row {id} in {table}"),
            BackendError::Conflict(_) => "conflicting write".to_string(),
            BackendError::Task(_) => "fetch task failed".to_string(),
        }
    }
}

/// Read-only donor queries.
#[async_trait]
pub trait DonorBackend: Send + Sync {
    /// Every profile joined with its donor's name and email.
    async fn donor_profiles(&self) -> Result<Vec<DonorProfile>, BackendError>;

    /// The singleton analytics row.
    async fn donor_analytics(&self) -> Result<DonorAnalytics, BackendError>;

    async fn donors(&self) -> Result<Vec<DonorSummary>, BackendError>;
}

/// Admin accounts used by login and the create-admin page.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, BackendError>;

    /// Insert an account and return its id. Duplicate usernames are `Conflict`.
    async fn create(&self, account: &NewAdminAccount) -> Result<i64, BackendError>;
}

/// Enforce single-row cardinality on a fetched row set.
pub fn expect_single<T>(selection: &Selection, mut rows: Vec<T>) -> Result<T, BackendError> {
    if rows.len() != 1 {
        return Err(BackendError::Cardinality { table: selection.table, rows: rows.len() });
    }
    rows.pop().ok_or(BackendError::Cardinality { table: selection.table, rows: 0 })
}

/// Validate every profile, failing the whole set on the first bad row.
pub fn validate_profiles(profiles: Vec<DonorProfile>) -> Result<Vec<DonorProfile>, BackendError> {
    for profile in &profiles {
        profile.validate().map_err(|reason| BackendError::InvalidRow {
            table: DONOR_PROFILES.table,
            id: profile.id.clone(),
            reason,
        })?;
    }
    Ok(profiles)
}

pub fn validate_analytics(analytics: DonorAnalytics) -> Result<DonorAnalytics, BackendError> {
    analytics.validate().map_err(|reason| BackendError::InvalidRow {
        table: DONOR_ANALYTICS.table,
        id: "singleton".to_string(),
        reason,
    })?;
    Ok(analytics)
}
