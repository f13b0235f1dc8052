use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;

use super::{
    AccountStore, BackendError, DONOR_ANALYTICS, DONOR_PROFILES, DONORS, DonorBackend, Selection,
    expect_single, validate_analytics, validate_profiles,
};
use crate::models::{
    AdminAccount, DonorAnalytics, DonorProfile, DonorSummary, EngagementLevel, LinkedDonor,
    MonthlyTrend, NewAdminAccount, TopDonor,
};

const ADMIN_USERS: &str = "admin_users";

/// Postgres-backed implementation of both backend traits.
#[derive(Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn query_err(table: &'static str) -> impl Fn(sqlx::Error) -> BackendError {
    move |e| BackendError::Query { table, message: e.to_string() }
}

fn log_select(selection: &Selection) {
    log::debug!("select {} from {} ({:?})", selection.columns, selection.table, selection.cardinality);
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: String,
    engagement_level: String,
    total_donations: f64,
    risk_of_churn: f64,
    next_predicted_donation: f64,
    donor_id: Option<String>,
    first_name: Option<String>,
    last_org_name: Option<String>,
    email: Option<String>,
}

impl From<ProfileRow> for DonorProfile {
    fn from(row: ProfileRow) -> Self {
        // LEFT JOIN: no donor id means the reference is dangling.
        let donor = row.donor_id.map(|_| LinkedDonor {
            first_name: row.first_name,
            last_org_name: row.last_org_name,
            email: row.email,
        });
        DonorProfile {
            id: row.id,
            donor,
            engagement_level: EngagementLevel::parse(&row.engagement_level),
            total_donations: row.total_donations,
            risk_of_churn: row.risk_of_churn,
            next_predicted_donation: row.next_predicted_donation,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnalyticsRow {
    total_donors: Option<i64>,
    average_donation: Option<f64>,
    donor_retention_rate: Option<f64>,
    new_donors_this_month: Option<i64>,
    monthly_trends: Option<Json<Vec<MonthlyTrend>>>,
    top_donors: Option<Json<Vec<TopDonor>>>,
}

impl From<AnalyticsRow> for DonorAnalytics {
    fn from(row: AnalyticsRow) -> Self {
        DonorAnalytics {
            total_donors: row.total_donors,
            average_donation: row.average_donation,
            donor_retention_rate: row.donor_retention_rate,
            new_donors_this_month: row.new_donors_this_month,
            monthly_trends: row.monthly_trends.map(|j| j.0).unwrap_or_default(),
            top_donors: row.top_donors.map(|j| j.0).unwrap_or_default(),
        }
    }
}

#[async_trait]
impl DonorBackend for PgBackend {
    async fn donor_profiles(&self) -> Result<Vec<DonorProfile>, BackendError> {
        log_select(&DONOR_PROFILES);
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT p.id::text AS id, \
                    COALESCE(p.engagement_level, '') AS engagement_level, \
                    COALESCE(p.total_donations, 0)::float8 AS total_donations, \
                    COALESCE(p.risk_of_churn, 0)::float8 AS risk_of_churn, \
                    COALESCE(p.next_predicted_donation, 0)::float8 AS next_predicted_donation, \
                    d.id::text AS donor_id, d.first_name, d.last_org_name, d.email \
             FROM donor_profiles p \
             LEFT JOIN donors d ON d.id = p.donor_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_err(DONOR_PROFILES.table))?;

        validate_profiles(rows.into_iter().map(DonorProfile::from).collect())
    }

    async fn donor_analytics(&self) -> Result<DonorAnalytics, BackendError> {
        log_select(&DONOR_ANALYTICS);
        // LIMIT 2 is enough to tell "exactly one" from "several".
        let rows = sqlx::query_as::<_, AnalyticsRow>(
            "SELECT total_donors::int8 AS total_donors, \
                    average_donation::float8 AS average_donation, \
                    donor_retention_rate::float8 AS donor_retention_rate, \
                    new_donors_this_month::int8 AS new_donors_this_month, \
                    monthly_trends, top_donors \
             FROM donor_analytics \
             LIMIT 2",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_err(DONOR_ANALYTICS.table))?;

        let row = expect_single(&DONOR_ANALYTICS, rows)?;
        validate_analytics(DonorAnalytics::from(row))
    }

    async fn donors(&self) -> Result<Vec<DonorSummary>, BackendError> {
        log_select(&DONORS);
        sqlx::query_as::<_, DonorSummary>(
            "SELECT id::text AS id, first_name, last_org_name, email \
             FROM donors \
             ORDER BY last_org_name NULLS LAST, first_name NULLS LAST, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(query_err(DONORS.table))
    }
}

#[async_trait]
impl AccountStore for PgBackend {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminAccount>, BackendError> {
        sqlx::query_as::<_, AdminAccount>(
            "SELECT id, username, email, password_hash, role \
             FROM admin_users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err(ADMIN_USERS))
    }

    async fn create(&self, account: &NewAdminAccount) -> Result<i64, BackendError> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO admin_users (username, email, password_hash, role) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(e) if e.as_database_error().is_some_and(|db| db.is_unique_violation()) => Err(
                BackendError::Conflict(format!("username '{}' already exists", account.username)),
            ),
            Err(e) => Err(query_err(ADMIN_USERS)(e)),
        }
    }
}
