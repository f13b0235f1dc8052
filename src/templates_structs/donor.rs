use askama::Template;

use super::{PageContext, ViewState};
use crate::models::{DonorProfile, DonorSummary};

/// Display-ready cells of one donor-profile row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    pub id: String,
    pub donor_name: String,
    pub engagement_label: String,
    pub engagement_class: &'static str,
    pub total_donations: String,
    pub churn: String,
    pub churn_class: &'static str,
    pub next_predicted_donation: String,
}

impl From<&DonorProfile> for ProfileRow {
    fn from(profile: &DonorProfile) -> Self {
        Self {
            id: profile.id.clone(),
            donor_name: profile.donor_name(),
            engagement_label: profile.engagement_level.label().to_string(),
            engagement_class: profile.engagement_level.badge_class(),
            total_donations: profile.total_donations_display(),
            churn: profile.churn_display(),
            churn_class: profile.churn_band().text_class(),
            next_predicted_donation: profile.next_predicted_display(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonorRow {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&DonorSummary> for DonorRow {
    fn from(donor: &DonorSummary) -> Self {
        Self {
            id: donor.id.clone(),
            name: donor.display_name(),
            email: donor.email_display().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/donor_profiling.html")]
pub struct DonorProfilingTemplate {
    pub ctx: PageContext,
    pub state: ViewState,
    pub rows: Vec<ProfileRow>,
}

#[derive(Template)]
#[template(path = "admin/donors.html")]
pub struct DonorListTemplate {
    pub ctx: PageContext,
    pub state: ViewState,
    pub donors: Vec<DonorRow>,
}
