/// A row of the `donors` table as shown on the donor list page.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DonorSummary {
    pub id: String,
    pub first_name: Option<String>,
    pub last_org_name: Option<String>,
    pub email: Option<String>,
}

impl DonorSummary {
    pub fn display_name(&self) -> String {
        crate::models::donor_profile::LinkedDonor {
            first_name: self.first_name.clone(),
            last_org_name: self.last_org_name.clone(),
            email: None,
        }
        .display_name()
    }

    pub fn email_display(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}
