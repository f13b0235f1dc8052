use std::fmt;

use crate::format::{format_currency, format_fraction_percent};

/// Churn risk above this fraction is shown in red.
pub const CHURN_HIGH_THRESHOLD: f64 = 0.7;
/// Churn risk above this fraction (and not above the high threshold) is shown in yellow.
pub const CHURN_ELEVATED_THRESHOLD: f64 = 0.3;

/// Engagement classification computed upstream by the analytics process.
///
/// Values outside High/Medium/Low are kept verbatim in `Other` so the page can
/// still show what the backend stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementLevel {
    High,
    Medium,
    Low,
    Other(String),
}

impl EngagementLevel {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Other(raw) => raw,
        }
    }

    /// Badge colour: High is green, Medium yellow, everything else red.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::High => "badge badge-green",
            Self::Medium => "badge badge-yellow",
            Self::Low | Self::Other(_) => "badge badge-red",
        }
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Colour band for a churn-risk fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChurnBand {
    High,
    Elevated,
    Low,
}

impl ChurnBand {
    /// Thresholds are strict and checked from the top down, so exactly 0.7
    /// is `Elevated` and exactly 0.3 is `Low`.
    pub fn classify(risk: f64) -> Self {
        if risk > CHURN_HIGH_THRESHOLD {
            Self::High
        } else if risk > CHURN_ELEVATED_THRESHOLD {
            Self::Elevated
        } else {
            Self::Low
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::High => "text-red",
            Self::Elevated => "text-yellow",
            Self::Low => "text-green",
        }
    }
}

/// Minimal projection of the `donors` row a profile points at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedDonor {
    pub first_name: Option<String>,
    pub last_org_name: Option<String>,
    pub email: Option<String>,
}

impl LinkedDonor {
    /// `first last`, skipping whichever part is missing or blank.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_org_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DonorProfile {
    pub id: String,
    pub donor: Option<LinkedDonor>,
    pub engagement_level: EngagementLevel,
    pub total_donations: f64,
    pub risk_of_churn: f64,
    pub next_predicted_donation: f64,
}

impl DonorProfile {
    /// Reject rows whose metrics cannot be displayed meaningfully.
    pub fn validate(&self) -> Result<(), String> {
        if !self.total_donations.is_finite() {
            return Err("total_donations is not a finite number".to_string());
        }
        if !self.next_predicted_donation.is_finite() {
            return Err("next_predicted_donation is not a finite number".to_string());
        }
        if !(0.0..=1.0).contains(&self.risk_of_churn) {
            return Err(format!("risk_of_churn {} is outside [0, 1]", self.risk_of_churn));
        }
        Ok(())
    }

    pub fn donor_name(&self) -> String {
        self.donor.as_ref().map(LinkedDonor::display_name).unwrap_or_default()
    }

    pub fn churn_band(&self) -> ChurnBand {
        ChurnBand::classify(self.risk_of_churn)
    }

    pub fn churn_display(&self) -> String {
        format_fraction_percent(self.risk_of_churn)
    }

    pub fn total_donations_display(&self) -> String {
        format_currency(self.total_donations)
    }

    pub fn next_predicted_display(&self) -> String {
        format_currency(self.next_predicted_donation)
    }
}
