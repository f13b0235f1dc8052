use serde::{Deserialize, Deserializer};

use crate::format::{format_currency, format_percent};

/// One bar of the monthly trend chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub amount: f64,
}

/// One entry of the top-donor list, in the order the backend ranked it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopDonor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub total: f64,
}

/// Singleton aggregate record from `donor_analytics`.
///
/// Scalars are optional because the view may not have computed them yet;
/// the `*_display` helpers fall back to 0 for display only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonorAnalytics {
    pub total_donors: Option<i64>,
    pub average_donation: Option<f64>,
    pub donor_retention_rate: Option<f64>,
    pub new_donors_this_month: Option<i64>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub top_donors: Vec<TopDonor>,
}

impl DonorAnalytics {
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("average_donation", self.average_donation),
            ("donor_retention_rate", self.donor_retention_rate),
        ];
        for (name, value) in scalars {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(format!("{name} is not a finite number"));
            }
        }
        if let Some(t) = self.monthly_trends.iter().find(|t| !t.amount.is_finite()) {
            return Err(format!("monthly trend '{}' has a non-finite amount", t.month));
        }
        if let Some(d) = self.top_donors.iter().find(|d| !d.total.is_finite()) {
            return Err(format!("top donor '{}' has a non-finite total", d.id));
        }
        Ok(())
    }

    pub fn total_donors_display(&self) -> String {
        self.total_donors.unwrap_or(0).to_string()
    }

    pub fn average_donation_display(&self) -> String {
        format_currency(self.average_donation.unwrap_or(0.0))
    }

    pub fn retention_rate_display(&self) -> String {
        format_percent(self.donor_retention_rate.unwrap_or(0.0))
    }

    pub fn new_donors_display(&self) -> String {
        self.new_donors_this_month.unwrap_or(0).to_string()
    }
}

/// Donor ids arrive as JSON strings or numbers depending on the source table.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
