use askama::Template;

use super::{PageContext, ViewState};
use crate::chart::BarChart;
use crate::format::format_currency;
use crate::models::{DonorAnalytics, TopDonor};

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
}

impl SummaryCard {
    /// The four headline cards, in display order.
    pub fn from_analytics(analytics: &DonorAnalytics) -> Vec<SummaryCard> {
        vec![
            SummaryCard { title: "Total Donors", value: analytics.total_donors_display() },
            SummaryCard { title: "Average Donation", value: analytics.average_donation_display() },
            SummaryCard { title: "Retention Rate", value: analytics.retention_rate_display() },
            SummaryCard { title: "New Donors (Month)", value: analytics.new_donors_display() },
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopDonorRow {
    pub rank: usize,
    pub name: String,
    pub total: String,
}

impl TopDonorRow {
    /// 1-based ranks in the order given; no re-sorting.
    pub fn ranked(donors: &[TopDonor]) -> Vec<TopDonorRow> {
        donors
            .iter()
            .enumerate()
            .map(|(i, donor)| TopDonorRow {
                rank: i + 1,
                name: donor.name.clone(),
                total: format_currency(donor.total),
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "admin/engagement_analysis.html")]
pub struct EngagementAnalysisTemplate {
    pub ctx: PageContext,
    pub state: ViewState,
    pub cards: Vec<SummaryCard>,
    pub chart: BarChart,
    pub top_donors: Vec<TopDonorRow>,
}
