pub mod account;
pub mod donor;
pub mod donor_analytics;
pub mod donor_profile;

pub use account::{AdminAccount, NewAdminAccount, ADMIN_ROLE};
pub use donor::DonorSummary;
pub use donor_analytics::{DonorAnalytics, MonthlyTrend, TopDonor};
pub use donor_profile::{ChurnBand, DonorProfile, EngagementLevel, LinkedDonor};
