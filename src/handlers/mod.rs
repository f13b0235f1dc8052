pub mod admin_create;
pub mod auth_handlers;
pub mod dashboard;
pub mod donor_list;
pub mod donor_profiling;
pub mod engagement_analysis;
