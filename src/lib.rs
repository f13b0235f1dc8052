pub mod auth;
pub mod backend;
pub mod chart;
pub mod config;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod queries;
pub mod query_cache;
pub mod routes;
pub mod state;
pub mod templates_structs;
