//! Bot VJ admin dashboard client.
//!
//! Keeps an admin view supplied with a fresh [`domain::models::MetricsBundle`]:
//! a [`store::PollingStore`] fans out to the admin endpoints, merges the
//! responses, caches sub-responses with a short TTL, and refreshes on a timer
//! between explicit `start()`/`stop()` calls. Failures are absorbed into the
//! exposed snapshot (stale data kept, or sample data substituted) rather than
//! surfaced as panics or return errors.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;

pub use api::{DashboardApi, HttpDashboardApi};
pub use config::Config;
pub use error::ClientError;
pub use store::{DashboardSnapshot, Phase, PollingStore, StoreOptions};
