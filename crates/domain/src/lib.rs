//! Domain layer for the Bot VJ admin dashboard client.
//!
//! This crate contains:
//! - Dashboard metric models (MetricsBundle and its parts)
//! - Backend response envelope decoding
//! - The hardcoded fallback snapshot
//! - Auth payload models

pub mod envelope;
pub mod fallback;
pub mod models;
