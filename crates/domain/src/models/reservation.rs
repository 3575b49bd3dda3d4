//! Reservation summary models for the dashboard's upcoming list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reservation lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    Cancelled,
}

/// Condensed reservation row from `GET /admin/reservations/upcoming`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ReservationSummary {
    pub id: i64,
    pub guest_name: String,
    pub cabin_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: ReservationStatus,
    pub total_price: f64,
}
