//! Dashboard metric models.
//!
//! The aggregate [`MetricsBundle`] is assembled by the polling store from the
//! individual admin endpoints; every part also deserializes on its own so the
//! sub-responses can be cached independently.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Top-level dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Overview {
    pub total_users: i64,
    pub total_reservations: i64,
    pub total_revenue: f64,
    /// Occupied share of all cabin-nights in the current period, 0.0 to 1.0.
    pub occupancy_rate: f64,
}

/// Period granularity for the revenue time series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl RevenuePeriod {
    /// Query-string value for `GET /admin/dashboard/revenue?period=`.
    pub fn as_query_value(&self) -> &'static str {
        match self {
            RevenuePeriod::Week => "week",
            RevenuePeriod::Month => "month",
            RevenuePeriod::Year => "year",
        }
    }
}

/// One point of the revenue-by-period series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub amount: f64,
    pub reservation_count: i64,
}

/// Occupancy breakdown for a single cabin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CabinOccupancy {
    pub cabin_id: i64,
    pub cabin_name: String,
    pub occupied_nights: i64,
    pub available_nights: i64,
    pub rate: f64,
}

/// Percentage deltas against the previous period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Trends {
    pub reservations_change_pct: f64,
    pub revenue_change_pct: f64,
    pub users_change_pct: f64,
}

/// Backend system-health snapshot from `GET /admin/system/metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SystemHealth {
    pub uptime_secs: u64,
    pub memory_used_mb: f64,
    pub db_latency_ms: f64,
    pub request_count: u64,
    pub error_count: u64,
}

/// The aggregated dashboard snapshot the view layer reads.
///
/// Produced by merging the bodies of the fan-out sub-requests; carries no
/// identity beyond being the current snapshot for this dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricsBundle {
    pub overview: Overview,
    pub revenue_series: Vec<RevenuePoint>,
    pub occupancy_by_cabin: Vec<CabinOccupancy>,
    pub trends: Trends,
    pub recent_activity: Vec<super::ActivityEvent>,
    pub upcoming_reservations: Vec<super::ReservationSummary>,
    pub system_health: SystemHealth,
    pub alerts: Vec<super::Alert>,
    /// Merge timestamp, strictly increasing across successful loads.
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_period_query_values() {
        assert_eq!(RevenuePeriod::Week.as_query_value(), "week");
        assert_eq!(RevenuePeriod::Month.as_query_value(), "month");
        assert_eq!(RevenuePeriod::Year.as_query_value(), "year");
    }

    #[test]
    fn test_revenue_period_default_is_month() {
        assert_eq!(RevenuePeriod::default(), RevenuePeriod::Month);
    }

    #[test]
    fn test_overview_deserialization() {
        let json = r#"{
            "total_users": 42,
            "total_reservations": 310,
            "total_revenue": 125000.5,
            "occupancy_rate": 0.73
        }"#;
        let overview: Overview = serde_json::from_str(json).unwrap();
        assert_eq!(overview.total_users, 42);
        assert_eq!(overview.total_reservations, 310);
        assert!((overview.occupancy_rate - 0.73).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revenue_point_serialization_round_trip() {
        let point = RevenuePoint {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            amount: 4200.0,
            reservation_count: 7,
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(json.contains("\"date\":\"2025-06-01\""));
        let back: RevenuePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
