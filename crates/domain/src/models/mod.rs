//! Domain models.

pub mod activity;
pub mod auth;
pub mod metrics;
pub mod reservation;

pub use activity::{ActivityEvent, Alert, AlertSeverity};
pub use auth::{AdminUser, LoginRequest, LoginResponse};
pub use metrics::{
    CabinOccupancy, MetricsBundle, Overview, RevenuePeriod, RevenuePoint, SystemHealth, Trends,
};
pub use reservation::{ReservationStatus, ReservationSummary};
