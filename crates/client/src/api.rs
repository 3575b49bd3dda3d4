//! HTTP client for the admin REST backend.
//!
//! [`DashboardApi`] is the seam between the polling store and the network: the
//! store only sees the typed sub-responses, so tests can swap in a scripted
//! implementation. [`HttpDashboardApi`] is the reqwest-backed implementation
//! hitting the real endpoints with bearer auth.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use domain::envelope::{decode_body, decode_list};
use domain::models::{
    ActivityEvent, Alert, CabinOccupancy, LoginRequest, LoginResponse, Overview,
    ReservationSummary, RevenuePeriod, RevenuePoint, SystemHealth, Trends,
};

use crate::auth::TokenStore;
use crate::config::ApiConfig;
use crate::error::ClientError;

// Endpoint paths, also used as cache keys by the store.
pub const EP_OVERVIEW: &str = "/admin/dashboard";
pub const EP_REVENUE: &str = "/admin/dashboard/revenue";
pub const EP_OCCUPANCY: &str = "/admin/dashboard/occupancy";
pub const EP_TRENDS: &str = "/admin/dashboard/trends";
pub const EP_SYSTEM_METRICS: &str = "/admin/system/metrics";
pub const EP_RECENT_ACTIVITY: &str = "/admin/activity/recent";
pub const EP_UPCOMING_RESERVATIONS: &str = "/admin/reservations/upcoming";
pub const EP_ALERTS: &str = "/admin/alerts";

const EP_LOGIN: &str = "/auth/login";

/// The fan-out sub-requests behind one aggregate dashboard load.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn overview(&self) -> Result<Overview, ClientError>;
    async fn revenue(&self, period: RevenuePeriod) -> Result<Vec<RevenuePoint>, ClientError>;
    async fn occupancy(&self) -> Result<Vec<CabinOccupancy>, ClientError>;
    async fn trends(&self) -> Result<Trends, ClientError>;
    async fn system_metrics(&self) -> Result<SystemHealth, ClientError>;
    async fn recent_activity(&self) -> Result<Vec<ActivityEvent>, ClientError>;
    async fn upcoming_reservations(&self) -> Result<Vec<ReservationSummary>, ClientError>;
    async fn alerts(&self) -> Result<Vec<Alert>, ClientError>;
}

/// Reqwest-backed [`DashboardApi`] implementation.
pub struct HttpDashboardApi {
    base_url: String,
    activity_limit: u32,
    client: Client,
    tokens: Arc<dyn TokenStore>,
}

impl HttpDashboardApi {
    /// Create a client against the configured backend.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            activity_limit: config.activity_limit,
            client,
            tokens,
        })
    }

    /// `POST /auth/login`; persists the returned token on success.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, EP_LOGIN))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(EP_LOGIN, status.as_u16()));
        }

        let bytes = response.bytes().await?;
        let login: LoginResponse = decode_body(&bytes)?;
        self.tokens.save(&login.token)?;

        info!(username = %login.user.username, "Logged in, bearer token stored");
        Ok(login)
    }

    /// Authenticated GET returning the raw body for envelope decoding.
    async fn get_bytes(
        &self,
        endpoint: &'static str,
        query: Option<String>,
    ) -> Result<Vec<u8>, ClientError> {
        let token = self.tokens.load()?.ok_or(ClientError::Auth)?;

        let mut url = format!("{}{}", self.base_url, endpoint);
        if let Some(query) = query {
            url.push('?');
            url.push_str(&query);
        }

        debug!(endpoint = endpoint, "Fetching");
        let response = self.client.get(url).bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status(endpoint, status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait::async_trait]
impl DashboardApi for HttpDashboardApi {
    async fn overview(&self) -> Result<Overview, ClientError> {
        let bytes = self.get_bytes(EP_OVERVIEW, None).await?;
        Ok(decode_body(&bytes)?)
    }

    async fn revenue(&self, period: RevenuePeriod) -> Result<Vec<RevenuePoint>, ClientError> {
        let query = format!("period={}", period.as_query_value());
        let bytes = self.get_bytes(EP_REVENUE, Some(query)).await?;
        Ok(decode_list(&bytes)?)
    }

    async fn occupancy(&self) -> Result<Vec<CabinOccupancy>, ClientError> {
        let bytes = self.get_bytes(EP_OCCUPANCY, None).await?;
        Ok(decode_list(&bytes)?)
    }

    async fn trends(&self) -> Result<Trends, ClientError> {
        let bytes = self.get_bytes(EP_TRENDS, None).await?;
        Ok(decode_body(&bytes)?)
    }

    async fn system_metrics(&self) -> Result<SystemHealth, ClientError> {
        let bytes = self.get_bytes(EP_SYSTEM_METRICS, None).await?;
        Ok(decode_body(&bytes)?)
    }

    async fn recent_activity(&self) -> Result<Vec<ActivityEvent>, ClientError> {
        let query = format!("limit={}", self.activity_limit);
        let bytes = self.get_bytes(EP_RECENT_ACTIVITY, Some(query)).await?;
        Ok(decode_list(&bytes)?)
    }

    async fn upcoming_reservations(&self) -> Result<Vec<ReservationSummary>, ClientError> {
        let bytes = self.get_bytes(EP_UPCOMING_RESERVATIONS, None).await?;
        Ok(decode_list(&bytes)?)
    }

    async fn alerts(&self) -> Result<Vec<Alert>, ClientError> {
        let bytes = self.get_bytes(EP_ALERTS, None).await?;
        Ok(decode_list(&bytes)?)
    }
}
