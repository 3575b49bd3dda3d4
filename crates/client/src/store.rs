//! Polling data store for the admin dashboard.
//!
//! One [`PollingStore`] serves one dashboard session: it fans out to the admin
//! endpoints, merges the sub-responses into a [`MetricsBundle`], caches each
//! sub-response under its endpoint key, and republishes the merged snapshot
//! through a `watch` channel. `start()`/`stop()` bound the automatic refresh
//! timer; the UI layer calls them when the dashboard appears and goes away.
//!
//! Failure policy is fail-soft: a failed aggregate load never wipes data the
//! store already holds, and when there is nothing to hold it substitutes the
//! hardcoded sample bundle so a subscriber always has something to render.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use domain::models::{MetricsBundle, RevenuePeriod};

use crate::api::{
    DashboardApi, EP_ALERTS, EP_OCCUPANCY, EP_OVERVIEW, EP_RECENT_ACTIVITY, EP_REVENUE,
    EP_SYSTEM_METRICS, EP_TRENDS, EP_UPCOMING_RESERVATIONS,
};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::ClientError;

/// Where the store is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No load attempted yet.
    Idle,
    /// A foreground load is in flight.
    Loading,
    /// Last load succeeded.
    Ready,
    /// Last load failed; an earlier bundle is still exposed.
    ReadyWithError,
    /// Load failed with nothing to fall back on; sample data substituted.
    ErrorNoData,
}

/// The state a subscribed view reads.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub phase: Phase,
    pub bundle: Option<MetricsBundle>,
    pub error: Option<String>,
    pub loading: bool,
    /// Timestamp of the last successful merge. Strictly increasing.
    pub last_updated: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    fn initial() -> Self {
        Self {
            phase: Phase::Idle,
            bundle: None,
            error: None,
            loading: false,
            last_updated: None,
        }
    }
}

/// Tunables for one store instance.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub refresh_interval: Duration,
    pub cache_ttl: Duration,
    /// Timer refreshes skip the loading flag so a view does not flash a
    /// spinner on automatic refresh.
    pub background_refresh: bool,
    pub revenue_period: RevenuePeriod,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            cache_ttl: Duration::from_secs(30),
            background_refresh: true,
            revenue_period: RevenuePeriod::default(),
        }
    }
}

impl From<&Config> for StoreOptions {
    fn from(config: &Config) -> Self {
        Self {
            refresh_interval: Duration::from_secs(config.polling.refresh_interval_secs),
            cache_ttl: Duration::from_secs(config.polling.cache_ttl_secs),
            background_refresh: config.polling.background_refresh,
            revenue_period: RevenuePeriod::default(),
        }
    }
}

/// Polling data store. One instance per dashboard session.
pub struct PollingStore {
    api: Arc<dyn DashboardApi>,
    cache: Mutex<TtlCache>,
    refresh_interval: Duration,
    background_refresh: bool,
    revenue_period: RevenuePeriod,

    state_tx: watch::Sender<DashboardSnapshot>,
    /// Monotonic time of the last successful load, for staleness checks.
    last_fetch: Mutex<Option<Instant>>,

    /// Once set, no further state writes happen, even from in-flight loads.
    stopped: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl PollingStore {
    /// Create a store over the given API with its own cache.
    pub fn new(api: Arc<dyn DashboardApi>, options: StoreOptions) -> Arc<Self> {
        let (state_tx, _) = watch::channel(DashboardSnapshot::initial());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Arc::new(Self {
            api,
            cache: Mutex::new(TtlCache::new(options.cache_ttl)),
            refresh_interval: options.refresh_interval,
            background_refresh: options.background_refresh,
            revenue_period: options.revenue_period,
            state_tx,
            last_fetch: Mutex::new(None),
            stopped: AtomicBool::new(false),
            shutdown_tx,
            shutdown_rx,
            poller: Mutex::new(None),
        })
    }

    /// Subscribe to snapshot updates.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.state_tx.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Run one aggregate load and publish the outcome.
    ///
    /// Never returns an error: failures are folded into the published
    /// snapshot. With `show_loading` the loading flag is raised for the
    /// duration; timer ticks pass `false` so the view keeps rendering the
    /// current data while the refresh runs.
    pub async fn load(&self, show_loading: bool) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }

        debug!(show_loading = show_loading, "Dashboard load starting");

        if show_loading {
            self.write_state(|s| {
                s.loading = true;
                s.phase = Phase::Loading;
            });
        }

        let started = std::time::Instant::now();
        match self.fetch_bundle().await {
            Ok(bundle) => {
                if self.stopped.load(Ordering::SeqCst) {
                    // Resolved after stop(); discard the result.
                    return;
                }
                let merged_at = bundle.last_updated;
                *self.last_fetch.lock().expect("last_fetch lock poisoned") = Some(Instant::now());
                self.write_state(|s| {
                    s.bundle = Some(bundle);
                    s.error = None;
                    s.loading = false;
                    s.phase = Phase::Ready;
                    s.last_updated = Some(merged_at);
                });
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Dashboard load completed"
                );
            }
            Err(e) => {
                warn!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "Dashboard load failed"
                );
                let message = e.to_string();
                self.write_state(|s| {
                    s.loading = false;
                    s.error = Some(message);
                    if s.bundle.is_some() {
                        // Keep showing last-known-good data.
                        s.phase = Phase::ReadyWithError;
                    } else {
                        s.bundle = Some(MetricsBundle::fallback());
                        s.phase = Phase::ErrorNoData;
                    }
                });
            }
        }
    }

    /// Explicit user-triggered reload.
    pub async fn refresh(&self) {
        self.load(true).await;
    }

    /// Drop every cache entry, then reload.
    pub async fn clear_cache_and_reload(&self) {
        self.cache.lock().expect("cache lock poisoned").clear();
        info!("Cache cleared, reloading");
        self.load(true).await;
    }

    /// Number of cache entries still within their TTL window.
    pub fn valid_cache_entries(&self) -> usize {
        self.cache.lock().expect("cache lock poisoned").valid_len()
    }

    /// Age of the held data, or `None` before the first successful load.
    pub fn data_age(&self) -> Option<Duration> {
        self.last_fetch
            .lock()
            .expect("last_fetch lock poisoned")
            .map(|at| at.elapsed())
    }

    /// True when the held data is older than twice the refresh interval.
    /// False exactly on the boundary. A store that never loaded is stale.
    pub fn is_stale(&self) -> bool {
        match self.data_age() {
            Some(age) => age > self.refresh_interval * 2,
            None => true,
        }
    }

    /// Human-readable age of the held data.
    pub fn formatted_age(&self) -> String {
        match (self.data_age(), self.snapshot().last_updated) {
            (Some(age), Some(at)) => format_age(age, at),
            _ => "never".to_string(),
        }
    }

    /// Start the refresh timer. Idempotent while running.
    pub fn start(self: &Arc<Self>) {
        let mut slot = self.poller.lock().expect("poller lock poisoned");
        if slot.is_some() {
            warn!("Dashboard poller already running");
            return;
        }

        let store = Arc::clone(self);
        let mut shutdown_rx = self.shutdown_rx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(store.refresh_interval);
            // Skip the first immediate tick; the embedder drives the initial
            // load via refresh().
            interval.tick().await;

            info!(
                interval_secs = store.refresh_interval.as_secs(),
                "Dashboard poller started"
            );

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        // Awaiting the load here keeps ticks non-reentrant:
                        // the next tick cannot fire while one is running.
                        store.load(!store.background_refresh).await;
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            info!("Dashboard poller stopped");
                            break;
                        }
                    }
                }
            }
        });

        *slot = Some(handle);
    }

    /// Stop the timer and suppress all further state writes.
    ///
    /// In-flight requests are not aborted; whatever they resolve to is
    /// discarded. Safe to call more than once.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the poller task to wind down after [`stop`](Self::stop).
    pub async fn wait_for_shutdown(&self) {
        let handle = self.poller.lock().expect("poller lock poisoned").take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Dashboard poller task panicked: {}", e);
            }
        }
    }

    fn write_state(&self, f: impl FnOnce(&mut DashboardSnapshot)) {
        if self.stopped.load(Ordering::SeqCst) {
            return;
        }
        self.state_tx.send_modify(f);
    }

    /// Fan out to every endpoint concurrently and merge once all settle.
    ///
    /// Each field is assigned by request identity, so merge order does not
    /// depend on arrival order. Any sub-request failure fails the whole
    /// aggregate with that one error.
    async fn fetch_bundle(&self) -> Result<MetricsBundle, ClientError> {
        let (overview, revenue, occupancy, trends, health, activity, reservations, alerts) = tokio::join!(
            self.cached(EP_OVERVIEW, self.api.overview()),
            self.cached(EP_REVENUE, self.api.revenue(self.revenue_period)),
            self.cached(EP_OCCUPANCY, self.api.occupancy()),
            self.cached(EP_TRENDS, self.api.trends()),
            self.cached(EP_SYSTEM_METRICS, self.api.system_metrics()),
            self.cached(EP_RECENT_ACTIVITY, self.api.recent_activity()),
            self.cached(EP_UPCOMING_RESERVATIONS, self.api.upcoming_reservations()),
            self.cached(EP_ALERTS, self.api.alerts()),
        );

        Ok(MetricsBundle {
            overview: overview?,
            revenue_series: revenue?,
            occupancy_by_cabin: occupancy?,
            trends: trends?,
            system_health: health?,
            recent_activity: activity?,
            upcoming_reservations: reservations?,
            alerts: alerts?,
            last_updated: Utc::now(),
        })
    }

    /// Serve `key` from the cache when fresh, otherwise run `fetch` and cache
    /// the result. The cache lock is never held across the await.
    async fn cached<T, F>(&self, key: &'static str, fetch: F) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T, ClientError>>,
    {
        let hit = self.cache.lock().expect("cache lock poisoned").get(key);
        if let Some(value) = hit {
            if let Ok(decoded) = serde_json::from_value(value) {
                debug!(endpoint = key, "Cache hit");
                return Ok(decoded);
            }
        }

        let fresh = fetch.await?;
        if let Ok(value) = serde_json::to_value(&fresh) {
            self.cache
                .lock()
                .expect("cache lock poisoned")
                .insert(key, value);
        }
        Ok(fresh)
    }
}

/// Bucket an age into "just now" / minutes / hours / calendar date.
fn format_age(age: Duration, last_updated: DateTime<Utc>) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", minutes)
        }
    } else if secs < 86_400 {
        let hours = secs / 3600;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else {
        last_updated.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_age_just_now() {
        assert_eq!(format_age(Duration::from_secs(0), at()), "just now");
        assert_eq!(format_age(Duration::from_secs(59), at()), "just now");
    }

    #[test]
    fn test_format_age_minutes() {
        assert_eq!(format_age(Duration::from_secs(60), at()), "1 minute ago");
        assert_eq!(format_age(Duration::from_secs(150), at()), "2 minutes ago");
        assert_eq!(
            format_age(Duration::from_secs(3599), at()),
            "59 minutes ago"
        );
    }

    #[test]
    fn test_format_age_hours() {
        assert_eq!(format_age(Duration::from_secs(3600), at()), "1 hour ago");
        assert_eq!(format_age(Duration::from_secs(7300), at()), "2 hours ago");
    }

    #[test]
    fn test_format_age_calendar_date() {
        assert_eq!(format_age(Duration::from_secs(90_000), at()), "2025-06-01");
    }

    #[test]
    fn test_store_options_default() {
        let options = StoreOptions::default();
        assert_eq!(options.refresh_interval, Duration::from_secs(60));
        assert_eq!(options.cache_ttl, Duration::from_secs(30));
        assert!(options.background_refresh);
    }
}
