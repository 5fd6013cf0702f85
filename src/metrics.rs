// Metrics module
//
// Lightweight counters for the hero: slider activity and booking outcomes

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Hero metrics
///
/// Uses atomic operations for thread-safe tracking without locks. The host
/// logs a summary on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Slides advanced (timer ticks and manual "next")
    pub slides_advanced: AtomicU64,

    /// Booking requests the endpoint accepted
    pub submissions_accepted: AtomicU64,

    /// Booking requests the endpoint rejected with a non-success status
    pub submissions_rejected: AtomicU64,

    /// Booking requests that never completed
    pub transport_failures: AtomicU64,

    /// Submit attempts refused before a request was issued
    pub submissions_blocked: AtomicU64,

    /// Total time spent waiting on booking requests in milliseconds
    pub total_request_time_ms: AtomicU64,

    /// Chat links opened from the specialty grid
    pub links_opened: AtomicU64,

    /// In-page navigations performed
    pub navigations: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            slides_advanced: AtomicU64::new(0),
            submissions_accepted: AtomicU64::new(0),
            submissions_rejected: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
            submissions_blocked: AtomicU64::new(0),
            total_request_time_ms: AtomicU64::new(0),
            links_opened: AtomicU64::new(0),
            navigations: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_slide_advanced(&self) {
        self.slides_advanced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_accepted(&self) {
        self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transport_failure(&self) {
        self.transport_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_blocked(&self) {
        self.submissions_blocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how long one booking request took
    pub fn record_request_time(&self, duration: Duration) {
        self.total_request_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_link_opened(&self) {
        self.links_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_navigation(&self) {
        self.navigations.fetch_add(1, Ordering::Relaxed);
    }

    /// Requests that reached the endpoint or failed trying
    pub fn requests_issued(&self) -> u64 {
        self.submissions_accepted.load(Ordering::Relaxed)
            + self.submissions_rejected.load(Ordering::Relaxed)
            + self.transport_failures.load(Ordering::Relaxed)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average booking request latency in milliseconds
    pub fn avg_request_time_ms(&self) -> f64 {
        let total = self.total_request_time_ms.load(Ordering::Relaxed);
        let count = self.requests_issued();
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Hero Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Slides advanced: {}",
            self.slides_advanced.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Bookings: {} accepted, {} rejected, {} transport failures, {} blocked (avg: {:.2}ms per request)",
            self.submissions_accepted.load(Ordering::Relaxed),
            self.submissions_rejected.load(Ordering::Relaxed),
            self.transport_failures.load(Ordering::Relaxed),
            self.submissions_blocked.load(Ordering::Relaxed),
            self.avg_request_time_ms()
        );
        tracing::info!(
            "Chat links opened: {}, navigations: {}",
            self.links_opened.load(Ordering::Relaxed),
            self.navigations.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
