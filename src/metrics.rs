// Session metrics
//
// Lightweight counters for menu activity and search executions, logged on exit

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters for one application run
///
/// Atomic so the controller can record through a shared reference.
#[derive(Debug)]
pub struct Metrics {
    /// Group classification steps applied
    pub toggles: AtomicUsize,

    /// Explicit resets requested from the menu
    pub resets: AtomicUsize,

    /// Searches that completed (with or without matches)
    pub searches: AtomicUsize,

    /// Searches that failed (tool missing, timeout, tool error)
    pub failed_searches: AtomicUsize,

    /// Matching lines reported across all searches
    pub matches: AtomicUsize,

    /// Total search time in milliseconds
    pub total_search_time_ms: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            toggles: AtomicUsize::new(0),
            resets: AtomicUsize::new(0),
            searches: AtomicUsize::new(0),
            failed_searches: AtomicUsize::new(0),
            matches: AtomicUsize::new(0),
            total_search_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_toggle(&self) {
        self.toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed search with its match count and duration
    pub fn record_search(&self, matches: usize, duration: Duration) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.matches.fetch_add(matches, Ordering::Relaxed);
        self.total_search_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_failed_search(&self) {
        self.failed_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average search time in milliseconds, 0.0 when nothing was searched
    pub fn avg_search_time_ms(&self) -> f64 {
        let searches = self.searches.load(Ordering::Relaxed);
        if searches > 0 {
            self.total_search_time_ms.load(Ordering::Relaxed) as f64 / searches as f64
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Menu: {} toggles, {} resets",
            self.toggles.load(Ordering::Relaxed),
            self.resets.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Searches: {} completed, {} failed, {} matches (avg: {:.2}ms)",
            self.searches.load(Ordering::Relaxed),
            self.failed_searches.load(Ordering::Relaxed),
            self.matches.load(Ordering::Relaxed),
            self.avg_search_time_ms()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
