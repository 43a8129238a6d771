//! Loading spinner shown while forecasts are in flight.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

/// Count of fetches in flight plus a decorative frame loop.
///
/// Visible while at least one fetch is in flight. The loop is not cancelled
/// from outside: it checks the count each frame and exits on its own once it
/// drops to zero.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    in_flight: Arc<AtomicUsize>,
    generation: Arc<AtomicU64>,
    frames: Arc<AtomicU64>,
    interval: Duration,
}

/// Keeps the indicator visible until dropped.
#[must_use = "the indicator hides as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

impl LoadingIndicator {
    pub fn new(interval: Duration) -> Self {
        Self {
            in_flight: Arc::new(AtomicUsize::new(0)),
            generation: Arc::new(AtomicU64::new(0)),
            frames: Arc::new(AtomicU64::new(0)),
            interval,
        }
    }

    /// Mark one fetch as started; it ends when the guard drops.
    pub fn begin(&self) -> LoadingGuard {
        self.show();
        LoadingGuard {
            indicator: self.clone(),
        }
    }

    /// Mark one fetch as started. Must be called inside a tokio runtime.
    pub fn show(&self) {
        if self.in_flight.fetch_add(1, Ordering::AcqRel) > 0 {
            return;
        }
        // a loop from an earlier cycle that has not yet seen the count reach
        // zero must not keep running alongside this one
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let in_flight = self.in_flight.clone();
        let current = self.generation.clone();
        let frames = self.frames.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if in_flight.load(Ordering::Acquire) == 0
                    || current.load(Ordering::Acquire) != generation
                {
                    break;
                }
                frames.fetch_add(1, Ordering::Relaxed);
            }
            tracing::trace!("Loading spinner loop exited");
        });
    }

    /// Mark one fetch as finished. Hides the indicator when none remain.
    pub fn hide(&self) {
        let _ = self
            .in_flight
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Hide regardless of how many fetches are still in flight.
    pub fn reset(&self) {
        self.in_flight.store(0, Ordering::Release);
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Spinner frames drawn so far, across all show/hide cycles.
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    pub fn glyph(&self) -> char {
        SPINNER[(self.frames() % SPINNER.len() as u64) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_spinner_runs_while_visible() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        loading.show();
        assert!(loading.is_visible());

        tokio::time::sleep(Duration::from_millis(105)).await;
        assert!(loading.frames() >= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_stops_after_hide() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        loading.show();
        tokio::time::sleep(Duration::from_millis(50)).await;
        loading.hide();
        assert!(!loading.is_visible());

        // one more tick lets the loop observe the count
        tokio::time::sleep(Duration::from_millis(20)).await;
        let after_hide = loading.frames();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(loading.frames(), after_hide);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_reshow_runs_a_single_loop() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        loading.show();
        tokio::time::sleep(Duration::from_millis(15)).await;
        loading.hide();
        loading.show();

        tokio::time::sleep(Duration::from_millis(20)).await;
        let start = loading.frames();
        tokio::time::sleep(Duration::from_millis(100)).await;
        let drawn = loading.frames() - start;
        assert!(drawn <= 11, "two loops would draw ~20 frames, got {}", drawn);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stays_visible_until_last_fetch_ends() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        let first = loading.begin();
        let second = loading.begin();
        assert_eq!(loading.in_flight(), 2);

        drop(first);
        assert!(loading.is_visible());
        tokio::time::sleep(Duration::from_millis(30)).await;
        let running = loading.frames();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(loading.frames() > running, "spinner stopped with a fetch in flight");

        drop(second);
        assert!(!loading.is_visible());
    }

    #[test]
    fn test_extra_hide_does_not_underflow() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        loading.hide();
        assert_eq!(loading.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_reset_hides_with_fetches_in_flight() {
        let loading = LoadingIndicator::new(Duration::from_millis(10));
        let guard = loading.begin();
        loading.reset();
        assert!(!loading.is_visible());
        drop(guard);
        assert_eq!(loading.in_flight(), 0);
    }

    #[test]
    fn test_hidden_by_default() {
        let loading = LoadingIndicator::new(Duration::from_millis(80));
        assert!(!loading.is_visible());
        assert_eq!(loading.glyph(), '⠋');
    }
}
