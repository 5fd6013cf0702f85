use crate::metrics::Metrics;
use crate::models::SlideDescriptor;
use crate::state::StateManager;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Errors that can occur while setting up the slide rotator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotatorError {
    #[error("Slide rotator needs at least one slide")]
    NoSlides,

    #[error("Rotation interval must be greater than zero")]
    ZeroInterval,

    #[error("Rotation timer is already running")]
    AlreadyRunning,
}

/// Cycles the hero through an ordered, immutable list of slides.
///
/// The rotator is the only writer of `HeroState::current_slide`. Manual
/// navigation ([`advance`](Self::advance), [`retreat`](Self::retreat),
/// [`jump_to`](Self::jump_to)) and the autonomous timer started with
/// [`start`](Self::start) all funnel through the state manager, so every
/// position change reaches subscribers as a `SlideChanged` event.
///
/// Cloning is cheap; clones share the slide list, state and timer flag.
#[derive(Clone)]
pub struct SlideRotator {
    slides: Arc<[SlideDescriptor]>,
    state: StateManager,
    metrics: Arc<Metrics>,
    timer_running: Arc<AtomicBool>,
}

impl SlideRotator {
    /// Create a rotator positioned on the first slide.
    ///
    /// Resets the slider fields of `state` to index 0 of `slides.len()`.
    pub fn new(
        slides: Vec<SlideDescriptor>,
        state: StateManager,
        metrics: Arc<Metrics>,
    ) -> Result<Self, RotatorError> {
        if slides.is_empty() {
            return Err(RotatorError::NoSlides);
        }

        let slide_count = slides.len();
        state.update(|s| {
            s.slide_count = slide_count;
            s.current_slide = 0;
        });

        tracing::debug!("Slide rotator created with {} slides", slide_count);

        Ok(Self {
            slides: slides.into(),
            state,
            metrics,
            timer_running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false; a rotator cannot be built without slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.state.read(|s| s.current_slide)
    }

    /// The slide considered current right now.
    pub fn current_slide(&self) -> &SlideDescriptor {
        &self.slides[self.current_index() % self.slides.len()]
    }

    /// Move to the next slide, wrapping to the first. Returns the new index.
    pub fn advance(&self) -> usize {
        let n = self.slides.len();
        let index = self.set_index(|current| (current + 1) % n);
        self.metrics.record_slide_advanced();
        index
    }

    /// Move to the previous slide, wrapping to the last. Returns the new index.
    pub fn retreat(&self) -> usize {
        let n = self.slides.len();
        self.set_index(|current| (current + n - 1) % n)
    }

    /// Show slide `index` directly.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid slide index. Callers taking user input
    /// must range-check first.
    pub fn jump_to(&self, index: usize) -> usize {
        assert!(
            index < self.slides.len(),
            "slide index {} out of range for {} slides",
            index,
            self.slides.len()
        );
        self.set_index(|_| index)
    }

    fn set_index<F>(&self, next: F) -> usize
    where
        F: FnOnce(usize) -> usize,
    {
        let mut index = 0;
        self.state.update(|s| {
            s.current_slide = next(s.current_slide);
            index = s.current_slide;
        });
        tracing::trace!("Slide index now {}", index);
        index
    }

    /// Start the autonomous rotation timer.
    ///
    /// Every `period` the rotator advances by one slide. The first tick fires
    /// one full period after starting. The timer lives exactly as long as the
    /// returned [`RotationGuard`]; cancelling or dropping the guard stops it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, period: Duration) -> Result<RotationGuard, RotatorError> {
        if period.is_zero() {
            return Err(RotatorError::ZeroInterval);
        }

        if self.timer_running.swap(true, Ordering::AcqRel) {
            tracing::warn!("Ignoring request to start a second rotation timer");
            return Err(RotatorError::AlreadyRunning);
        }

        let live = Arc::new(Mutex::new(true));
        let task_live = Arc::clone(&live);
        let rotator = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // The liveness check and the advance happen under one lock so a
                // cancel that has returned can never be followed by a tick.
                let still_live = {
                    let live = task_live.lock().unwrap_or_else(PoisonError::into_inner);
                    if *live {
                        rotator.advance();
                    }
                    *live
                };

                if !still_live {
                    break;
                }
            }

            tracing::debug!("Rotation timer task exited");
        });

        tracing::info!("Rotation timer started ({} ms period)", period.as_millis());

        Ok(RotationGuard {
            live,
            running: Arc::clone(&self.timer_running),
            task: Some(task),
        })
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running.load(Ordering::Acquire)
    }
}

/// Scope of a running rotation timer.
///
/// Holding the guard keeps the slider auto-advancing; [`cancel`](Self::cancel)
/// or dropping it stops the timer exactly once. After either returns, no
/// further tick will touch the state.
pub struct RotationGuard {
    live: Arc<Mutex<bool>>,
    running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl RotationGuard {
    /// Stop the timer.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        // Waits for an in-progress tick to finish before flipping the flag
        *self.live.lock().unwrap_or_else(PoisonError::into_inner) = false;
        task.abort();
        self.running.store(false, Ordering::Release);

        tracing::info!("Rotation timer cancelled");
    }
}

impl Drop for RotationGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_slides;

    fn rotator() -> SlideRotator {
        SlideRotator::new(
            default_slides(),
            StateManager::new(),
            Arc::new(Metrics::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_requires_slides() {
        let result = SlideRotator::new(Vec::new(), StateManager::new(), Arc::new(Metrics::new()));
        assert!(matches!(result, Err(RotatorError::NoSlides)));
    }

    #[test]
    fn test_new_sets_slide_count() {
        let rotator = rotator();
        assert_eq!(rotator.len(), 3);
        assert_eq!(rotator.state.read(|s| s.slide_count), 3);
        assert_eq!(rotator.current_index(), 0);
    }

    #[test]
    fn test_advance_wraps() {
        let rotator = rotator();
        assert_eq!(rotator.advance(), 1);
        assert_eq!(rotator.advance(), 2);
        assert_eq!(rotator.advance(), 0);
    }

    #[test]
    fn test_retreat_wraps() {
        let rotator = rotator();
        assert_eq!(rotator.retreat(), 2);
        assert_eq!(rotator.retreat(), 1);
    }

    #[test]
    fn test_jump_to() {
        let rotator = rotator();
        assert_eq!(rotator.jump_to(2), 2);
        assert_eq!(rotator.current_slide().title, "Advanced X-Ray Services");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_jump_to_out_of_range_panics() {
        rotator().jump_to(3);
    }

    #[test]
    fn test_advance_records_metric() {
        let metrics = Arc::new(Metrics::new());
        let rotator =
            SlideRotator::new(default_slides(), StateManager::new(), Arc::clone(&metrics)).unwrap();

        rotator.advance();
        rotator.retreat();

        assert_eq!(metrics.slides_advanced.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_start_rejects_zero_interval() {
        let result = rotator().start(Duration::ZERO);
        assert!(matches!(result, Err(RotatorError::ZeroInterval)));
    }

    #[tokio::test]
    async fn test_start_only_once_per_scope() {
        let rotator = rotator();

        let guard = rotator.start(Duration::from_secs(5)).unwrap();
        assert!(rotator.is_timer_running());
        assert!(matches!(
            rotator.start(Duration::from_secs(5)),
            Err(RotatorError::AlreadyRunning)
        ));

        guard.cancel();
        assert!(!rotator.is_timer_running());

        // A new scope can start after the previous one ended
        let guard = rotator.start(Duration::from_secs(5)).unwrap();
        drop(guard);
        assert!(!rotator.is_timer_running());
    }
}
