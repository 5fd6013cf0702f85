use crate::models::booking::BookingForm;
use crate::models::notification::Notification;

/// Rotation period used when the configuration does not override it.
pub const DEFAULT_ROTATION_INTERVAL_MS: u64 = 5000;

/// Single source of truth for the homepage hero.
///
/// Holds the slider position, the quick-booking form, the live notification
/// and the in-flight flag of the booking request.
///
/// # Thread Safety
///
/// `HeroState` is wrapped in `Arc<RwLock<HeroState>>` by
/// [`crate::state::StateManager`]. Never mutate it directly; go through
/// [`update()`](crate::state::StateManager::update) so subscribers see a
/// [`StateChange`](crate::state::StateChange) for every mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroState {
    // Slider
    pub current_slide: usize,
    pub slide_count: usize,

    // Quick booking
    pub form: BookingForm,
    pub is_submitting: bool,

    // Result notifier
    pub notification: Option<Notification>,

    // Last in-page navigation target
    pub focused_section: Option<String>,
}

impl Default for HeroState {
    fn default() -> Self {
        Self {
            current_slide: 0,
            slide_count: 0,
            form: BookingForm::default(),
            is_submitting: false,
            notification: None,
            focused_section: None,
        }
    }
}

impl HeroState {
    /// Fresh state for a slider with `slide_count` slides.
    pub fn with_slide_count(slide_count: usize) -> Self {
        Self {
            slide_count,
            ..Self::default()
        }
    }

    /// Restore the form to its defaults (service back to doctor consultation).
    pub fn reset_form(&mut self) {
        self.form = BookingForm::default();
    }

    /// 1-based position for display, e.g. "2/3".
    pub fn slide_position(&self) -> String {
        format!("{}/{}", self.current_slide + 1, self.slide_count)
    }
}
