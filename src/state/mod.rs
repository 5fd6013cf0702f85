// State management module
//
// This module provides the StateManager which wraps HeroState with thread-safe access
// using Arc<RwLock<T>> and emits change events so the view can redraw.

use crate::models::{BookingField, BookingForm, FormError, HeroState, Notification, NotificationKind};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// The render layer subscribes to these instead of polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The visible hero slide changed
    SlideChanged { index: usize, total: usize },

    /// One or more booking form fields were edited
    FormChanged,

    /// The booking form went back to its default values
    FormReset,

    /// A booking request was issued and is in flight
    SubmissionStarted,

    /// The in-flight booking request completed (either way)
    SubmissionFinished,

    /// A result notification became visible (replacing any previous one)
    NotificationShown {
        kind: NotificationKind,
        message: String,
    },

    /// The live notification was dismissed
    NotificationDismissed,

    /// In-page navigation focused a section
    SectionFocused { anchor: String },
}

/// Thread-safe state manager with event emission
///
/// This is the central state component that:
/// - Provides thread-safe access to [`HeroState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Usage
///
/// - [`read()`](Self::read) for reading a few fields under the lock
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
///
/// # Related Types
///
/// - [`crate::services::SlideRotator`]: Writes the slider position
/// - [`crate::services::BookingController`]: Writes form, notification and in-flight flag
/// - [`crate::ui::ConsoleController`]: Primary consumer of state events
pub struct StateManager {
    /// The hero state protected by RwLock for thread-safe access
    state: Arc<RwLock<HeroState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        Self::with_state(HeroState::default())
    }

    /// Create a StateManager starting from the given state
    pub fn with_state(initial: HeroState) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(initial)),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> HeroState {
        self.read(|state| state.clone())
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let index = state_manager.read(|state| state.current_slide);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HeroState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut HeroState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = Self::detect_changes(&old_state, &state);

        for change in &changes {
            // Nobody listening is fine
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(old: &HeroState, new: &HeroState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.current_slide != new.current_slide || old.slide_count != new.slide_count {
            changes.push(StateChange::SlideChanged {
                index: new.current_slide,
                total: new.slide_count,
            });
        }

        if old.form != new.form {
            if new.form == BookingForm::default() {
                changes.push(StateChange::FormReset);
            } else {
                changes.push(StateChange::FormChanged);
            }
        }

        if old.is_submitting != new.is_submitting {
            if new.is_submitting {
                changes.push(StateChange::SubmissionStarted);
            } else {
                changes.push(StateChange::SubmissionFinished);
            }
        }

        if old.notification != new.notification {
            match &new.notification {
                Some(notification) => changes.push(StateChange::NotificationShown {
                    kind: notification.kind,
                    message: notification.message.clone(),
                }),
                None => changes.push(StateChange::NotificationDismissed),
            }
        }

        if old.focused_section != new.focused_section {
            if let Some(anchor) = &new.focused_section {
                changes.push(StateChange::SectionFocused {
                    anchor: anchor.clone(),
                });
            }
        }

        changes
    }

    // Convenience methods for common state updates

    /// Update a single booking form field
    ///
    /// An unparseable service value is rejected and nothing is emitted.
    pub fn set_form_field(
        &self,
        field: BookingField,
        value: impl Into<String>,
    ) -> Result<Vec<StateChange>, FormError> {
        let value = value.into();
        let mut result = Ok(());
        let changes = self.update(|state| {
            result = state.form.set(field, value);
        });
        result.map(|()| changes)
    }

    /// Reset the booking form to its defaults
    pub fn reset_form(&self) -> Vec<StateChange> {
        self.update(|state| state.reset_form())
    }

    /// Atomically claim the in-flight flag
    ///
    /// Returns a copy of the form to submit, or `None` when another
    /// submission is already in flight.
    pub fn try_begin_submission(&self) -> Option<BookingForm> {
        let mut claimed = None;
        self.update(|state| {
            if !state.is_submitting {
                state.is_submitting = true;
                claimed = Some(state.form.clone());
            }
        });
        claimed
    }

    /// Clear the in-flight flag, publish the outcome and optionally reset the form
    pub fn finish_submission(&self, notification: Notification, reset_form: bool) -> Vec<StateChange> {
        self.update(|state| {
            state.is_submitting = false;
            state.notification = Some(notification);
            if reset_form {
                state.reset_form();
            }
        })
    }

    /// Clear the in-flight flag of a submission that never resolved
    ///
    /// Form and notification are left as they are.
    pub fn abandon_submission(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.is_submitting = false;
        })
    }

    /// Show a notification, replacing the live one
    pub fn show_notification(&self, notification: Notification) -> Vec<StateChange> {
        self.update(|state| {
            state.notification = Some(notification);
        })
    }

    /// Dismiss the live notification
    pub fn dismiss_notification(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.notification = None;
        })
    }

    /// Record the section that in-page navigation scrolled to
    pub fn focus_section(&self, anchor: impl Into<String>) -> Vec<StateChange> {
        let anchor = anchor.into();
        self.update(|state| {
            state.focused_section = Some(anchor);
        })
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceKind;

    #[test]
    fn test_new_state_manager() {
        let manager = StateManager::new();
        let state = manager.snapshot();

        assert_eq!(state.current_slide, 0);
        assert!(!state.is_submitting);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_slide_change_detection() {
        let manager = StateManager::with_state(HeroState::with_slide_count(3));

        let changes = manager.update(|state| state.current_slide = 2);

        assert_eq!(changes, vec![StateChange::SlideChanged { index: 2, total: 3 }]);
    }

    #[test]
    fn test_no_change_emits_nothing() {
        let manager = StateManager::new();
        let changes = manager.update(|_| {});
        assert!(changes.is_empty());
    }

    #[test]
    fn test_set_form_field() {
        let manager = StateManager::new();

        let changes = manager.set_form_field(BookingField::Name, "Asha").unwrap();

        assert_eq!(changes, vec![StateChange::FormChanged]);
        assert_eq!(manager.read(|s| s.form.name.clone()), "Asha");
    }

    #[test]
    fn test_set_form_field_rejects_unknown_service() {
        let manager = StateManager::new();
        let mut rx = manager.subscribe();

        let result = manager.set_form_field(BookingField::Service, "dentist");

        assert!(matches!(result, Err(FormError::UnknownService(_))));
        assert_eq!(
            manager.read(|s| s.form.service),
            ServiceKind::DoctorConsultation
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_reset_form_event() {
        let manager = StateManager::new();
        manager.set_form_field(BookingField::Phone, "12345").unwrap();

        let changes = manager.reset_form();

        assert_eq!(changes, vec![StateChange::FormReset]);
    }

    #[test]
    fn test_try_begin_submission_is_exclusive() {
        let manager = StateManager::new();

        let first = manager.try_begin_submission();
        let second = manager.try_begin_submission();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(manager.read(|s| s.is_submitting));
    }

    #[test]
    fn test_finish_submission_with_reset() {
        let manager = StateManager::new();
        manager.set_form_field(BookingField::Name, "Asha").unwrap();
        manager.try_begin_submission();

        let changes = manager.finish_submission(Notification::success("ok"), true);

        assert!(changes.contains(&StateChange::FormReset));
        assert!(changes.contains(&StateChange::SubmissionFinished));
        assert!(changes.iter().any(|c| matches!(
            c,
            StateChange::NotificationShown { kind: NotificationKind::Success, .. }
        )));

        let state = manager.snapshot();
        assert!(!state.is_submitting);
        assert_eq!(state.form, BookingForm::default());
    }

    #[test]
    fn test_abandon_submission_only_clears_flag() {
        let manager = StateManager::new();
        manager.set_form_field(BookingField::Name, "Asha Rao").unwrap();
        manager.try_begin_submission().unwrap();

        let changes = manager.abandon_submission();

        assert_eq!(changes, vec![StateChange::SubmissionFinished]);
        let state = manager.snapshot();
        assert!(!state.is_submitting);
        assert_eq!(state.form.name, "Asha Rao");
        assert!(state.notification.is_none());
        assert!(manager.try_begin_submission().is_some());
    }

    #[test]
    fn test_notification_replace_and_dismiss() {
        let manager = StateManager::new();
        manager.show_notification(Notification::error("first"));
        manager.show_notification(Notification::error("second"));

        assert_eq!(
            manager.read(|s| s.notification.clone()),
            Some(Notification::error("second"))
        );

        let changes = manager.dismiss_notification();
        assert_eq!(changes, vec![StateChange::NotificationDismissed]);
        assert!(manager.read(|s| s.notification.is_none()));

        // Dismissing again is a no-op
        assert!(manager.dismiss_notification().is_empty());
    }

    #[test]
    fn test_focus_section() {
        let manager = StateManager::new();
        let changes = manager.focus_section("doctors-list");
        assert_eq!(
            changes,
            vec![StateChange::SectionFocused { anchor: "doctors-list".to_string() }]
        );
    }

    #[test]
    fn test_subscribe_to_changes() {
        let manager = StateManager::with_state(HeroState::with_slide_count(3));
        let mut rx = manager.subscribe();

        manager.update(|state| state.current_slide = 1);

        let event = rx.try_recv();
        assert!(matches!(event, Ok(StateChange::SlideChanged { index: 1, .. })));
    }

    #[test]
    fn test_clone_state_manager() {
        let manager1 = StateManager::new();
        let manager2 = manager1.clone();

        manager1.update(|state| state.is_submitting = true);

        assert!(manager2.snapshot().is_submitting);
    }
}
