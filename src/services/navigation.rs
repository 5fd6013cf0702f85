use crate::metrics::Metrics;
use crate::state::StateManager;
use std::sync::Arc;

/// Anchor of the full doctors list targeted by "View All Doctors".
pub const DOCTORS_LIST_ANCHOR: &str = "doctors-list";

/// In-page navigation between the page's known sections.
#[derive(Clone)]
pub struct SectionNavigator {
    sections: Vec<String>,
    state: StateManager,
    metrics: Arc<Metrics>,
}

impl SectionNavigator {
    pub fn new(sections: Vec<String>, state: StateManager, metrics: Arc<Metrics>) -> Self {
        Self {
            sections,
            state,
            metrics,
        }
    }

    /// Bring the section with `anchor` into view.
    ///
    /// Returns `false` and changes nothing when no such section exists.
    pub fn scroll_to(&self, anchor: &str) -> bool {
        if !self.sections.iter().any(|s| s == anchor) {
            tracing::debug!("No section with anchor '{}', ignoring", anchor);
            return false;
        }

        self.state.focus_section(anchor);
        self.metrics.record_navigation();
        true
    }

    pub fn view_all_doctors(&self) -> bool {
        self.scroll_to(DOCTORS_LIST_ANCHOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(state: &StateManager) -> SectionNavigator {
        SectionNavigator::new(
            vec![DOCTORS_LIST_ANCHOR.to_string()],
            state.clone(),
            Arc::new(Metrics::new()),
        )
    }

    #[test]
    fn test_scroll_to_known_section() {
        let state = StateManager::new();
        assert!(navigator(&state).view_all_doctors());
        assert_eq!(
            state.read(|s| s.focused_section.clone()),
            Some("doctors-list".to_string())
        );
    }

    #[test]
    fn test_scroll_to_missing_section_is_noop() {
        let state = StateManager::new();
        let mut rx = state.subscribe();

        assert!(!navigator(&state).scroll_to("pricing"));
        assert!(state.read(|s| s.focused_section.is_none()));
        assert!(rx.try_recv().is_err());
    }
}
