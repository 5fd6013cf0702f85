// Render model for the hero
//
// Pure functions from HeroState + slide list to what the view shows. The
// console host turns a HeroFrame into text; any other front-end can map the
// same fields onto its widgets.

use crate::models::{BookingField, HeroState, Notification, NotificationKind, ServiceKind, SlideDescriptor};
use std::fmt::Write;

/// Visual treatment of the result notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPanel {
    pub title: &'static str,
    pub message: String,
    pub icon: &'static str,
    pub accent: &'static str,
}

impl NotificationPanel {
    pub fn from_notification(notification: &Notification) -> Self {
        let (icon, accent) = match notification.kind {
            NotificationKind::Success => ("✔", "teal-600"),
            NotificationKind::Error => ("✖", "red-600"),
        };
        Self {
            title: notification.title(),
            message: notification.message.clone(),
            icon,
            accent,
        }
    }
}

/// Everything visible in the hero at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroFrame {
    pub slide_index: usize,
    pub image_ref: String,
    pub title: String,
    pub subtitle: String,
    /// One entry per slide; exactly one is `true`.
    pub indicators: Vec<bool>,
    /// (label, value) pairs in form order
    pub fields: Vec<(&'static str, String)>,
    pub submit_enabled: bool,
    pub notification: Option<NotificationPanel>,
}

impl HeroFrame {
    /// Build the frame for `state`.
    ///
    /// An out-of-range index (never produced by the rotator) is clamped into
    /// range so exactly one slide is always current.
    pub fn render(state: &HeroState, slides: &[SlideDescriptor]) -> Self {
        let slide_index = if slides.is_empty() {
            0
        } else {
            state.current_slide % slides.len()
        };
        let slide = slides.get(slide_index);

        let fields = BookingField::ALL
            .into_iter()
            .map(|field| {
                let value = match field {
                    BookingField::Service => state.form.service.label().to_string(),
                    other => state.form.get(other).to_string(),
                };
                (field.label(), value)
            })
            .collect();

        Self {
            slide_index,
            image_ref: slide.map(|s| s.image_ref.clone()).unwrap_or_default(),
            title: slide.map(|s| s.title.clone()).unwrap_or_default(),
            subtitle: slide.map(|s| s.subtitle.clone()).unwrap_or_default(),
            indicators: (0..slides.len()).map(|i| i == slide_index).collect(),
            fields,
            submit_enabled: !state.is_submitting,
            notification: state.notification.as_ref().map(NotificationPanel::from_notification),
        }
    }

    /// Plain-text rendering used by the console host.
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let dots: String = self
            .indicators
            .iter()
            .map(|active| if *active { '●' } else { '○' })
            .collect();

        let _ = writeln!(out, "┌─ {} ", self.title);
        let _ = writeln!(out, "│  {}", self.subtitle);
        let _ = writeln!(out, "│  [{}]  {}", self.image_ref, dots);
        let _ = writeln!(out, "├─ Quick Booking");
        for (label, value) in &self.fields {
            let shown = if value.is_empty() { "-" } else { value.as_str() };
            let _ = writeln!(out, "│  {:<14} {}", label, shown);
        }
        let button = if self.submit_enabled {
            "[ Book Appointment ]"
        } else {
            "[ Sending... ]"
        };
        let _ = writeln!(out, "│  {}", button);

        if let Some(panel) = &self.notification {
            let _ = writeln!(out, "├─ {} {} ({})", panel.icon, panel.title, panel.accent);
            let _ = writeln!(out, "│  {}", panel.message);
            let _ = writeln!(out, "│  [ Close ]");
        }
        out.push('└');
        out
    }
}

/// Service picker options as (value, label).
pub fn service_options() -> Vec<(&'static str, &'static str)> {
    ServiceKind::ALL
        .into_iter()
        .map(|kind| (kind.as_str(), kind.label()))
        .collect()
}
