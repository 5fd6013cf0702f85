use crate::models::app_state::DEFAULT_ROTATION_INTERVAL_MS;
use crate::models::booking::QUICK_BOOKING_NOTE;
use crate::models::slide::{SlideDescriptor, default_slides};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hero configuration from `Hero Config.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeroConfig {
    #[serde(rename = "Booking", default)]
    pub booking: BookingSettings,

    #[serde(rename = "Slider", default)]
    pub slider: SliderSettings,

    #[serde(rename = "Messaging", default)]
    pub messaging: MessagingSettings,

    #[serde(rename = "Navigation", default)]
    pub navigation: NavigationSettings,

    #[serde(rename = "Logging", default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,

    #[serde(default = "default_notes")]
    pub notes: String,

    /// Client-side timeout; `None` leaves the transport default in place.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            notes: default_notes(),
            request_timeout_secs: None,
        }
    }
}

impl BookingSettings {
    /// Full URL of the booking endpoint.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_slides")]
    pub slides: Vec<SlideDescriptor>,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            slides: default_slides(),
        }
    }
}

impl SliderSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagingSettings {
    #[serde(default = "default_number")]
    pub number: String,

    /// Specialty name → prefilled chat message, in display order.
    #[serde(default = "default_specialties")]
    pub specialties: IndexMap<String, String>,
}

impl Default for MessagingSettings {
    fn default() -> Self {
        Self {
            number: default_number(),
            specialties: default_specialties(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationSettings {
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            sections: default_sections(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default)]
    pub console_output: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            debug_mode: false,
            console_output: false,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_endpoint_path() -> String {
    "/api/booking".to_string()
}

fn default_notes() -> String {
    QUICK_BOOKING_NOTE.to_string()
}

fn default_interval_ms() -> u64 {
    DEFAULT_ROTATION_INTERVAL_MS
}

fn default_number() -> String {
    "919693245941".to_string()
}

fn default_sections() -> Vec<String> {
    vec!["doctors-list".to_string()]
}

fn default_log_dir() -> String {
    "logs".to_string()
}

/// Specialties of the "Consult Doctor by Specialty" grid.
pub fn default_specialties() -> IndexMap<String, String> {
    let entries = [
        (
            "General Physician",
            "Hello, I would like to consult with a General Physician. Please help me book an appointment.",
        ),
        (
            "Gynaecology",
            "Hello, I need a gynecology consultation. Could you please help me schedule an appointment?",
        ),
        (
            "Dermatology",
            "Hello, I would like to book a dermatology consultation for skin concerns. Please advise on availability.",
        ),
        (
            "Diabetology",
            "Hello, I need a diabetology consultation for diabetes management. Please help me book an appointment.",
        ),
        (
            "Gastroenterology",
            "Hello, I have digestive health concerns and would like to consult a gastroenterologist. Please help me schedule an appointment.",
        ),
        (
            "Cardiology",
            "Hello, I would like to book a cardiology consultation for heart-related concerns. Please let me know available slots.",
        ),
        (
            "Sexology",
            "Hello, I would like to consult with a sexologist. Please help me book a confidential appointment.",
        ),
        (
            "Psychiatry",
            "Hello, I need a psychiatric consultation for mental health concerns. Please help me schedule an appointment.",
        ),
        (
            "ENT",
            "Hello, I have ENT (Ear, Nose, Throat) concerns and would like to book a consultation. Please advise on availability.",
        ),
        (
            "Endocrinology",
            "Hello, I would like to book an endocrinology consultation for hormone-related concerns. Please help me schedule an appointment.",
        ),
    ];

    entries
        .into_iter()
        .map(|(name, message)| (name.to_string(), message.to_string()))
        .collect()
}
