//! Data models for the homepage hero.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`HeroState`]: The central state container (slider position, form, notification)
//! - [`SlideDescriptor`]: Immutable hero slide loaded at startup
//! - [`BookingForm`] / [`BookingPayload`]: Quick-booking field values and the JSON body built from them
//! - [`Notification`]: The single dismissible result message
//! - [`HeroConfig`]: Settings loaded from `Hero Config.yaml`
//!
//! # Architecture Note
//!
//! - **Serializable**: Config and wire structs derive `Serialize`/`Deserialize`
//! - **Cloneable**: HeroState is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager)
//! - **Immutable**: State updates go through StateManager's `update()` method to ensure consistency

pub mod app_state;
pub mod booking;
pub mod config;
pub mod notification;
pub mod slide;

pub use app_state::{DEFAULT_ROTATION_INTERVAL_MS, HeroState};
pub use booking::{
    BOOKING_FAILURE_MESSAGE, BOOKING_SUCCESS_MESSAGE, BookingErrorBody, BookingField, BookingForm,
    BookingPayload, FormError, QUICK_BOOKING_NOTE, ServiceKind,
};
pub use config::{
    BookingSettings, HeroConfig, LoggingSettings, MessagingSettings, NavigationSettings,
    SliderSettings,
};
pub use notification::{Notification, NotificationKind};
pub use slide::{SlideDescriptor, default_slides};
