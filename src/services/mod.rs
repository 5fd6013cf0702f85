//! Services module - framework-agnostic hero logic.
//!
//! Nothing in here knows how the hero is drawn; each service talks to the
//! [`StateManager`](crate::state::StateManager) and the view reacts to the
//! resulting [`StateChange`](crate::state::StateChange) events.
//!
//! # Components
//!
//! - [`SlideRotator`]: Slider position plus the scoped auto-advance timer ([`RotationGuard`])
//! - [`BookingController`]: Quick-booking form edits and the single-request submission flow
//! - [`BookingTransport`]: Seam for delivering the booking payload; [`HttpBookingTransport`] is the
//!   `reqwest` implementation
//! - [`InputValidator`]: Input-layer checks (required, email, tel, date, time) run before submit
//! - [`MessagingLinkBuilder`]: Prefilled `wa.me` chat links for the specialty grid
//! - [`SectionNavigator`]: In-page navigation to known anchors
//!
//! # Usage Example
//!
//! ```ignore
//! use doctoreverywhere::services::{BookingController, HttpBookingTransport};
//!
//! let transport = Arc::new(HttpBookingTransport::new(&config.booking)?);
//! let controller = BookingController::new(state, transport, &config.booking.notes, metrics);
//!
//! controller.set_field(BookingField::Name, "Asha Rao")?;
//! // ...
//! let notification = controller.submit().await?;
//! ```

pub mod booking;
pub mod messaging;
pub mod navigation;
pub mod rotator;
pub mod validation;

pub use booking::{
    BookingController, BookingError, BookingTransport, HttpBookingTransport, SubmitError,
};
pub use messaging::{LinkOpener, LogLinkOpener, MessagingError, MessagingLinkBuilder};
pub use navigation::{DOCTORS_LIST_ANCHOR, SectionNavigator};
pub use rotator::{RotationGuard, RotatorError, SlideRotator};
pub use validation::{InputIssue, InputValidator};
