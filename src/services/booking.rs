use crate::metrics::Metrics;
use crate::models::{
    BOOKING_FAILURE_MESSAGE, BOOKING_SUCCESS_MESSAGE, BookingErrorBody, BookingField,
    BookingPayload, BookingSettings, FormError, Notification, ServiceKind,
};
use crate::state::StateManager;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Why a booking request did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The endpoint answered with a non-success status
    #[error("Booking rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never completed (connection refused, DNS, TLS, ...)
    #[error("Transport failure: {0}")]
    Transport(String),
}

impl BookingError {
    /// Text shown to the user for this failure.
    ///
    /// Rejections surface the server's message verbatim, falling back to a
    /// generic text; transport failures surface the error description.
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Rejected { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(BOOKING_FAILURE_MESSAGE)
                .to_string(),
            BookingError::Transport(description) => description.clone(),
        }
    }
}

/// Reasons `submit()` refused to issue a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A booking request is already in flight")]
    InFlight,

    #[error("Required fields missing: {0:?}")]
    MissingFields(Vec<BookingField>),
}

/// Delivers one booking payload to the booking endpoint.
///
/// Exactly one attempt per call; implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingTransport: Send + Sync {
    async fn send_booking(&self, payload: &BookingPayload) -> Result<(), BookingError>;
}

/// `POST {base_url}/api/booking` over HTTP with a JSON body
#[derive(Debug, Clone)]
pub struct HttpBookingTransport {
    client: Client,
    endpoint: String,
}

impl HttpBookingTransport {
    /// Build the transport from the booking settings.
    ///
    /// No timeout is applied unless `request_timeout_secs` is configured.
    pub fn new(settings: &BookingSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let endpoint = settings.endpoint_url();
        tracing::info!("Booking transport targeting {}", endpoint);

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BookingTransport for HttpBookingTransport {
    async fn send_booking(&self, payload: &BookingPayload) -> Result<(), BookingError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            // `{:#}` keeps the cause chain, e.g. "...: tcp connect error: Connection refused"
            .map_err(|e| BookingError::Transport(format!("{:#}", anyhow::Error::new(e))))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // A body that is not `{ message?: string }` counts as no message
        let body = response.json::<BookingErrorBody>().await.unwrap_or_default();

        Err(BookingError::Rejected {
            status: status.as_u16(),
            message: body.message,
        })
    }
}

/// Owns the quick-booking form and its submission flow.
///
/// Field edits go straight into [`StateManager`]; [`submit`](Self::submit)
/// issues a single request through the [`BookingTransport`] and resolves every
/// outcome into the one live [`Notification`].
#[derive(Clone)]
pub struct BookingController {
    state: StateManager,
    transport: Arc<dyn BookingTransport>,
    notes: String,
    metrics: Arc<Metrics>,
}

impl BookingController {
    pub fn new(
        state: StateManager,
        transport: Arc<dyn BookingTransport>,
        notes: impl Into<String>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            state,
            transport,
            notes: notes.into(),
            metrics,
        }
    }

    /// Update one form field. No validation, no network activity.
    pub fn set_field(&self, field: BookingField, value: impl Into<String>) -> Result<(), FormError> {
        self.state.set_form_field(field, value)?;
        tracing::trace!("Form field {} updated", field);
        Ok(())
    }

    pub fn set_service(&self, service: ServiceKind) {
        self.state.update(|s| s.form.service = service);
    }

    /// Submit the form.
    ///
    /// Issues exactly one request unless a submission is already in flight or
    /// a required field is blank. On success the form is reset; on any
    /// failure it is left as is so the user can correct and resubmit.
    ///
    /// # Returns
    ///
    /// - `Ok(notification)` once the request resolved (success or failure)
    /// - `Err(SubmitError::InFlight)` if another request is outstanding
    /// - `Err(SubmitError::MissingFields)` if required fields are empty; an
    ///   error notification naming them is shown
    pub async fn submit(&self) -> Result<Notification, SubmitError> {
        let Some(form) = self.state.try_begin_submission() else {
            tracing::warn!("Submit ignored: a booking request is already in flight");
            self.metrics.record_submission_blocked();
            return Err(SubmitError::InFlight);
        };
        let in_flight = InFlight {
            state: &self.state,
            resolved: false,
        };

        let missing = form.missing_fields();
        if !missing.is_empty() {
            let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            tracing::warn!("Submit blocked, missing fields: {}", labels.join(", "));
            in_flight.resolve(
                Notification::error(format!("Please fill in: {}", labels.join(", "))),
                false,
            );
            self.metrics.record_submission_blocked();
            return Err(SubmitError::MissingFields(missing));
        }

        let payload = form.to_payload(&self.notes);
        tracing::info!(
            "Submitting booking: service={}, date={}, time={}",
            payload.service,
            payload.date,
            payload.time
        );

        let start = Instant::now();
        let result = self.transport.send_booking(&payload).await;
        self.metrics.record_request_time(start.elapsed());

        let (notification, reset_form) = match result {
            Ok(()) => {
                tracing::info!("Booking accepted");
                self.metrics.record_submission_accepted();
                (Notification::success(BOOKING_SUCCESS_MESSAGE), true)
            }
            Err(error @ BookingError::Rejected { .. }) => {
                tracing::warn!("{}: {}", error, error.user_message());
                self.metrics.record_submission_rejected();
                (Notification::error(error.user_message()), false)
            }
            Err(error @ BookingError::Transport(_)) => {
                tracing::error!("{}", error);
                self.metrics.record_transport_failure();
                (Notification::error(error.user_message()), false)
            }
        };

        in_flight.resolve(notification.clone(), reset_form);
        Ok(notification)
    }

    /// Close the result notification.
    pub fn dismiss_notification(&self) {
        self.state.dismiss_notification();
    }
}

/// Claim on the in-flight flag for one `submit()` call.
///
/// Dropping the submission future before it resolves releases the flag, so a
/// cancelled request never locks the form.
struct InFlight<'a> {
    state: &'a StateManager,
    resolved: bool,
}

impl InFlight<'_> {
    fn resolve(mut self, notification: Notification, reset_form: bool) {
        self.resolved = true;
        self.state.finish_submission(notification, reset_form);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            tracing::warn!("Booking submission cancelled before it resolved");
            self.state.abandon_submission();
        }
    }
}
