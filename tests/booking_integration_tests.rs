//! Integration tests for the quick-booking flow over real HTTP
//!
//! A local axum server stands in for the booking endpoint so these tests
//! cover the actual wire format:
//! - JSON payload shape (service value, fixed notes)
//! - Server-provided failure messages and the generic fallback
//! - Form reset on success only
//! - Transport failures (connection refused)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use doctoreverywhere::models::{
    BOOKING_FAILURE_MESSAGE, BOOKING_SUCCESS_MESSAGE, BookingField, BookingForm, BookingSettings,
    NotificationKind,
};
use doctoreverywhere::services::{BookingController, HttpBookingTransport};
use doctoreverywhere::{Metrics, StateManager};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Received = Arc<Mutex<Vec<Value>>>;

/// Serve `POST /api/booking` answering every request with `status` and `body`.
///
/// Returns the base URL and the JSON bodies received so far.
async fn spawn_endpoint(status: StatusCode, body: Option<Value>) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&received);

    let app = Router::new().route(
        "/api/booking",
        post(move |Json(payload): Json<Value>| {
            let recorder = Arc::clone(&recorder);
            let body = body.clone();
            async move {
                recorder.lock().unwrap().push(payload);
                let response: Response = match body {
                    Some(body) => (status, Json(body)).into_response(),
                    None => status.into_response(),
                };
                response
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn controller_for(base_url: &str) -> (BookingController, StateManager, Arc<Metrics>) {
    let settings = BookingSettings {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(5),
        ..BookingSettings::default()
    };
    let state = StateManager::new();
    let metrics = Arc::new(Metrics::new());
    let transport = Arc::new(HttpBookingTransport::new(&settings).unwrap());
    let controller = BookingController::new(
        state.clone(),
        transport,
        settings.notes.clone(),
        Arc::clone(&metrics),
    );
    (controller, state, metrics)
}

fn fill_form(controller: &BookingController) {
    controller.set_field(BookingField::Name, "Asha Rao").unwrap();
    controller.set_field(BookingField::Email, "asha@example.com").unwrap();
    controller.set_field(BookingField::Phone, "+91 98765 43210").unwrap();
    controller.set_field(BookingField::Service, "blood-test").unwrap();
    controller.set_field(BookingField::Date, "2026-11-02").unwrap();
    controller.set_field(BookingField::Time, "10:30").unwrap();
}

#[tokio::test]
async fn test_success_sends_payload_and_resets_form() {
    let (base_url, received) = spawn_endpoint(StatusCode::OK, Some(json!({}))).await;
    let (controller, state, metrics) = controller_for(&base_url);
    fill_form(&controller);

    let notification = controller.submit().await.unwrap();

    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, BOOKING_SUCCESS_MESSAGE);

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1, "Exactly one request per submission");
    assert_eq!(
        received[0],
        json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "service": "blood test",
            "date": "2026-11-02",
            "time": "10:30",
            "notes": "Quick booking from homepage",
        })
    );

    let snapshot = state.snapshot();
    assert_eq!(snapshot.form, BookingForm::default());
    assert!(!snapshot.is_submitting);
    assert_eq!(metrics.requests_issued(), 1);
}

#[tokio::test]
async fn test_server_message_is_shown_verbatim() {
    let (base_url, _received) = spawn_endpoint(
        StatusCode::CONFLICT,
        Some(json!({ "message": "Slot unavailable" })),
    )
    .await;
    let (controller, state, _metrics) = controller_for(&base_url);
    fill_form(&controller);
    let before = state.snapshot().form;

    let notification = controller.submit().await.unwrap();

    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Slot unavailable");
    assert_eq!(state.snapshot().form, before, "Form is kept after a rejection");
}

#[tokio::test]
async fn test_rejection_without_message_uses_fallback() {
    let (base_url, _received) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, None).await;
    let (controller, state, _metrics) = controller_for(&base_url);
    fill_form(&controller);

    let notification = controller.submit().await.unwrap();

    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, BOOKING_FAILURE_MESSAGE);
    assert!(!state.read(|s| s.is_submitting));
}

#[tokio::test]
async fn test_rejection_with_unrelated_json_uses_fallback() {
    let (base_url, _received) =
        spawn_endpoint(StatusCode::BAD_REQUEST, Some(json!({ "error": "bad" }))).await;
    let (controller, _state, _metrics) = controller_for(&base_url);
    fill_form(&controller);

    let notification = controller.submit().await.unwrap();
    assert_eq!(notification.message, BOOKING_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_failure() {
    // Reserve a port, then free it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let (controller, state, metrics) = controller_for(&format!("http://127.0.0.1:{}", port));
    fill_form(&controller);
    let before = state.snapshot().form;

    let notification = controller.submit().await.unwrap();

    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(
        notification.message.to_lowercase().contains("refused"),
        "Cause missing from: {}",
        notification.message
    );
    assert_eq!(state.snapshot().form, before);
    assert!(!state.read(|s| s.is_submitting));
    assert_eq!(
        metrics
            .transport_failures
            .load(std::sync::atomic::Ordering::Relaxed),
        1
    );
}

#[tokio::test]
async fn test_resubmit_after_failure_sends_again() {
    let (base_url, received) = spawn_endpoint(
        StatusCode::CONFLICT,
        Some(json!({ "message": "Slot unavailable" })),
    )
    .await;
    let (controller, _state, _metrics) = controller_for(&base_url);
    fill_form(&controller);

    controller.submit().await.unwrap();
    controller.dismiss_notification();
    controller.set_field(BookingField::Time, "11:00").unwrap();
    controller.submit().await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[1]["time"], "11:00");
}
