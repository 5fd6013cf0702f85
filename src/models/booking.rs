use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Annotation attached to every booking sent from the hero form.
pub const QUICK_BOOKING_NOTE: &str = "Quick booking from homepage";

/// Notification text shown after the booking endpoint accepts a request.
pub const BOOKING_SUCCESS_MESSAGE: &str =
    "Your booking request has been sent successfully! We will contact you shortly.";

/// Fallback text when a rejected request carries no usable `message`.
pub const BOOKING_FAILURE_MESSAGE: &str = "Failed to send booking request.";

/// Service offered by the quick-booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    #[default]
    DoctorConsultation,
    BloodTest,
    Xray,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [
        ServiceKind::DoctorConsultation,
        ServiceKind::BloodTest,
        ServiceKind::Xray,
    ];

    /// Form value of the service (the `<option value>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::DoctorConsultation => "doctor-consultation",
            ServiceKind::BloodTest => "blood-test",
            ServiceKind::Xray => "xray",
        }
    }

    /// Human-readable label shown in the service picker.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceKind::DoctorConsultation => "Doctor Consultation",
            ServiceKind::BloodTest => "Blood Test",
            ServiceKind::Xray => "X-Ray",
        }
    }

    /// Value sent in the booking payload: the first hyphen becomes a space.
    pub fn payload_value(&self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownService(s.to_string()))
    }
}

/// Addressable fields of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    Name,
    Email,
    Phone,
    Service,
    Date,
    Time,
}

impl BookingField {
    pub const ALL: [BookingField; 6] = [
        BookingField::Name,
        BookingField::Email,
        BookingField::Phone,
        BookingField::Service,
        BookingField::Date,
        BookingField::Time,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::Service => "service",
            BookingField::Date => "date",
            BookingField::Time => "time",
        }
    }

    /// Placeholder/label used by the form inputs.
    pub fn label(&self) -> &'static str {
        match self {
            BookingField::Name => "Full Name",
            BookingField::Email => "Email Address",
            BookingField::Phone => "Phone Number",
            BookingField::Service => "Service",
            BookingField::Date => "Date",
            BookingField::Time => "Time",
        }
    }

    /// Every field except the service picker must be filled in.
    pub fn is_required(&self) -> bool {
        !matches!(self, BookingField::Service)
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Errors raised while editing the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Unknown service: {0}")]
    UnknownService(String),
}

/// Field values of the quick-booking form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: ServiceKind,
    pub date: String,
    pub time: String,
}

impl BookingForm {
    /// Current value of a field as it appears in the input.
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::Service => self.service.as_str(),
            BookingField::Date => &self.date,
            BookingField::Time => &self.time,
        }
    }

    /// Replace one field's value.
    ///
    /// The service field is parsed into a [`ServiceKind`]; an unknown value
    /// leaves the form unchanged.
    pub fn set(&mut self, field: BookingField, value: impl Into<String>) -> Result<(), FormError> {
        let value = value.into();
        match field {
            BookingField::Name => self.name = value,
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::Service => self.service = value.parse()?,
            BookingField::Date => self.date = value,
            BookingField::Time => self.time = value,
        }
        Ok(())
    }

    /// Required fields that are still empty.
    ///
    /// Whitespace counts as a value, as it does for a native `required` input.
    pub fn missing_fields(&self) -> Vec<BookingField> {
        BookingField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.get(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Build the JSON body for `POST /api/booking`.
    pub fn to_payload(&self, notes: &str) -> BookingPayload {
        BookingPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service: self.service.payload_value(),
            date: self.date.clone(),
            time: self.time.clone(),
            notes: notes.to_string(),
        }
    }
}

/// Request body accepted by the booking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub date: String,
    pub time: String,
    pub notes: String,
}

/// Body of a non-success booking response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
