//! Booking request validation and the confirmation state machine. No DOM
//! here so it can be tested natively; the form component lives in
//! `components::booking_form`.

use std::fmt;
use std::str::FromStr;

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::CONFIRMATION_MS;

const MIN_NAME_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShootType {
    Automotive,
    Portrait,
    Brand,
}

impl ShootType {
    pub const ALL: [ShootType; 3] = [ShootType::Automotive, ShootType::Portrait, ShootType::Brand];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShootType::Automotive => "automotive",
            ShootType::Portrait => "portrait",
            ShootType::Brand => "brand",
        }
    }

    /// Label shown in the select box.
    pub fn label(&self) -> &'static str {
        match self {
            ShootType::Automotive => "Automobile",
            ShootType::Portrait => "Portrait éditorial",
            ShootType::Brand => "Contenu de marque",
        }
    }
}

impl fmt::Display for ShootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShootType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShootType::ALL
            .into_iter()
            .find(|shoot| shoot.as_str() == s)
            .ok_or(ValidationError::MissingShootType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Le nom est trop court")]
    NameTooShort,
    #[error("Adresse e-mail invalide")]
    InvalidEmail,
    #[error("Veuillez sélectionner un type de shooting")]
    MissingShootType,
}

/// Raw field values as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub shoot_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub shoot_type: ShootType,
}

/// One optional error per field; every field is checked on each submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub name: Option<ValidationError>,
    pub email: Option<ValidationError>,
    pub shoot_type: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.shoot_type.is_none()
    }

    pub fn count(&self) -> usize {
        [self.name, self.email, self.shoot_type].iter().flatten().count()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

pub fn validate(draft: &BookingDraft) -> Result<BookingRequest, FieldErrors> {
    let name = draft.name.as_str();
    let email = draft.email.trim();

    let mut errors = FieldErrors::default();
    if name.chars().count() < MIN_NAME_CHARS {
        errors.name = Some(ValidationError::NameTooShort);
    }
    if !is_valid_email(email) {
        errors.email = Some(ValidationError::InvalidEmail);
    }
    let shoot_type = match draft.shoot_type.parse::<ShootType>() {
        Ok(shoot_type) => Some(shoot_type),
        Err(e) => {
            errors.shoot_type = Some(e);
            None
        }
    };

    match shoot_type {
        Some(shoot_type) if errors.is_empty() => Ok(BookingRequest {
            name: name.to_string(),
            email: email.to_string(),
            shoot_type,
        }),
        _ => Err(errors),
    }
}

/// Whether the form or the confirmation is showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormPhase {
    Editing,
    Sent { since_ms: f64 },
}

impl FormPhase {
    /// The phase as seen at `now_ms`: a confirmation older than
    /// `CONFIRMATION_MS` has already reverted to an empty form.
    pub fn at(self, now_ms: f64) -> FormPhase {
        match self {
            FormPhase::Sent { since_ms } if now_ms - since_ms >= CONFIRMATION_MS as f64 => FormPhase::Editing,
            phase => phase,
        }
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, FormPhase::Sent { .. })
    }
}

/// Where a valid booking goes. Only logging exists today; a mail or webhook
/// sender plugs in here.
pub trait BookingDispatch {
    fn dispatch(&self, request: &BookingRequest);
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogDispatch;

impl BookingDispatch for LogDispatch {
    fn dispatch(&self, request: &BookingRequest) {
        match serde_json::to_string(request) {
            Ok(json) => info!("Booking request: {}", json),
            Err(e) => info!("Booking request for {} (unserializable: {})", request.shoot_type, e),
        }
    }
}

/// Validates and, when valid, dispatches. Returns the phase to show next.
pub fn submit(draft: &BookingDraft, dispatch: &dyn BookingDispatch, now_ms: f64) -> Result<FormPhase, FieldErrors> {
    let request = validate(draft)?;
    dispatch.dispatch(&request);
    Ok(FormPhase::Sent { since_ms: now_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn draft(name: &str, email: &str, shoot_type: &str) -> BookingDraft {
        BookingDraft {
            name: name.to_string(),
            email: email.to_string(),
            shoot_type: shoot_type.to_string(),
        }
    }

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<BookingRequest>>,
    }

    impl BookingDispatch for Recorder {
        fn dispatch(&self, request: &BookingRequest) {
            self.sent.borrow_mut().push(request.clone());
        }
    }

    #[test]
    fn test_single_letter_name_fails() {
        let errors = validate(&draft("A", "x@x.com", "automotive")).unwrap_err();
        assert_eq!(errors.name, Some(ValidationError::NameTooShort));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn test_name_length_counts_surrounding_spaces() {
        let request = validate(&draft(" A", "a@b.com", "portrait")).unwrap();
        assert_eq!(request.name, " A");
        let errors = validate(&draft(" ", "a@b.com", "portrait")).unwrap_err();
        assert_eq!(errors.name, Some(ValidationError::NameTooShort));
    }

    #[test]
    fn test_bad_email_fails() {
        let errors = validate(&draft("Al", "not-an-email", "automotive")).unwrap_err();
        assert_eq!(errors.email, Some(ValidationError::InvalidEmail));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn test_missing_type_fails() {
        let errors = validate(&draft("Al", "a@b.com", "")).unwrap_err();
        assert_eq!(errors.shoot_type, Some(ValidationError::MissingShootType));
        assert_eq!(errors.count(), 1);
    }

    #[test]
    fn test_valid_booking_shows_confirmation_then_reverts() {
        let recorder = Recorder::default();
        let phase = submit(&draft("Al", "a@b.com", "portrait"), &recorder, 1_000.0).unwrap();
        assert_eq!(phase, FormPhase::Sent { since_ms: 1_000.0 });
        assert_eq!(recorder.sent.borrow()[0].shoot_type, ShootType::Portrait);

        assert!(phase.at(3_999.0).is_sent());
        assert_eq!(phase.at(4_000.0), FormPhase::Editing);
    }

    #[test]
    fn test_all_fields_reported_together() {
        let recorder = Recorder::default();
        let errors = submit(&draft(" ", "a@b", "drone"), &recorder, 0.0).unwrap_err();
        assert_eq!(errors.count(), 3);
        assert!(recorder.sent.borrow().is_empty());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("greg.venox+shoots@mail.example.fr"));
        assert!(!is_valid_email(".greg@example.com"));
        assert!(!is_valid_email("greg..venox@example.com"));
        assert!(!is_valid_email("greg@example"));
        assert!(!is_valid_email("greg@@example.com"));
    }

    #[test]
    fn test_messages_and_wire_format() {
        assert_eq!(ValidationError::NameTooShort.to_string(), "Le nom est trop court");
        let request = validate(&draft("Greg", "g@v.com", "brand")).unwrap();
        assert_eq!(request.name, "Greg");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"Greg","email":"g@v.com","type":"brand"}"#);
    }
}
