// Booking / consultation modal and its lead form
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_MODAL_TITLE: &str = "Book Your Stay";
pub const CONSULTATION_TITLE: &str = "Free Trip Consultation";

// Same shape browsers accept for <input type="email">
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid date in {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Cancel,
    CloseButton,
    Backdrop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    pub visible: bool,
    pub title: String,
    pub target_listing_id: Option<u32>,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            visible: false,
            title: DEFAULT_MODAL_TITLE.to_string(),
            target_listing_id: None,
        }
    }
}

impl ModalState {
    pub fn open(&mut self, title: impl Into<String>, target_listing_id: Option<u32>) {
        self.title = title.into();
        self.target_listing_id = target_listing_id;
        self.visible = true;
    }

    // Title and target survive a close; the next open overwrites them
    pub fn close(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Standard,
    Deluxe,
    Suite,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub full_name: String,
    pub email: String,
    pub check_in: String,
    pub check_out: String,
    pub tier: Tier,
    pub note: Option<String>,
}

/// A form that passed field-level validation.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub tier: Tier,
    pub note: Option<String>,
}

impl BookingForm {
    pub fn validate(&self) -> Result<BookingRequest, FormError> {
        let full_name = required("full_name", &self.full_name)?;

        let email = required("email", &self.email)?;
        if !EMAIL_PATTERN.is_match(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }

        let check_in = parse_date("check_in", &self.check_in)?;
        let check_out = parse_date("check_out", &self.check_out)?;

        Ok(BookingRequest {
            full_name: full_name.to_string(),
            email: email.to_string(),
            check_in,
            check_out,
            tier: self.tier,
            note: self
                .note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(str::to_string),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingRequiredField(field));
    }
    Ok(value)
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FormError> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

pub fn confirmation_message(listing_title: Option<&str>) -> String {
    match listing_title {
        Some(title) => format!("Thanks! {title} — Our team will confirm by email."),
        None => "Thanks! Our team will confirm by email.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BookingForm {
        BookingForm {
            full_name: "Asha Mehta".to_string(),
            email: "asha@example.com".to_string(),
            check_in: "2025-06-13".to_string(),
            check_out: "2025-06-15".to_string(),
            tier: Tier::Deluxe,
            note: Some("  Sea view please ".to_string()),
        }
    }

    #[test]
    fn test_modal_transitions() {
        let mut modal = ModalState::default();
        assert!(!modal.visible);
        assert_eq!(modal.title, "Book Your Stay");

        modal.open(CONSULTATION_TITLE, None);
        assert!(modal.visible);
        assert_eq!(modal.title, "Free Trip Consultation");
        assert_eq!(modal.target_listing_id, None);

        modal.close();
        assert!(!modal.visible);

        modal.open("Book Your Stay", Some(3));
        assert_eq!(modal.target_listing_id, Some(3));
    }

    #[test]
    fn test_valid_form() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.full_name, "Asha Mehta");
        assert_eq!(request.check_in, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
        assert_eq!(request.tier, Tier::Deluxe);
        assert_eq!(request.note.as_deref(), Some("Sea view please"));

        let blank_note = BookingForm {
            note: Some("   ".to_string()),
            ..valid_form()
        };
        assert_eq!(blank_note.validate().unwrap().note, None);
    }

    #[test]
    fn test_missing_fields() {
        let no_name = BookingForm {
            full_name: "  ".to_string(),
            ..valid_form()
        };
        assert_eq!(
            no_name.validate(),
            Err(FormError::MissingRequiredField("full_name"))
        );

        let no_email = BookingForm {
            email: String::new(),
            ..valid_form()
        };
        assert_eq!(no_email.validate(), Err(FormError::MissingRequiredField("email")));

        let no_checkout = BookingForm {
            check_out: String::new(),
            ..valid_form()
        };
        assert_eq!(
            no_checkout.validate(),
            Err(FormError::MissingRequiredField("check_out"))
        );
    }

    #[test]
    fn test_malformed_email_and_dates() {
        for email in ["asha", "asha@", "@example.com", "asha mehta@example.com"] {
            let form = BookingForm {
                email: email.to_string(),
                ..valid_form()
            };
            assert!(
                matches!(form.validate(), Err(FormError::InvalidEmail(_))),
                "accepted {email}"
            );
        }

        let bad_date = BookingForm {
            check_in: "13/06/2025".to_string(),
            ..valid_form()
        };
        assert_eq!(
            bad_date.validate(),
            Err(FormError::InvalidDate {
                field: "check_in",
                value: "13/06/2025".to_string()
            })
        );

        let impossible = BookingForm {
            check_out: "2025-02-30".to_string(),
            ..valid_form()
        };
        assert!(matches!(impossible.validate(), Err(FormError::InvalidDate { .. })));
    }

    #[test]
    fn test_confirmation_message() {
        assert_eq!(
            confirmation_message(Some("Alibaug Courtyard Home")),
            "Thanks! Alibaug Courtyard Home — Our team will confirm by email."
        );
        assert_eq!(
            confirmation_message(None),
            "Thanks! Our team will confirm by email."
        );
    }
}
