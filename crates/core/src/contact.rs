//! Contact form validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Email;

/// Message shown after a successful submission.
pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// Why a contact form was refused. The display text is shopper-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please agree to the terms and conditions.")]
    TermsNotAccepted,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Raw contact form fields as submitted.
///
/// `terms` is a checkbox: browsers send `on` when checked and omit the
/// field otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub terms: Option<String>,
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Whether the terms checkbox was ticked.
    #[must_use]
    pub fn terms_accepted(&self) -> bool {
        self.terms
            .as_deref()
            .is_some_and(|value| !value.is_empty() && value != "false" && value != "off")
    }

    /// Check required fields, then terms, then the email address.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContactError`] that applies, in that order.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let required = [&self.name, &self.email, &self.subject, &self.message];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ContactError::MissingFields);
        }

        if !self.terms_accepted() {
            return Err(ContactError::TermsNotAccepted);
        }

        let email = Email::parse(&self.email).map_err(|_| ContactError::InvalidEmail)?;

        Ok(ContactSubmission {
            name: self.name.trim().to_owned(),
            email,
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: " Ada ".to_string(),
            email: "Ada@Example.com".to_string(),
            subject: "Order question".to_string(),
            message: "Do you ship to Lisbon?".to_string(),
            terms: Some("on".to_string()),
        }
    }

    #[test]
    fn test_valid_form() {
        let submission = filled().validate().unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_missing_fields_checked_first() {
        let form = ContactForm {
            subject: "   ".to_string(),
            terms: None,
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::MissingFields));
    }

    #[test]
    fn test_terms_required() {
        let form = ContactForm {
            terms: None,
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::TermsNotAccepted));
        assert_eq!(
            ContactError::TermsNotAccepted.to_string(),
            "Please agree to the terms and conditions."
        );
    }

    #[test]
    fn test_invalid_email() {
        let form = ContactForm {
            email: "ada-at-example".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ContactError::InvalidEmail));
    }
}
