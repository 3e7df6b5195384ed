//! Contact Form

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    contacts::phone::{PhoneFormatError, PhoneRules},
    languages::Language,
};

/// Longest accepted visitor name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// Contact form validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactFormError {
    /// A required field was left blank.
    #[error("{0} is required")]
    Missing(&'static str),

    /// The name is longer than [`NAME_MAX_CHARS`].
    #[error("name must be at most 100 characters, got {0}")]
    NameTooLong(usize),

    /// The e-mail address is not shaped `local@domain.tld`.
    #[error("{0:?} is not a valid e-mail address")]
    InvalidEmail(String),

    /// The phone number could not be canonicalised.
    #[error(transparent)]
    InvalidPhone(#[from] PhoneFormatError),
}

/// Raw contact form fields as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    /// Visitor name
    pub name: String,

    /// Visitor e-mail address
    pub email: String,

    /// Visitor phone number in any accepted convention
    pub phone: String,

    /// Free-text message
    pub message: String,
}

/// A contact form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidContact {
    /// Trimmed visitor name
    pub name: String,

    /// Trimmed e-mail address
    pub email: String,

    /// Canonical international phone number
    pub phone: String,

    /// Trimmed message
    pub message: String,
}

impl ContactForm {
    /// Validate every field, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactFormError`] naming the first invalid field.
    pub fn validate(&self, rules: &PhoneRules) -> Result<ValidContact, ContactFormError> {
        let name = required("name", &self.name)?;
        let length = name.chars().count();

        if length > NAME_MAX_CHARS {
            return Err(ContactFormError::NameTooLong(length));
        }

        let email = required("email", &self.email)?;

        if !is_email(email) {
            return Err(ContactFormError::InvalidEmail(email.to_string()));
        }

        let phone = rules.normalize(required("phone", &self.phone)?)?;
        let message = required("message", &self.message)?;

        Ok(ValidContact {
            name: name.to_string(),
            email: email.to_string(),
            phone,
            message: message.to_string(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ContactFormError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ContactFormError::Missing(field));
    }

    Ok(value)
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty()
        && !host.is_empty()
        && !tld.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && !host.starts_with('.')
        && !host.ends_with('.')
}

/// Thank-you text shown after a successful submission.
pub fn thank_you_message(language: &str) -> &'static str {
    match Language::from_code(language) {
        Some(Language::Russian) => "Спасибо за вашу заявку! Мы свяжемся с вами в ближайшее время.",
        Some(Language::Kyrgyz) => {
            "Сураныч, сиздин кайрылууңуз үчүн рахмат! Биз сиз менен жакын арада байланышабыз."
        }
        Some(Language::English) | None => "Thank you for your inquiry! We will contact you soon.",
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: " Aida ".to_string(),
            email: "aida@example.kg".to_string(),
            phone: "0707 123 456".to_string(),
            message: "Please call me about a glossy ceiling.".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_normalised() -> TestResult {
        let contact = form().validate(&PhoneRules::default())?;

        assert_eq!(contact.name, "Aida");
        assert_eq!(contact.phone, "+996707123456");

        Ok(())
    }

    #[test]
    fn blank_fields_are_reported_by_name() {
        let rules = PhoneRules::default();
        let blank = |field: &str| {
            let mut form = form();

            match field {
                "name" => form.name = " ".to_string(),
                "email" => form.email.clear(),
                "phone" => form.phone.clear(),
                _ => form.message = "\n".to_string(),
            }

            form
        };

        for field in ["name", "email", "phone", "message"] {
            assert_eq!(
                blank(field).validate(&rules),
                Err(ContactFormError::Missing(field))
            );
        }
    }

    #[test]
    fn long_names_are_rejected_by_character_count() -> TestResult {
        let rules = PhoneRules::default();
        let cyrillic = ContactForm {
            name: "ж".repeat(100),
            ..form()
        };
        let too_long = ContactForm {
            name: "a".repeat(101),
            ..form()
        };

        cyrillic.validate(&rules)?;
        assert_eq!(
            too_long.validate(&rules),
            Err(ContactFormError::NameTooLong(101))
        );

        Ok(())
    }

    #[test]
    fn malformed_emails_are_rejected() {
        let rules = PhoneRules::default();

        for email in [
            "aida",
            "aida@",
            "@example.kg",
            "aida@example",
            "a b@example.kg",
            "a@b@c.kg",
        ] {
            let form = ContactForm {
                email: email.to_string(),
                ..form()
            };

            assert!(
                matches!(form.validate(&rules), Err(ContactFormError::InvalidEmail(_))),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn bad_phone_is_wrapped() {
        let form = ContactForm {
            phone: "123".to_string(),
            ..form()
        };

        assert!(matches!(
            form.validate(&PhoneRules::default()),
            Err(ContactFormError::InvalidPhone(_))
        ));
    }

    #[test]
    fn thank_you_message_is_localised_with_english_fallback() {
        assert!(thank_you_message("ru").starts_with("Спасибо"));
        assert!(thank_you_message("ky").contains("рахмат"));
        assert!(thank_you_message("en").starts_with("Thank you"));
        assert_eq!(thank_you_message("fr"), thank_you_message("en"));
    }
}
