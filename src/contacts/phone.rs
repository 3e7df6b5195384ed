//! Phone Numbers
//!
//! Canonicalises the phone numbers visitors type into the contact form.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Country code prepended to local numbers unless configured otherwise.
pub const DEFAULT_COUNTRY_CODE: &str = "+996";

/// Shortest accepted canonical number, `+` included.
pub const MIN_LENGTH: usize = 7;

/// Longest accepted canonical number, `+` included.
pub const MAX_LENGTH: usize = 16;

static INTERNATIONAL: OnceLock<Regex> = OnceLock::new();
static LOCAL_WITH_TRUNK: OnceLock<Regex> = OnceLock::new();
static LOCAL: OnceLock<Regex> = OnceLock::new();
static WITHOUT_PLUS: OnceLock<Regex> = OnceLock::new();
static COUNTRY_CODE: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "patterns are literals covered by the tests below"
)]
fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("phone pattern should compile"))
}

/// Phone normalisation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneFormatError {
    /// Nothing resembling a phone number was entered.
    #[error("phone number is empty")]
    Empty,

    /// The digits fit none of the accepted conventions.
    #[error("phone number {cleaned:?} is not in a recognised format")]
    UnrecognisedFormat {
        /// Input with everything but digits and a leading plus removed
        cleaned: String,
    },

    /// The canonical number is too short or too long.
    #[error("phone number {normalized:?} must be 7 to 16 characters long")]
    InvalidLength {
        /// The rejected canonical form
        normalized: String,
    },

    /// A configured country code is not `+` followed by one to three digits.
    #[error("country code {0:?} must be '+' followed by 1 to 3 digits")]
    InvalidCountryCode(String),
}

/// How local numbers are completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRules {
    country_code: String,
}

impl Default for PhoneRules {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl PhoneRules {
    /// Rules completing local numbers with `country_code`.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneFormatError::InvalidCountryCode`] unless the code is `+`
    /// followed by one to three digits.
    pub fn new(country_code: &str) -> Result<Self, PhoneFormatError> {
        let country_code = country_code.trim();

        if !pattern(&COUNTRY_CODE, r"^\+[1-9]\d{0,2}$").is_match(country_code) {
            return Err(PhoneFormatError::InvalidCountryCode(
                country_code.to_string(),
            ));
        }

        Ok(Self {
            country_code: country_code.to_string(),
        })
    }

    /// Country code used for local numbers.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Canonicalise `raw` into `+` and digits.
    ///
    /// Numbers written with a leading `+` must already be international. A
    /// local number with a trunk `0` has it replaced by the country code, and a
    /// bare nine-digit subscriber number gets the country code prepended.
    /// Anything else of plausible length is taken to carry its own country
    /// code without the `+`.
    ///
    /// # Errors
    ///
    /// Returns a [`PhoneFormatError`] when the input fits none of those
    /// conventions or the result falls outside [`MIN_LENGTH`]..=[`MAX_LENGTH`].
    pub fn normalize(&self, raw: &str) -> Result<String, PhoneFormatError> {
        let cleaned = clean(raw);

        if cleaned.is_empty() {
            return Err(PhoneFormatError::Empty);
        }

        let normalized = if cleaned.starts_with('+') {
            if !pattern(&INTERNATIONAL, r"^\+[1-9]\d{6,14}$").is_match(&cleaned) {
                return Err(PhoneFormatError::UnrecognisedFormat { cleaned });
            }

            cleaned
        } else if let Some(subscriber) = cleaned
            .strip_prefix('0')
            .filter(|_| pattern(&LOCAL_WITH_TRUNK, r"^0\d{9}$").is_match(&cleaned))
        {
            format!("{}{subscriber}", self.country_code)
        } else if pattern(&LOCAL, r"^\d{9}$").is_match(&cleaned) {
            format!("{}{cleaned}", self.country_code)
        } else if pattern(&WITHOUT_PLUS, r"^[1-9]\d{6,14}$").is_match(&cleaned) {
            format!("+{cleaned}")
        } else {
            return Err(PhoneFormatError::UnrecognisedFormat { cleaned });
        };

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&normalized.len()) {
            return Err(PhoneFormatError::InvalidLength { normalized });
        }

        Ok(normalized)
    }
}

/// Canonicalise `raw` with the default country code.
///
/// # Errors
///
/// See [`PhoneRules::normalize`].
pub fn normalize_phone(raw: &str) -> Result<String, PhoneFormatError> {
    PhoneRules::default().normalize(raw)
}

/// Keep digits, plus a `+` only when it comes before the first digit.
fn clean(raw: &str) -> String {
    let plus = raw
        .chars()
        .take_while(|c| !c.is_ascii_digit())
        .any(|c| c == '+');

    let digits = raw.chars().filter(char::is_ascii_digit);

    if plus {
        std::iter::once('+').chain(digits).collect()
    } else {
        digits.collect()
    }
}
