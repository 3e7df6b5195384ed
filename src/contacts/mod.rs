//! Contacts
//!
//! Visitor contact requests: phone canonicalisation, form validation and the
//! inquiry store staff review.

pub mod form;
pub mod phone;
pub mod repository;

pub use form::{ContactForm, ContactFormError, ValidContact, thank_you_message};
pub use phone::{PhoneFormatError, PhoneRules, normalize_phone};
pub use repository::{ContactInquiry, InMemoryInquiries, InquiryId, InquiryRepository};
