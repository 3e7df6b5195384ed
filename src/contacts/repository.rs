//! Inquiry Repository

use std::collections::BTreeMap;

use jiff::Timestamp;
use mockall::automock;
use serde::Serialize;

use crate::{catalog::repository::StorageError, contacts::form::ValidContact, ids::TypedId};

/// Contact Inquiry ID
pub type InquiryId = TypedId<ContactInquiry>;

/// A stored contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInquiry {
    /// Inquiry identity
    pub id: InquiryId,

    /// Visitor name
    pub name: String,

    /// Visitor e-mail address
    pub email: String,

    /// Canonical international phone number
    pub phone: String,

    /// Free-text message
    pub message: String,

    /// When the inquiry was submitted
    pub created_at: Timestamp,

    /// Whether staff have reviewed it
    pub checked: bool,
}

/// Storage for contact inquiries.
#[automock]
pub trait InquiryRepository {
    /// Store a validated contact as a new, unchecked inquiry.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store rejects the write.
    fn insert(
        &mut self,
        contact: ValidContact,
        created_at: Timestamp,
    ) -> Result<ContactInquiry, StorageError>;

    /// All inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the store cannot be read.
    fn inquiries(&self) -> Result<Vec<ContactInquiry>, StorageError>;

    /// Flag an inquiry as reviewed. Flagging twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] for an unknown id.
    fn mark_checked(&mut self, id: InquiryId) -> Result<ContactInquiry, StorageError>;
}

/// Inquiries held in memory, numbered from one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInquiries {
    inquiries: BTreeMap<InquiryId, ContactInquiry>,
    last_id: i64,
}

impl InMemoryInquiries {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored inquiries.
    pub fn len(&self) -> usize {
        self.inquiries.len()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.inquiries.is_empty()
    }
}

impl InquiryRepository for InMemoryInquiries {
    fn insert(
        &mut self,
        contact: ValidContact,
        created_at: Timestamp,
    ) -> Result<ContactInquiry, StorageError> {
        let next = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| StorageError::Unavailable("inquiry ids exhausted".to_string()))?;

        let inquiry = ContactInquiry {
            id: InquiryId::new(next),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            created_at,
            checked: false,
        };

        self.last_id = next;
        self.inquiries.insert(inquiry.id, inquiry.clone());

        Ok(inquiry)
    }

    fn inquiries(&self) -> Result<Vec<ContactInquiry>, StorageError> {
        let mut inquiries: Vec<ContactInquiry> = self.inquiries.values().cloned().collect();

        inquiries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(inquiries)
    }

    fn mark_checked(&mut self, id: InquiryId) -> Result<ContactInquiry, StorageError> {
        let inquiry = self
            .inquiries
            .get_mut(&id)
            .ok_or(StorageError::NotFound {
                entity: "inquiry",
                id: id.get(),
            })?;

        inquiry.checked = true;

        Ok(inquiry.clone())
    }
}
