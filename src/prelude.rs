//! Ceiling catalog prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        CatalogRepository, Category, CategoryId, CategoryView, Characteristic, Image,
        InMemoryCatalog, Parents, Product, ProductId, ProductType, ProductTypeId, ProductView,
        StorageError, TypeSection, to_display_record,
    },
    contacts::{
        ContactForm, ContactFormError, ContactInquiry, InMemoryInquiries, InquiryId,
        InquiryRepository, PhoneFormatError, PhoneRules, normalize_phone,
    },
    filters::{Facets, ProductFilter},
    fixtures::{Fixture, FixtureError},
    languages::Language,
    pricing::{CostEstimate, PriceRange, PricingError, estimate_cost, price_range},
    search::{Page, Paginator, search},
    service::{CatalogService, ServiceError, ServiceSettings},
    translations::{Resolution, UNTITLED, resolve},
};
