//! Ceiling Catalog
//!
//! A multilingual catalog of ceiling products: categories, product types and
//! products with per-language text, images and characteristics, a cost
//! calculator priced per square metre, free-text search and a contact form.
//!
//! The display logic is a set of pure functions over plain data. Storage sits
//! behind the [`catalog::CatalogRepository`] and
//! [`contacts::InquiryRepository`] traits, and [`service::CatalogService`]
//! combines the two into the operations a request dispatcher calls.

pub mod catalog;
pub mod config;
pub mod contacts;
pub mod filters;
pub mod fixtures;
pub mod ids;
pub mod languages;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod render;
pub mod search;
pub mod service;
pub mod translations;
