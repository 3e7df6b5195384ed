//! Catalog
//!
//! Categories, product types and products, the storage seam they are read
//! through, and the display records built from them.

pub mod models;
pub mod repository;
pub mod views;

pub use models::{
    Category, CategoryId, CategoryTranslation, Characteristic, CharacteristicId,
    CharacteristicTranslation, Image, ImageId, Product, ProductId, ProductTranslation,
    ProductType, ProductTypeId, ProductTypeTranslation,
};
pub use repository::{CatalogRepository, InMemoryCatalog, StorageError};
pub use views::{
    CategoryView, CharacteristicView, ImageView, Parents, ProductView, TypeSection,
    to_display_record,
};
