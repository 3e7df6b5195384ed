//! Catalog Repository
//!
//! The read side the catalog needs from storage: fetch by id and fetch the
//! children of a parent in display order. [`InMemoryCatalog`] backs the CLI,
//! fixtures and tests; a database-backed store implements the same trait.

use std::collections::BTreeMap;

use mockall::automock;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::models::{Category, CategoryId, Product, ProductId, ProductType, ProductTypeId},
    translations::{Translated, duplicate_language},
};

/// Storage errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// A record with the same identity is already stored.
    #[error("{entity} {id} already exists")]
    AlreadyExists {
        /// Entity kind
        entity: &'static str,
        /// Conflicting identity
        id: i64,
    },

    /// A record points at a parent that is not stored.
    #[error("{entity} {id} references unknown {parent} {parent_id}")]
    InvalidReference {
        /// Entity kind
        entity: &'static str,
        /// Record identity
        id: i64,
        /// Parent entity kind
        parent: &'static str,
        /// Missing parent identity
        parent_id: i64,
    },

    /// A translation list holds the same language twice.
    #[error("{entity} {id} has more than one {language:?} translation")]
    DuplicateTranslation {
        /// Entity kind
        entity: &'static str,
        /// Record identity
        id: i64,
        /// Repeated language code
        language: String,
    },

    /// A product price below zero.
    #[error("product {id} has a negative price")]
    NegativePrice {
        /// Product identity
        id: i64,
    },

    /// The record to update does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind
        entity: &'static str,
        /// Requested identity
        id: i64,
    },

    /// The backing store could not serve the request.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the catalog.
///
/// Categories and product types come back in identity order. Products come
/// back newest first, ties broken by identity.
#[automock]
pub trait CatalogRepository {
    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn categories(&self) -> Result<Vec<Category>, StorageError>;

    /// A single category.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// All product types.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn product_types(&self) -> Result<Vec<ProductType>, StorageError>;

    /// Product types that belong to `category`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn product_types_in(&self, category: CategoryId) -> Result<Vec<ProductType>, StorageError>;

    /// A single product type.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn product_type(&self, id: ProductTypeId) -> Result<Option<ProductType>, StorageError>;

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn products(&self) -> Result<Vec<Product>, StorageError>;

    /// Products that belong to `product_type`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn products_of_type(&self, product_type: ProductTypeId) -> Result<Vec<Product>, StorageError>;

    /// A single product with its translations, images and characteristics.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the store cannot be read.
    fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError>;
}

/// Catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    categories: BTreeMap<CategoryId, Category>,
    product_types: BTreeMap<ProductTypeId, ProductType>,
    products: BTreeMap<ProductId, Product>,
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a category.
    ///
    /// # Errors
    ///
    /// - [`StorageError::AlreadyExists`]: the id is taken.
    /// - [`StorageError::DuplicateTranslation`]: a language appears twice.
    pub fn insert_category(&mut self, category: Category) -> Result<(), StorageError> {
        let id = category.id.get();

        if self.categories.contains_key(&category.id) {
            return Err(StorageError::AlreadyExists {
                entity: "category",
                id,
            });
        }

        ensure_unique_languages("category", id, &category.translations)?;

        self.categories.insert(category.id, category);

        Ok(())
    }

    /// Store a product type.
    ///
    /// # Errors
    ///
    /// - [`StorageError::AlreadyExists`]: the id is taken.
    /// - [`StorageError::InvalidReference`]: the category is not stored.
    /// - [`StorageError::DuplicateTranslation`]: a language appears twice.
    pub fn insert_product_type(&mut self, product_type: ProductType) -> Result<(), StorageError> {
        let id = product_type.id.get();

        if self.product_types.contains_key(&product_type.id) {
            return Err(StorageError::AlreadyExists {
                entity: "product type",
                id,
            });
        }

        if let Some(category) = product_type.category
            && !self.categories.contains_key(&category)
        {
            return Err(StorageError::InvalidReference {
                entity: "product type",
                id,
                parent: "category",
                parent_id: category.get(),
            });
        }

        ensure_unique_languages("product type", id, &product_type.translations)?;

        self.product_types.insert(product_type.id, product_type);

        Ok(())
    }

    /// Store a product.
    ///
    /// # Errors
    ///
    /// - [`StorageError::AlreadyExists`]: the id is taken.
    /// - [`StorageError::InvalidReference`]: the product type is not stored.
    /// - [`StorageError::NegativePrice`]: the unit price is below zero.
    /// - [`StorageError::DuplicateTranslation`]: a language appears twice on the
    ///   product or on one of its characteristics.
    ///
    /// Prices are stored at the scale they arrive with. Imported price lists
    /// can carry sub-cent values, and rounding happens only on display.
    pub fn insert_product(&mut self, product: Product) -> Result<(), StorageError> {
        let id = product.id.get();

        if self.products.contains_key(&product.id) {
            return Err(StorageError::AlreadyExists {
                entity: "product",
                id,
            });
        }

        if let Some(product_type) = product.product_type
            && !self.product_types.contains_key(&product_type)
        {
            return Err(StorageError::InvalidReference {
                entity: "product",
                id,
                parent: "product type",
                parent_id: product_type.get(),
            });
        }

        if product.price_per_sqm < Decimal::ZERO {
            return Err(StorageError::NegativePrice { id });
        }

        ensure_unique_languages("product", id, &product.translations)?;

        for characteristic in &product.characteristics {
            ensure_unique_languages(
                "characteristic",
                characteristic.id.get(),
                &characteristic.translations,
            )?;
        }

        self.products.insert(product.id, product);

        Ok(())
    }

    /// Number of stored products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.categories.values().cloned().collect())
    }

    fn category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        Ok(self.categories.get(&id).cloned())
    }

    fn product_types(&self) -> Result<Vec<ProductType>, StorageError> {
        Ok(self.product_types.values().cloned().collect())
    }

    fn product_types_in(&self, category: CategoryId) -> Result<Vec<ProductType>, StorageError> {
        Ok(self
            .product_types
            .values()
            .filter(|product_type| product_type.category == Some(category))
            .cloned()
            .collect())
    }

    fn product_type(&self, id: ProductTypeId) -> Result<Option<ProductType>, StorageError> {
        Ok(self.product_types.get(&id).cloned())
    }

    fn products(&self) -> Result<Vec<Product>, StorageError> {
        Ok(newest_first(self.products.values().cloned().collect()))
    }

    fn products_of_type(&self, product_type: ProductTypeId) -> Result<Vec<Product>, StorageError> {
        Ok(newest_first(
            self.products
                .values()
                .filter(|product| product.product_type == Some(product_type))
                .cloned()
                .collect(),
        ))
    }

    fn product(&self, id: ProductId) -> Result<Option<Product>, StorageError> {
        Ok(self.products.get(&id).cloned())
    }
}

fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });

    products
}

fn ensure_unique_languages<T: Translated>(
    entity: &'static str,
    id: i64,
    translations: &[T],
) -> Result<(), StorageError> {
    match duplicate_language(translations) {
        Some(language) => Err(StorageError::DuplicateTranslation {
            entity,
            id,
            language: language.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::catalog::models::{ProductTranslation, ProductTypeTranslation};

    use super::*;

    fn category(id: i64) -> Category {
        Category {
            id: CategoryId::new(id),
            cover_image: None,
            translations: smallvec![],
        }
    }

    fn product_type(id: i64, category: Option<i64>) -> ProductType {
        ProductType {
            id: ProductTypeId::new(id),
            category: category.map(CategoryId::new),
            translations: smallvec![ProductTypeTranslation {
                language: "ru".to_string(),
                name: format!("Тип {id}"),
            }],
        }
    }

    fn product(id: i64, product_type: i64, created_at: i64) -> TestResult<Product> {
        Ok(Product {
            id: ProductId::new(id),
            product_type: Some(ProductTypeId::new(product_type)),
            price_per_sqm: Decimal::new(50_000, 2),
            in_stock: true,
            image_url: String::new(),
            tags: String::new(),
            created_at: Timestamp::from_second(created_at)?,
            translations: smallvec![],
            images: Vec::new(),
            characteristics: Vec::new(),
        })
    }

    fn seeded() -> TestResult<InMemoryCatalog> {
        let mut catalog = InMemoryCatalog::new();

        catalog.insert_category(category(1))?;
        catalog.insert_product_type(product_type(10, Some(1)))?;
        catalog.insert_product_type(product_type(11, None))?;
        catalog.insert_product(product(100, 10, 1_000)?)?;
        catalog.insert_product(product(101, 10, 3_000)?)?;
        catalog.insert_product(product(102, 11, 2_000)?)?;

        Ok(catalog)
    }

    #[test]
    fn products_come_back_newest_first() -> TestResult {
        let catalog = seeded()?;
        let ids: Vec<i64> = catalog
            .products()?
            .into_iter()
            .map(|product| product.id.get())
            .collect();

        assert_eq!(ids, [101, 102, 100]);

        Ok(())
    }

    #[test]
    fn children_are_filtered_by_parent() -> TestResult {
        let catalog = seeded()?;

        assert_eq!(catalog.product_types_in(CategoryId::new(1))?.len(), 1);
        assert_eq!(catalog.products_of_type(ProductTypeId::new(10))?.len(), 2);
        assert!(catalog.products_of_type(ProductTypeId::new(99))?.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let mut catalog = seeded()?;
        let result = catalog.insert_category(category(1));

        assert_eq!(
            result,
            Err(StorageError::AlreadyExists {
                entity: "category",
                id: 1
            })
        );

        Ok(())
    }

    #[test]
    fn unknown_parents_are_rejected() -> TestResult {
        let mut catalog = seeded()?;

        assert!(matches!(
            catalog.insert_product_type(product_type(12, Some(7))),
            Err(StorageError::InvalidReference { parent_id: 7, .. })
        ));
        assert!(matches!(
            catalog.insert_product(product(103, 99, 0)?),
            Err(StorageError::InvalidReference { parent_id: 99, .. })
        ));

        Ok(())
    }

    #[test]
    fn negative_prices_are_rejected() -> TestResult {
        let mut catalog = seeded()?;
        let mut product = product(104, 10, 0)?;
        product.price_per_sqm = Decimal::new(-1, 2);

        assert_eq!(
            catalog.insert_product(product),
            Err(StorageError::NegativePrice { id: 104 })
        );

        Ok(())
    }

    #[test]
    fn sub_cent_prices_are_stored_unrounded() -> TestResult {
        let mut catalog = seeded()?;
        let mut product = product(106, 10, 0)?;
        product.price_per_sqm = Decimal::new(1_999_995, 3);

        catalog.insert_product(product)?;

        let stored = catalog
            .product(ProductId::new(106))?
            .ok_or("expected the stored product")?;

        assert_eq!(stored.price_per_sqm, Decimal::new(1_999_995, 3));

        Ok(())
    }

    #[test]
    fn duplicate_languages_are_rejected() -> TestResult {
        let mut catalog = seeded()?;
        let mut product = product(105, 10, 0)?;
        let translation = ProductTranslation {
            language: "en".to_string(),
            name: "Matte".to_string(),
            description: String::new(),
        };
        product.translations = smallvec![translation.clone(), translation];

        assert!(matches!(
            catalog.insert_product(product),
            Err(StorageError::DuplicateTranslation { language, .. }) if language == "en"
        ));
        assert_eq!(catalog.product_count(), 3);

        Ok(())
    }
}
