//! Catalog Fixtures

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    catalog::models::{
        Category, CategoryId, CategoryTranslation, Characteristic, CharacteristicId,
        CharacteristicTranslation, Image, ImageId, Product, ProductId, ProductTranslation,
        ProductType, ProductTypeId, ProductTypeTranslation,
    },
    fixtures::FixtureError,
};

/// A whole catalog in YAML
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFixture {
    /// Categories, in insertion order
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,

    /// Product types, in insertion order
    #[serde(default)]
    pub product_types: Vec<ProductTypeFixture>,

    /// Products, in insertion order
    #[serde(default)]
    pub products: Vec<ProductFixture>,
}

/// Category fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category identity
    pub id: i64,

    /// Cover image reference
    #[serde(default)]
    pub cover_image: Option<String>,

    /// Translations, first one is the fallback
    #[serde(default)]
    pub translations: Vec<DescribedTranslationFixture>,
}

/// Product type fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductTypeFixture {
    /// Product type identity
    pub id: i64,

    /// Owning category
    #[serde(default)]
    pub category: Option<i64>,

    /// Translations, first one is the fallback
    #[serde(default)]
    pub translations: Vec<NameFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identity
    pub id: i64,

    /// Owning product type
    #[serde(default)]
    pub product_type: Option<i64>,

    /// Unit price as a decimal string, e.g. "450.00"
    pub price_per_sqm: String,

    /// Whether the product can be ordered
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Primary image reference
    #[serde(default)]
    pub image_url: String,

    /// Comma separated tags
    #[serde(default)]
    pub tags: String,

    /// Creation time, RFC 3339
    pub created_at: Timestamp,

    /// Translations, first one is the fallback
    #[serde(default)]
    pub translations: Vec<DescribedTranslationFixture>,

    /// Images in any order
    #[serde(default)]
    pub images: Vec<ImageFixture>,

    /// Characteristics in any order
    #[serde(default)]
    pub characteristics: Vec<CharacteristicFixture>,
}

fn in_stock_default() -> bool {
    true
}

/// Name and description in one language
#[derive(Debug, Deserialize)]
pub struct DescribedTranslationFixture {
    /// Language code
    pub language: String,

    /// Display name
    pub name: String,

    /// Long description
    #[serde(default)]
    pub description: String,
}

/// Name in one language
#[derive(Debug, Deserialize)]
pub struct NameFixture {
    /// Language code
    pub language: String,

    /// Display name
    pub name: String,
}

/// Image fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ImageFixture {
    /// Image identity
    pub id: i64,

    /// Content reference
    pub url: String,

    /// Alternative text
    #[serde(default)]
    pub alt_text: String,

    /// Display position
    #[serde(default)]
    pub order: u32,
}

/// Characteristic fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CharacteristicFixture {
    /// Characteristic identity
    pub id: i64,

    /// Display position
    #[serde(default)]
    pub order: u32,

    /// Translations, first one is the fallback
    #[serde(default)]
    pub translations: Vec<ValueFixture>,
}

/// Characteristic name and value in one language
#[derive(Debug, Deserialize)]
pub struct ValueFixture {
    /// Language code
    pub language: String,

    /// Characteristic name
    pub name: String,

    /// Characteristic value
    pub value: String,
}

impl From<CategoryFixture> for Category {
    fn from(fixture: CategoryFixture) -> Self {
        Category {
            id: CategoryId::new(fixture.id),
            cover_image: fixture.cover_image,
            translations: fixture
                .translations
                .into_iter()
                .map(|t| CategoryTranslation {
                    language: t.language,
                    name: t.name,
                    description: t.description,
                })
                .collect(),
        }
    }
}

impl From<ProductTypeFixture> for ProductType {
    fn from(fixture: ProductTypeFixture) -> Self {
        ProductType {
            id: ProductTypeId::new(fixture.id),
            category: fixture.category.map(CategoryId::new),
            translations: fixture
                .translations
                .into_iter()
                .map(|t| ProductTypeTranslation {
                    language: t.language,
                    name: t.name,
                })
                .collect(),
        }
    }
}

impl TryFrom<ProductFixture> for Product {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let price_per_sqm = Decimal::from_str(fixture.price_per_sqm.trim())
            .map_err(|_err| FixtureError::InvalidPrice(fixture.price_per_sqm.clone()))?;

        Ok(Product {
            id: ProductId::new(fixture.id),
            product_type: fixture.product_type.map(ProductTypeId::new),
            price_per_sqm,
            in_stock: fixture.in_stock,
            image_url: fixture.image_url,
            tags: fixture.tags,
            created_at: fixture.created_at,
            translations: fixture
                .translations
                .into_iter()
                .map(|t| ProductTranslation {
                    language: t.language,
                    name: t.name,
                    description: t.description,
                })
                .collect(),
            images: fixture
                .images
                .into_iter()
                .map(|image| Image {
                    id: ImageId::new(image.id),
                    url: image.url,
                    alt_text: image.alt_text,
                    order: image.order,
                })
                .collect(),
            characteristics: fixture
                .characteristics
                .into_iter()
                .map(|characteristic| Characteristic {
                    id: CharacteristicId::new(characteristic.id),
                    order: characteristic.order,
                    translations: characteristic
                        .translations
                        .into_iter()
                        .map(|t| CharacteristicTranslation {
                            language: t.language,
                            name: t.name,
                            value: t.value,
                        })
                        .collect(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const PRODUCT: &str = r#"
id: 7
product_type: 2
price_per_sqm: "450.50"
created_at: "2024-03-01T10:00:00Z"
translations:
  - language: ru
    name: Матовый
  - language: en
    name: Matte
    description: Classic finish
characteristics:
  - id: 1
    order: 2
    translations:
      - language: en
        name: Colour
        value: White
"#;

    #[test]
    fn product_fixture_converts_with_defaults() -> TestResult {
        let fixture: ProductFixture = serde_norway::from_str(PRODUCT)?;
        let product = Product::try_from(fixture)?;

        assert_eq!(product.price_per_sqm, Decimal::from_str("450.50")?);
        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert_eq!(product.translations.len(), 2);
        assert_eq!(
            product
                .translations
                .first()
                .map(|t| t.description.as_str()),
            Some("")
        );
        assert_eq!(product.created_at, Timestamp::from_str("2024-03-01T10:00:00Z")?);

        Ok(())
    }

    #[test]
    fn malformed_price_is_rejected() -> TestResult {
        let mut fixture: ProductFixture = serde_norway::from_str(PRODUCT)?;
        fixture.price_per_sqm = "cheap".to_string();

        assert!(matches!(
            Product::try_from(fixture),
            Err(FixtureError::InvalidPrice(price)) if price == "cheap"
        ));

        Ok(())
    }

    #[test]
    fn product_type_without_category_is_allowed() -> TestResult {
        let fixture: ProductTypeFixture =
            serde_norway::from_str("id: 3\ntranslations:\n  - language: en\n    name: Legacy\n")?;
        let product_type = ProductType::from(fixture);

        assert_eq!(product_type.category, None);

        Ok(())
    }
}
