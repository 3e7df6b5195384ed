//! Catalog Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    ids::TypedId,
    translations::{Named, Translated, Translations},
};

/// Category ID
pub type CategoryId = TypedId<Category>;

/// Product Type ID
pub type ProductTypeId = TypedId<ProductType>;

/// Product ID
pub type ProductId = TypedId<Product>;

/// Image ID
pub type ImageId = TypedId<Image>;

/// Characteristic ID
pub type CharacteristicId = TypedId<Characteristic>;

/// Top-level grouping of product types (e.g. "Stretch ceilings").
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Category identity
    pub id: CategoryId,

    /// Cover image reference, resolved by media storage.
    pub cover_image: Option<String>,

    /// Name and description per language
    pub translations: Translations<CategoryTranslation>,
}

/// Category name and description in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTranslation {
    /// Language code
    pub language: String,

    /// Category name
    pub name: String,

    /// Category description
    pub description: String,
}

/// A kind of product within a category (e.g. "Matte", "Glossy").
#[derive(Debug, Clone, PartialEq)]
pub struct ProductType {
    /// Product type identity
    pub id: ProductTypeId,

    /// Owning category. Older records predate categories and have none.
    pub category: Option<CategoryId>,

    /// Name per language
    pub translations: Translations<ProductTypeTranslation>,
}

/// Product type name in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTypeTranslation {
    /// Language code
    pub language: String,

    /// Product type name
    pub name: String,
}

/// A sellable ceiling product priced per square metre.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identity
    pub id: ProductId,

    /// Owning product type, if linked.
    pub product_type: Option<ProductTypeId>,

    /// Unit price per square metre, never negative.
    pub price_per_sqm: Decimal,

    /// Whether the product can be ordered now.
    pub in_stock: bool,

    /// Primary image reference, used when the product has no image records.
    pub image_url: String,

    /// Free-text, comma separated tags.
    pub tags: String,

    /// When the product was added.
    pub created_at: Timestamp,

    /// Name and description per language
    pub translations: Translations<ProductTranslation>,

    /// Images in storage order
    pub images: Vec<Image>,

    /// Characteristics in storage order
    pub characteristics: Vec<Characteristic>,
}

impl Product {
    /// Images sorted by display order, ties broken by identity.
    pub fn sorted_images(&self) -> Vec<&Image> {
        let mut images: Vec<&Image> = self.images.iter().collect();

        images.sort_by_key(|image| (image.order, image.id));

        images
    }

    /// Characteristics sorted by display order, ties broken by identity.
    pub fn sorted_characteristics(&self) -> Vec<&Characteristic> {
        let mut characteristics: Vec<&Characteristic> = self.characteristics.iter().collect();

        characteristics.sort_by_key(|characteristic| (characteristic.order, characteristic.id));

        characteristics
    }

    /// The tag string split on commas, trimmed, with blanks dropped.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}

/// Product name and description in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTranslation {
    /// Language code
    pub language: String,

    /// Product name
    pub name: String,

    /// Product description
    pub description: String,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Image identity
    pub id: ImageId,

    /// Reference to the binary content.
    pub url: String,

    /// Alternative text, may be empty.
    pub alt_text: String,

    /// Display position; lower comes first.
    pub order: u32,
}

/// A product attribute such as "Colour: white".
#[derive(Debug, Clone, PartialEq)]
pub struct Characteristic {
    /// Characteristic identity
    pub id: CharacteristicId,

    /// Display position; lower comes first.
    pub order: u32,

    /// Name and value per language
    pub translations: Translations<CharacteristicTranslation>,
}

/// Characteristic name and value in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicTranslation {
    /// Language code
    pub language: String,

    /// Characteristic name
    pub name: String,

    /// Characteristic value
    pub value: String,
}

macro_rules! impl_translated {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Translated for $ty {
                fn language(&self) -> &str {
                    &self.language
                }
            }

            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

impl_translated!(
    CategoryTranslation,
    ProductTypeTranslation,
    ProductTranslation,
    CharacteristicTranslation,
);

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn image(id: i64, order: u32) -> Image {
        Image {
            id: ImageId::new(id),
            url: format!("https://cdn.example.com/{id}.jpg"),
            alt_text: String::new(),
            order,
        }
    }

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            product_type: None,
            price_per_sqm: Decimal::new(45_000, 2),
            in_stock: true,
            image_url: String::new(),
            tags: " matte, white,, ceiling ".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            translations: smallvec![],
            images: vec![image(3, 1), image(2, 0), image(1, 1)],
            characteristics: Vec::new(),
        }
    }

    #[test]
    fn images_sort_by_order_then_id() {
        let product = product();
        let ids: Vec<i64> = product
            .sorted_images()
            .into_iter()
            .map(|image| image.id.get())
            .collect();

        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn tag_list_drops_blanks() {
        assert_eq!(product().tag_list(), ["matte", "white", "ceiling"]);
    }
}
