//! Catalog Views
//!
//! Flat, language-resolved display records handed to the rendering layer.

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    catalog::models::{
        Category, CategoryId, Characteristic, Image, Product, ProductId, ProductType, ProductTypeId,
    },
    pricing::to_display_float,
    translations::{UNTITLED, resolve},
};

/// A product image ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    /// Reference to the binary content
    pub url: String,

    /// Alternative text, possibly empty
    pub alt_text: String,
}

impl From<&Image> for ImageView {
    fn from(image: &Image) -> Self {
        Self {
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
        }
    }
}

/// A characteristic resolved into one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacteristicView {
    /// Characteristic name, e.g. "Colour"
    pub name: String,

    /// Characteristic value, e.g. "White"
    pub value: String,
}

impl CharacteristicView {
    /// Resolve `characteristic` into `language`.
    ///
    /// An untranslated characteristic shows as [`UNTITLED`] with an empty value.
    pub fn resolve(characteristic: &Characteristic, language: &str) -> Self {
        match resolve(&characteristic.translations, language).get() {
            Some(translation) => Self {
                name: translation.name.clone(),
                value: translation.value.clone(),
            },
            None => Self {
                name: UNTITLED.to_string(),
                value: String::new(),
            },
        }
    }
}

/// Parents of a product, as far as they are linked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parents<'a> {
    /// The product's type, when the product is linked to one
    pub product_type: Option<&'a ProductType>,

    /// The type's category, when the type is linked to one
    pub category: Option<&'a Category>,
}

impl<'a> Parents<'a> {
    /// A product with no known parents.
    pub fn none() -> Self {
        Self::default()
    }

    /// A product under `product_type`, itself under `category`.
    pub fn new(product_type: Option<&'a ProductType>, category: Option<&'a Category>) -> Self {
        Self {
            product_type,
            category,
        }
    }
}

/// Everything a product page or card shows, resolved into one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    /// Product identity
    pub id: ProductId,

    /// Resolved product name, absent when untranslated
    pub name: Option<String>,

    /// Resolved product description, absent when untranslated
    pub description: Option<String>,

    /// `"{name} - ({type})"`, or whichever of the two resolved
    pub label: String,

    /// Product type identity
    pub type_id: Option<ProductTypeId>,

    /// Resolved product type name
    pub type_name: Option<String>,

    /// Category identity
    pub category_id: Option<CategoryId>,

    /// Resolved category name
    pub category_name: Option<String>,

    /// Unit price rounded to two places
    pub price_per_sqm: f64,

    /// Whether the product can be ordered now
    pub in_stock: bool,

    /// First image by display order
    pub primary_image: Option<ImageView>,

    /// Remaining images by display order
    pub additional_images: Vec<ImageView>,

    /// Characteristics by display order
    pub characteristics: Vec<CharacteristicView>,

    /// Tags split out of the tag string
    pub tags: Vec<String>,

    /// When the product was added
    pub created_at: Timestamp,
}

impl ProductView {
    /// Build the display record for `product` in `language`.
    pub fn build(product: &Product, parents: Parents<'_>, language: &str) -> Self {
        let translation = resolve(&product.translations, language).get();

        let type_name = parents
            .product_type
            .and_then(|product_type| resolve(&product_type.translations, language).name())
            .map(ToString::to_string);

        let category_name = parents
            .category
            .and_then(|category| resolve(&category.translations, language).name())
            .map(ToString::to_string);

        let name = translation.map(|t| t.name.clone());
        let label = combined_label(name.as_deref(), type_name.as_deref());

        let images = product.sorted_images();
        let (primary_image, additional_images) = match images.split_first() {
            Some((first, rest)) => (
                Some(ImageView::from(*first)),
                rest.iter().map(|image| ImageView::from(*image)).collect(),
            ),
            None => (fallback_image(product), Vec::new()),
        };

        let characteristics = product
            .sorted_characteristics()
            .into_iter()
            .map(|characteristic| CharacteristicView::resolve(characteristic, language))
            .collect();

        Self {
            id: product.id,
            name,
            description: translation.map(|t| t.description.clone()),
            label,
            type_id: product.product_type,
            type_name,
            category_id: parents.category.map(|category| category.id),
            category_name,
            price_per_sqm: to_display_float(product.price_per_sqm),
            in_stock: product.in_stock,
            primary_image,
            additional_images,
            characteristics,
            tags: product.tag_list(),
            created_at: product.created_at,
        }
    }

    /// Name, or [`UNTITLED`] when the product is untranslated.
    pub fn name_or_untitled(&self) -> &str {
        self.name.as_deref().unwrap_or(UNTITLED)
    }
}

/// Build the display record for `product` in `language`.
pub fn to_display_record(product: &Product, parents: Parents<'_>, language: &str) -> ProductView {
    ProductView::build(product, parents, language)
}

fn combined_label(name: Option<&str>, type_name: Option<&str>) -> String {
    match (name, type_name) {
        (Some(name), Some(type_name)) => format!("{name} - ({type_name})"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => UNTITLED.to_string(),
    }
}

fn fallback_image(product: &Product) -> Option<ImageView> {
    if product.image_url.is_empty() {
        return None;
    }

    Some(ImageView {
        url: product.image_url.clone(),
        alt_text: String::new(),
    })
}

/// A category resolved into one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    /// Category identity
    pub id: CategoryId,

    /// Resolved name, or the untitled placeholder
    pub name: String,

    /// Resolved description, empty when untranslated
    pub description: String,

    /// Cover image reference
    pub cover_image: Option<String>,
}

impl CategoryView {
    /// Resolve `category` into `language`.
    pub fn build(category: &Category, language: &str) -> Self {
        let resolution = resolve(&category.translations, language);

        Self {
            id: category.id,
            name: resolution.name_or_untitled().to_string(),
            description: resolution
                .get()
                .map(|t| t.description.clone())
                .unwrap_or_default(),
            cover_image: category.cover_image.clone(),
        }
    }
}

/// A product type heading with the products listed under it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSection {
    /// Product type identity
    pub type_id: ProductTypeId,

    /// Resolved type name, or the untitled placeholder
    pub type_name: String,

    /// Products of this type
    pub products: Vec<ProductView>,
}

impl TypeSection {
    /// Resolve `product_type` and its `products` into `language`.
    pub fn build(
        product_type: &ProductType,
        category: Option<&Category>,
        products: &[Product],
        language: &str,
    ) -> Self {
        let parents = Parents::new(Some(product_type), category);

        Self {
            type_id: product_type.id,
            type_name: resolve(&product_type.translations, language)
                .name_or_untitled()
                .to_string(),
            products: products
                .iter()
                .map(|product| ProductView::build(product, parents, language))
                .collect(),
        }
    }
}
