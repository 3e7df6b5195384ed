//! Catalog service.
//!
//! The request-level operations a dispatcher calls: each loads what it needs
//! through the repositories, runs the pure catalog, pricing, search and
//! contact functions, and returns a response ready for rendering.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    catalog::{
        models::{Category, CategoryId, Product, ProductId, ProductType, ProductTypeId},
        repository::CatalogRepository,
        views::{CategoryView, Parents, ProductView, TypeSection},
    },
    contacts::{
        form::{ContactForm, thank_you_message},
        phone::PhoneRules,
        repository::{ContactInquiry, InquiryId, InquiryRepository},
    },
    filters::{Facets, ProductFilter},
    pricing::{
        Dimension, PriceRange, estimate_cost, parse_dimension, price_range, round_for_display,
    },
    search::{Page, Paginator, search},
    translations::resolve,
};

mod errors;

pub use errors::ServiceError;

/// Behaviour the host configures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    /// How contact phone numbers are completed
    pub phone_rules: PhoneRules,

    /// Page size for search results
    pub paginator: Paginator,
}

/// A category page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    /// The category itself
    pub category: CategoryView,

    /// Slider bounds over every product in the category
    pub price_range: PriceRange,

    /// Characteristic values on offer across the category
    pub facets: Facets,

    /// Number of products before filtering
    pub total: usize,

    /// Products passing the filter, newest first
    pub products: Vec<ProductView>,
}

/// Calculator form input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculationRequest {
    /// Product to price
    pub product_id: ProductId,

    /// Room width in metres, as typed
    pub width: String,

    /// Room length in metres, as typed
    pub length: String,
}

/// Calculator result, rounded to two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calculation {
    /// Product priced
    pub product_id: ProductId,

    /// Resolved product name, or the untitled placeholder
    pub product_name: String,

    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_sqm: Decimal,

    /// Square metres
    #[serde(with = "rust_decimal::serde::float")]
    pub area: Decimal,

    /// Estimated cost
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

/// A page of search hits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    /// Query as entered, trimmed
    pub query: String,

    /// Matching products
    pub page: Page<ProductView>,
}

/// Outcome of a contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// The stored inquiry
    pub inquiry: ContactInquiry,

    /// Thank-you text in the visitor's language
    pub message: &'static str,
}

/// Catalog operations over a catalog store `C` and an inquiry store `I`.
#[derive(Debug)]
pub struct CatalogService<C, I> {
    catalog: C,
    inquiries: I,
    settings: ServiceSettings,
}

impl<C, I> CatalogService<C, I>
where
    C: CatalogRepository,
    I: InquiryRepository,
{
    /// Create a service over the given stores.
    pub fn new(catalog: C, inquiries: I, settings: ServiceSettings) -> Self {
        Self {
            catalog,
            inquiries,
            settings,
        }
    }

    /// Service settings.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Home page: one section per product type that has products.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when the catalog cannot be read.
    pub fn home(&self, language: &str) -> Result<Vec<TypeSection>, ServiceError> {
        debug!(language, "building home sections");

        let categories = self.category_map()?;
        let mut sections = Vec::new();

        for product_type in self.catalog.product_types()? {
            let products = self.catalog.products_of_type(product_type.id)?;

            if products.is_empty() {
                continue;
            }

            let category = product_type.category.and_then(|id| categories.get(&id));

            sections.push(TypeSection::build(
                &product_type,
                category,
                &products,
                language,
            ));
        }

        Ok(sections)
    }

    /// Every category, resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when the catalog cannot be read.
    pub fn categories(&self, language: &str) -> Result<Vec<CategoryView>, ServiceError> {
        debug!(language, "listing categories");

        Ok(self
            .catalog
            .categories()?
            .iter()
            .map(|category| CategoryView::build(category, language))
            .collect())
    }

    /// A category page with its products narrowed by `filter`.
    ///
    /// The price range and facets describe the whole category so that the
    /// controls do not shrink as the visitor filters.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`]: no such category.
    /// - [`ServiceError::Storage`]: the catalog cannot be read.
    pub fn category_listing(
        &self,
        id: CategoryId,
        language: &str,
        filter: &ProductFilter,
    ) -> Result<CategoryListing, ServiceError> {
        debug!(category = %id, language, "building category listing");

        let category = self
            .catalog
            .category(id)?
            .ok_or(ServiceError::NotFound {
                entity: "category",
                id: id.get(),
            })?;

        let product_types = self.catalog.product_types_in(id)?;
        let mut products = Vec::new();

        for product_type in &product_types {
            products.extend(self.catalog.products_of_type(product_type.id)?);
        }

        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let types: FxHashMap<ProductTypeId, &ProductType> = product_types
            .iter()
            .map(|product_type| (product_type.id, product_type))
            .collect();

        let views: Vec<ProductView> = products
            .iter()
            .map(|product| {
                let product_type = product
                    .product_type
                    .and_then(|type_id| types.get(&type_id).copied());

                ProductView::build(product, Parents::new(product_type, Some(&category)), language)
            })
            .collect();

        let facets = Facets::collect(&views);
        let total = views.len();

        Ok(CategoryListing {
            category: CategoryView::build(&category, language),
            price_range: price_range(&products),
            facets,
            total,
            products: filter.apply(views),
        })
    }

    /// A single product page.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`]: no such product.
    /// - [`ServiceError::Storage`]: the catalog cannot be read.
    pub fn product_detail(
        &self,
        id: ProductId,
        language: &str,
    ) -> Result<ProductView, ServiceError> {
        debug!(product = %id, language, "building product detail");

        let product = self.find_product(id)?;
        let product_type = self.product_type_of(&product)?;
        let category = match product_type.as_ref().and_then(|t| t.category) {
            Some(category_id) => {
                let category = self.catalog.category(category_id)?;

                if category.is_none() {
                    warn!(product = %id, category = %category_id, "category not found");
                }

                category
            }
            None => None,
        };

        Ok(ProductView::build(
            &product,
            Parents::new(product_type.as_ref(), category.as_ref()),
            language,
        ))
    }

    /// Price a room for a product.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`]: a dimension is malformed or out of range.
    /// - [`ServiceError::NotFound`]: no such product.
    /// - [`ServiceError::Storage`]: the catalog cannot be read.
    pub fn calculate(
        &self,
        request: &CalculationRequest,
        language: &str,
    ) -> Result<Calculation, ServiceError> {
        debug!(product = %request.product_id, language, "calculating cost");

        let width = parse_dimension(Dimension::Width, &request.width)?;
        let length = parse_dimension(Dimension::Length, &request.length)?;
        let product = self.find_product(request.product_id)?;
        let estimate = estimate_cost(width, length, product.price_per_sqm)?;

        Ok(Calculation {
            product_id: product.id,
            product_name: resolve(&product.translations, language)
                .name_or_untitled()
                .to_string(),
            price_per_sqm: round_for_display(product.price_per_sqm),
            area: estimate.display_area(),
            cost: estimate.display_cost(),
        })
    }

    /// Search the catalog and serve one page of hits.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when the catalog cannot be read.
    pub fn search(
        &self,
        query: &str,
        language: &str,
        page: Option<&str>,
    ) -> Result<SearchResults, ServiceError> {
        let query = query.trim();

        debug!(query, language, "searching products");

        if query.is_empty() {
            return Ok(SearchResults {
                query: String::new(),
                page: self.settings.paginator.page(Vec::new(), 1),
            });
        }

        let products = self.catalog.products()?;
        let hits = search(&products, query, language);
        let page = self.settings.paginator.page_from_param(hits, page);

        let types: FxHashMap<ProductTypeId, ProductType> = self
            .catalog
            .product_types()?
            .into_iter()
            .map(|product_type| (product_type.id, product_type))
            .collect();
        let categories = self.category_map()?;

        Ok(SearchResults {
            query: query.to_string(),
            page: page.map(|product| {
                let product_type = product.product_type.and_then(|id| types.get(&id));
                let category = product_type
                    .and_then(|t| t.category)
                    .and_then(|id| categories.get(&id));

                ProductView::build(product, Parents::new(product_type, category), language)
            }),
        })
    }

    /// Validate and store a contact request.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidContact`]: a field is missing or malformed.
    /// - [`ServiceError::Storage`]: the inquiry could not be stored.
    pub fn submit_inquiry(
        &mut self,
        form: &ContactForm,
        language: &str,
    ) -> Result<Submission, ServiceError> {
        let contact = form.validate(&self.settings.phone_rules)?;
        let inquiry = self.inquiries.insert(contact, Timestamp::now())?;

        info!(inquiry = %inquiry.id, "contact inquiry received");

        Ok(Submission {
            inquiry,
            message: thank_you_message(language),
        })
    }

    /// Every inquiry, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Storage`] when the store cannot be read.
    pub fn inquiries(&self) -> Result<Vec<ContactInquiry>, ServiceError> {
        Ok(self.inquiries.inquiries()?)
    }

    /// Flag an inquiry as reviewed.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotFound`]: no such inquiry.
    /// - [`ServiceError::Storage`]: the store failed.
    pub fn mark_inquiry_checked(&mut self, id: InquiryId) -> Result<ContactInquiry, ServiceError> {
        let inquiry = self.inquiries.mark_checked(id)?;

        info!(inquiry = %id, "contact inquiry checked");

        Ok(inquiry)
    }

    fn find_product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.catalog.product(id)?.ok_or(ServiceError::NotFound {
            entity: "product",
            id: id.get(),
        })
    }

    fn product_type_of(&self, product: &Product) -> Result<Option<ProductType>, ServiceError> {
        let Some(type_id) = product.product_type else {
            return Ok(None);
        };

        let product_type = self.catalog.product_type(type_id)?;

        if product_type.is_none() {
            warn!(product = %product.id, product_type = %type_id, "product type not found");
        }

        Ok(product_type)
    }

    fn category_map(&self) -> Result<FxHashMap<CategoryId, Category>, ServiceError> {
        Ok(self
            .catalog
            .categories()?
            .into_iter()
            .map(|category| (category.id, category))
            .collect())
    }
}
