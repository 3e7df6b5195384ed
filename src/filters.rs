//! Listing Filters
//!
//! Characteristic facets offered on a category page and the filter a visitor
//! builds from them.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::catalog::views::ProductView;

/// Distinct characteristic values per characteristic name, both sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Facets(BTreeMap<String, BTreeSet<String>>);

impl Facets {
    /// Collect the facets of resolved `products`.
    pub fn collect<'a>(products: impl IntoIterator<Item = &'a ProductView>) -> Self {
        let mut facets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for characteristic in products
            .into_iter()
            .flat_map(|product| product.characteristics.iter())
        {
            facets
                .entry(characteristic.name.clone())
                .or_default()
                .insert(characteristic.value.clone());
        }

        Self(facets)
    }

    /// Values offered for `name`.
    pub fn values(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.0.get(name)
    }

    /// Facet names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Whether no product had characteristics.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Visitor-chosen constraints on a product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive text that must appear somewhere on the product
    pub query: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    pub max_price: Option<f64>,

    /// Accepted values per characteristic name
    pub characteristics: FxHashMap<String, FxHashSet<String>>,
}

impl ProductFilter {
    /// Accept `values` for characteristic `name`.
    #[must_use]
    pub fn with_characteristic<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.characteristics
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));

        self
    }

    /// Whether nothing is constrained.
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(|query| query.trim().is_empty())
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.characteristics.values().all(FxHashSet::is_empty)
    }

    /// Whether `product` passes every constraint.
    pub fn matches(&self, product: &ProductView) -> bool {
        self.matches_query(product)
            && self.min_price.is_none_or(|min| product.price_per_sqm >= min)
            && self.max_price.is_none_or(|max| product.price_per_sqm <= max)
            && self.matches_characteristics(product)
    }

    /// Keep the products that pass.
    pub fn apply(&self, products: Vec<ProductView>) -> Vec<ProductView> {
        products
            .into_iter()
            .filter(|product| self.matches(product))
            .collect()
    }

    fn matches_query(&self, product: &ProductView) -> bool {
        let Some(query) = self.query.as_deref().map(str::trim) else {
            return true;
        };

        if query.is_empty() {
            return true;
        }

        let needle = query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);

        product.name.as_deref().is_some_and(contains)
            || product.description.as_deref().is_some_and(contains)
            || product
                .characteristics
                .iter()
                .any(|characteristic| contains(&characteristic.value))
    }

    /// A product with no characteristic of a filtered name is not excluded by it.
    fn matches_characteristics(&self, product: &ProductView) -> bool {
        self.characteristics
            .iter()
            .filter(|(_, accepted)| !accepted.is_empty())
            .all(|(name, accepted)| {
                let mut values = product
                    .characteristics
                    .iter()
                    .filter(|characteristic| &characteristic.name == name)
                    .peekable();

                values.peek().is_none()
                    || values.any(|characteristic| accepted.contains(&characteristic.value))
            })
    }
}
