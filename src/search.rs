//! Search
//!
//! Free-text product search and the page slicer listings are cut with.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::{catalog::models::Product, translations::Translated};

/// Products shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Find products whose text mentions `query`.
///
/// A product matches when its name or description in `language` contains the
/// query, or when any translation of any of its characteristic values does.
/// Matching is a case-insensitive substring test. A blank query matches
/// nothing. Each product appears once, in identity order.
pub fn search<'a>(products: &'a [Product], query: &str, language: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = FxHashSet::default();
    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|product| matches_query(product, &needle, language))
        .filter(|product| seen.insert(product.id))
        .collect();

    matches.sort_by_key(|product| product.id);

    matches
}

fn matches_query(product: &Product, needle: &str, language: &str) -> bool {
    let in_language = product
        .translations
        .iter()
        .filter(|translation| translation.language() == language)
        .any(|translation| {
            contains(&translation.name, needle) || contains(&translation.description, needle)
        });

    in_language
        || product
            .characteristics
            .iter()
            .flat_map(|characteristic| characteristic.translations.iter())
            .any(|translation| contains(&translation.value, needle))
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// 1-based page number actually served
    pub number: usize,

    /// Total number of pages, at least one
    pub num_pages: usize,

    /// Total number of items across all pages
    pub count: usize,

    /// Items on this page
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Transform the items, keeping the page position.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

/// Cuts a sequence into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A paginator serving `per_page` items per page (at least one).
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages needed for `count` items. An empty set still has one page.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// Serve page `number`, clamped into the valid range.
    ///
    /// Page zero and anything unparsable become the first page; numbers past
    /// the end become the last page.
    pub fn page<T>(&self, items: Vec<T>, number: usize) -> Page<T> {
        let count = items.len();
        let num_pages = self.num_pages(count);
        let number = number.clamp(1, num_pages);
        let skip = (number - 1) * self.per_page;

        Page {
            number,
            num_pages,
            count,
            items: items.into_iter().skip(skip).take(self.per_page).collect(),
        }
    }

    /// Serve the page named by a raw query parameter.
    pub fn page_from_param<T>(&self, items: Vec<T>, raw: Option<&str>) -> Page<T> {
        let number = raw
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(1);

        self.page(items, number)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use smallvec::smallvec;

    use crate::catalog::models::{
        Characteristic, CharacteristicId, CharacteristicTranslation, ProductId,
        ProductTranslation,
    };

    use super::*;

    fn product(id: i64, ru: &str, en: &str, values: &[(&str, &str)]) -> Product {
        Product {
            id: ProductId::new(id),
            product_type: None,
            price_per_sqm: Decimal::ONE_HUNDRED,
            in_stock: true,
            image_url: String::new(),
            tags: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            translations: smallvec![
                ProductTranslation {
                    language: "ru".to_string(),
                    name: ru.to_string(),
                    description: String::new(),
                },
                ProductTranslation {
                    language: "en".to_string(),
                    name: en.to_string(),
                    description: format!("{en} stretch ceiling"),
                },
            ],
            images: Vec::new(),
            characteristics: values
                .iter()
                .zip(1..)
                .map(|((language, value), id)| Characteristic {
                    id: CharacteristicId::new(id),
                    order: 0,
                    translations: smallvec![CharacteristicTranslation {
                        language: (*language).to_string(),
                        name: "Colour".to_string(),
                        value: (*value).to_string(),
                    }],
                })
                .collect(),
        }
    }

    fn products() -> Vec<Product> {
        vec![
            product(3, "Глянцевый", "Glossy", &[("en", "White"), ("ru", "Белый")]),
            product(1, "Матовый", "Matte", &[("en", "Ivory")]),
            product(2, "Сатиновый", "Satin", &[("en", "white"), ("en", "Whitewash")]),
        ]
    }

    fn ids(found: &[&Product]) -> Vec<i64> {
        found.iter().map(|product| product.id.get()).collect()
    }

    #[test]
    fn blank_query_finds_nothing() {
        let products = products();

        assert!(search(&products, "", "ru").is_empty());
        assert!(search(&products, "   ", "ru").is_empty());
    }

    #[test]
    fn name_matches_only_in_requested_language() {
        let products = products();

        assert_eq!(ids(&search(&products, "matte", "en")), [1]);
        assert!(search(&products, "matte", "ru").is_empty());
        assert_eq!(ids(&search(&products, "МАТОВ", "ru")), [1]);
    }

    #[test]
    fn description_matches() {
        let products = products();

        assert_eq!(ids(&search(&products, "stretch", "en")), [1, 2, 3]);
    }

    #[test]
    fn characteristic_values_match_in_any_language() {
        let products = products();

        assert_eq!(ids(&search(&products, "белый", "en")), [3]);
    }

    #[test]
    fn multiple_characteristic_hits_appear_once() {
        let products = products();

        assert_eq!(ids(&search(&products, "white", "ky")), [2, 3]);
    }

    #[test]
    fn duplicate_records_are_collapsed() {
        let mut products = products();
        products.push(product(2, "Сатиновый", "Satin", &[]));

        assert_eq!(ids(&search(&products, "satin", "en")), [2]);
    }

    #[test]
    fn pages_hold_twelve_items_by_default() {
        let page = Paginator::default().page((1..=30).collect(), 2);

        assert_eq!(page.num_pages, 3);
        assert_eq!(page.count, 30);
        assert_eq!(page.items, (13..=24).collect::<Vec<i32>>());
        assert!(page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let paginator = Paginator::new(12);

        assert_eq!(paginator.page((1..=30).collect::<Vec<i32>>(), 0).number, 1);
        assert_eq!(
            paginator.page((1..=30).collect::<Vec<i32>>(), 99).items,
            [25, 26, 27, 28, 29, 30]
        );
    }

    #[test]
    fn unparsable_page_parameter_serves_first_page() {
        let page = Paginator::default().page_from_param(vec![1, 2, 3], Some("abc"));

        assert_eq!(page.number, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn empty_result_still_has_one_page() {
        let page = Paginator::default().page(Vec::<i32>::new(), 3);

        assert_eq!(page.num_pages, 1);
        assert_eq!(page.number, 1);
        assert!(page.items.is_empty());
    }
}
