//! Property tests for the calculator, product images and phone numbers.
//!
//! - The estimated cost is exactly width × length × unit price, with no
//!   rounding before display.
//! - Zero or negative dimensions are always rejected.
//! - The primary image is never repeated among the additional images.
//! - A canonical phone number canonicalises to itself.

use ceiling_catalog::{
    catalog::{
        models::{Image, ImageId, Product, ProductId},
        views::{Parents, ProductView},
    },
    contacts::phone::normalize_phone,
    pricing::{PricingError, estimate_cost, round_for_display},
};
use jiff::Timestamp;
use proptest::prelude::*;
use rust_decimal::Decimal;
use smallvec::smallvec;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn product_with_images(orders: &[u32]) -> Product {
    let images = orders
        .iter()
        .zip(1_i64..)
        .map(|(order, id)| Image {
            id: ImageId::new(id),
            url: format!("https://cdn.example.com/{id}.jpg"),
            alt_text: String::new(),
            order: *order,
        })
        .collect();

    Product {
        id: ProductId::new(1),
        product_type: None,
        price_per_sqm: Decimal::ONE,
        in_stock: true,
        image_url: String::new(),
        tags: String::new(),
        created_at: Timestamp::UNIX_EPOCH,
        translations: smallvec![],
        images,
        characteristics: Vec::new(),
    }
}

proptest! {
    #[test]
    fn cost_is_the_exact_product(
        width in 1_i64..100_000,
        length in 1_i64..100_000,
        price in 0_i64..10_000_000,
    ) {
        let (width, length, price) = (cents(width), cents(length), cents(price));

        let estimate = estimate_cost(width, length, price)?;

        prop_assert_eq!(estimate.area, width * length);
        prop_assert_eq!(estimate.cost, width * length * price);
        prop_assert_eq!(estimate.display_cost(), round_for_display(estimate.cost));
    }

    #[test]
    fn non_positive_width_is_rejected(
        width in -100_000_i64..=0,
        length in 1_i64..100_000,
    ) {
        let result = estimate_cost(cents(width), cents(length), Decimal::ONE);

        let rejected = matches!(result, Err(PricingError::NonPositiveDimension { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn primary_image_is_not_repeated(orders in prop::collection::vec(0_u32..5, 0..8)) {
        let product = product_with_images(&orders);

        let view = ProductView::build(&product, Parents::none(), "ru");

        prop_assert_eq!(view.additional_images.len(), orders.len().saturating_sub(1));

        if let Some(primary) = &view.primary_image {
            let lowest = orders.iter().min().copied();
            let primary_order = product
                .images
                .iter()
                .find(|image| image.url == primary.url)
                .map(|image| image.order);

            prop_assert_eq!(primary_order, lowest);
            prop_assert!(view.additional_images.iter().all(|image| image.url != primary.url));
        } else {
            prop_assert!(orders.is_empty());
        }
    }

    #[test]
    fn canonical_phone_is_stable(raw in "[+]?[0-9 ()-]{0,20}") {
        if let Ok(phone) = normalize_phone(&raw) {
            prop_assert!(phone.starts_with('+'));
            prop_assert!((7..=16).contains(&phone.len()));
            prop_assert!(phone.chars().skip(1).all(|c| c.is_ascii_digit()));
            prop_assert_eq!(normalize_phone(&phone), Ok(phone.clone()));
        }
    }
}
