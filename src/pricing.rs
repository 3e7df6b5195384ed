//! Pricing
//!
//! Room cost estimates and the price range shown on listing filters. All
//! arithmetic stays in [`Decimal`] at full precision; rounding to two places
//! happens only when a value leaves for display.

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::models::Product;

/// Fractional digits kept when a value is displayed.
pub const DISPLAY_SCALE: u32 = 2;

/// Room dimensions are entered in metres below this bound (five digits, two
/// of them fractional).
const DIMENSION_LIMIT: Decimal = Decimal::ONE_THOUSAND;

/// Which side of the room a value describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Room width
    Width,

    /// Room length
    Length,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Length => "length",
        })
    }
}

/// Rejected calculator input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// A dimension that is zero or negative.
    #[error("{dimension} must be greater than zero, got {value}")]
    NonPositiveDimension {
        /// Offending dimension
        dimension: Dimension,
        /// Value supplied
        value: Decimal,
    },

    /// A dimension that is not a decimal number.
    #[error("{dimension} is not a number: {raw:?}")]
    Malformed {
        /// Offending dimension
        dimension: Dimension,
        /// Text supplied
        raw: String,
    },

    /// A dimension with more than two fractional digits.
    #[error("{dimension} allows at most 2 decimal places, got {value}")]
    TooPrecise {
        /// Offending dimension
        dimension: Dimension,
        /// Value supplied
        value: Decimal,
    },

    /// A dimension of 1000 metres or more.
    #[error("{dimension} must be below 1000, got {value}")]
    TooLarge {
        /// Offending dimension
        dimension: Dimension,
        /// Value supplied
        value: Decimal,
    },

    /// A unit price below zero.
    #[error("unit price must not be negative, got {0}")]
    NegativePrice(Decimal),

    /// The product does not fit in a `Decimal`.
    #[error("cost calculation overflowed")]
    Overflow,
}

/// Area and cost for a room, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostEstimate {
    /// Square metres
    pub area: Decimal,

    /// Area multiplied by the unit price
    pub cost: Decimal,
}

impl CostEstimate {
    /// Area rounded for display.
    pub fn display_area(&self) -> Decimal {
        round_for_display(self.area)
    }

    /// Cost rounded for display.
    pub fn display_cost(&self) -> Decimal {
        round_for_display(self.cost)
    }
}

/// Estimate the cost of covering a `width` × `length` room.
///
/// # Errors
///
/// - [`PricingError::NonPositiveDimension`]: either dimension is zero or below.
/// - [`PricingError::NegativePrice`]: `unit_price` is below zero.
/// - [`PricingError::Overflow`]: the result cannot be represented.
pub fn estimate_cost(
    width: Decimal,
    length: Decimal,
    unit_price: Decimal,
) -> Result<CostEstimate, PricingError> {
    ensure_positive(Dimension::Width, width)?;
    ensure_positive(Dimension::Length, length)?;

    if unit_price < Decimal::ZERO {
        return Err(PricingError::NegativePrice(unit_price));
    }

    let area = width.checked_mul(length).ok_or(PricingError::Overflow)?;
    let cost = area.checked_mul(unit_price).ok_or(PricingError::Overflow)?;

    Ok(CostEstimate { area, cost })
}

/// Parse a dimension typed into the calculator form.
///
/// Trailing zeros do not count towards the two permitted decimal places, so
/// `"2.500"` is accepted as `2.5`.
///
/// # Errors
///
/// - [`PricingError::Malformed`]: not a decimal number.
/// - [`PricingError::NonPositiveDimension`]: zero or negative.
/// - [`PricingError::TooPrecise`]: more than two significant decimal places.
/// - [`PricingError::TooLarge`]: 1000 or more.
pub fn parse_dimension(dimension: Dimension, raw: &str) -> Result<Decimal, PricingError> {
    let malformed = || PricingError::Malformed {
        dimension,
        raw: raw.to_string(),
    };

    let text = raw.trim();

    if !is_plain_decimal(text) {
        return Err(malformed());
    }

    let value = Decimal::from_str(text).map_err(|_err| malformed())?;

    ensure_positive(dimension, value)?;

    if value.normalize().scale() > DISPLAY_SCALE {
        return Err(PricingError::TooPrecise { dimension, value });
    }

    if value >= DIMENSION_LIMIT {
        return Err(PricingError::TooLarge { dimension, value });
    }

    Ok(value)
}

/// Digits with at most one decimal point and an optional leading minus.
/// `Decimal::from_str` alone also takes `+`, `_` separators and exponents.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole
            .chars()
            .chain(fraction.chars())
            .all(|c| c.is_ascii_digit())
}

fn ensure_positive(dimension: Dimension, value: Decimal) -> Result<(), PricingError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(PricingError::NonPositiveDimension { dimension, value })
    }
}

/// Round to [`DISPLAY_SCALE`] places, halves away from zero.
pub fn round_for_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round for display and convert to a float for JSON consumers.
pub fn to_display_float(value: Decimal) -> f64 {
    round_for_display(value).to_f64().unwrap_or_default()
}

/// Bounds for the listing price slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    /// Lower bound, never below zero
    pub min: f64,

    /// Upper bound
    pub max: f64,
}

impl PriceRange {
    /// Range used when no product has a positive price.
    ///
    /// Provisional business rule, kept as the storefront shipped it.
    pub const DEFAULT: PriceRange = PriceRange {
        min: 0.0,
        max: 100.0,
    };
}

/// Share of the price span added beyond each end of the range.
///
/// Provisional business rule, kept as the storefront shipped it.
fn range_buffer() -> Percentage {
    Percentage::from(Decimal::new(1, 1))
}

/// Padded price range over the positive unit prices of `products`.
pub fn price_range(products: &[Product]) -> PriceRange {
    price_range_of(products.iter().map(|product| product.price_per_sqm))
}

/// Padded price range over raw prices.
///
/// Non-positive prices are ignored. With nothing left the range is
/// [`PriceRange::DEFAULT`]. Otherwise both ends move outwards by 10% of the
/// span, unless all prices are equal, and the lower end is clamped at zero.
pub fn price_range_of(prices: impl IntoIterator<Item = Decimal>) -> PriceRange {
    let mut bounds: Option<(Decimal, Decimal)> = None;

    for price in prices.into_iter().filter(|price| *price > Decimal::ZERO) {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(price), max.max(price)),
            None => (price, price),
        });
    }

    let Some((min, max)) = bounds else {
        return PriceRange::DEFAULT;
    };

    let span = max - min;

    let (min, max) = if span.is_zero() {
        (min, max)
    } else {
        let buffer = range_buffer() * span;

        ((min - buffer).max(Decimal::ZERO), max + buffer)
    };

    PriceRange {
        min: min.to_f64().unwrap_or_default(),
        max: max.to_f64().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn dec(s: &str) -> TestResult<Decimal> {
        Ok(Decimal::from_str(s)?)
    }

    #[test]
    fn cost_is_area_times_price() -> TestResult {
        let estimate = estimate_cost(dec("3.25")?, dec("4.10")?, dec("450.00")?)?;

        assert_eq!(estimate.area, dec("13.325")?);
        assert_eq!(estimate.cost, dec("5996.25")?);

        Ok(())
    }

    #[test]
    fn area_keeps_four_decimal_places() -> TestResult {
        let estimate = estimate_cost(dec("1.01")?, dec("1.01")?, dec("1.00")?)?;

        assert_eq!(estimate.area, dec("1.0201")?);
        assert_eq!(estimate.display_area(), dec("1.02")?);

        Ok(())
    }

    #[test]
    fn display_rounding_goes_half_away_from_zero() -> TestResult {
        assert_eq!(round_for_display(dec("1999.995")?), dec("2000.00")?);
        assert_eq!(round_for_display(dec("1999.994")?), dec("1999.99")?);
        assert!((to_display_float(dec("1999.995")?) - 2000.0).abs() < f64::EPSILON);
        assert!((to_display_float(dec("1999.99")?) - 1999.99).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn free_products_cost_nothing() -> TestResult {
        let estimate = estimate_cost(dec("2")?, dec("3")?, Decimal::ZERO)?;

        assert_eq!(estimate.area, dec("6")?);
        assert!(estimate.cost.is_zero());

        Ok(())
    }

    #[test]
    fn non_positive_dimensions_are_rejected() -> TestResult {
        assert_eq!(
            estimate_cost(Decimal::ZERO, dec("3")?, dec("10")?),
            Err(PricingError::NonPositiveDimension {
                dimension: Dimension::Width,
                value: Decimal::ZERO,
            })
        );
        assert!(matches!(
            estimate_cost(dec("3")?, dec("-1")?, dec("10")?),
            Err(PricingError::NonPositiveDimension {
                dimension: Dimension::Length,
                ..
            })
        ));

        Ok(())
    }

    #[test]
    fn negative_prices_are_rejected() -> TestResult {
        assert!(matches!(
            estimate_cost(dec("1")?, dec("1")?, dec("-0.01")?),
            Err(PricingError::NegativePrice(_))
        ));

        Ok(())
    }

    #[test]
    fn overflow_is_reported() -> TestResult {
        let result = estimate_cost(Decimal::MAX, dec("2")?, dec("1")?);

        assert_eq!(result, Err(PricingError::Overflow));

        Ok(())
    }

    #[test]
    fn parse_dimension_accepts_form_values() -> TestResult {
        assert_eq!(parse_dimension(Dimension::Width, " 3.50 ")?, dec("3.5")?);
        assert_eq!(parse_dimension(Dimension::Width, "2.500")?, dec("2.5")?);
        assert_eq!(parse_dimension(Dimension::Length, "999.99")?, dec("999.99")?);

        Ok(())
    }

    #[test]
    fn parse_dimension_rejects_bad_values() {
        assert!(matches!(
            parse_dimension(Dimension::Width, "three"),
            Err(PricingError::Malformed { .. })
        ));
        assert!(matches!(
            parse_dimension(Dimension::Width, ""),
            Err(PricingError::Malformed { .. })
        ));
        assert!(matches!(
            parse_dimension(Dimension::Width, "0"),
            Err(PricingError::NonPositiveDimension { .. })
        ));
        assert!(matches!(
            parse_dimension(Dimension::Length, "1.005"),
            Err(PricingError::TooPrecise { .. })
        ));
        assert!(matches!(
            parse_dimension(Dimension::Length, "1000"),
            Err(PricingError::TooLarge { .. })
        ));
    }

    #[test]
    fn parse_dimension_rejects_signs_separators_and_exponents() {
        for raw in ["1_0", "+2", "1e2", "1.2.3", ".", "2 5", "-"] {
            assert!(
                matches!(
                    parse_dimension(Dimension::Width, raw),
                    Err(PricingError::Malformed { .. })
                ),
                "{raw:?} should be malformed"
            );
        }
    }

    #[test]
    fn parse_dimension_reports_negative_values_as_non_positive() {
        assert!(matches!(
            parse_dimension(Dimension::Width, "-2"),
            Err(PricingError::NonPositiveDimension { .. })
        ));
    }

    #[test]
    fn empty_price_range_uses_default() {
        assert_eq!(price_range_of(Vec::new()), PriceRange::DEFAULT);
        assert_eq!(price_range_of([Decimal::ZERO]), PriceRange::DEFAULT);
    }

    #[test]
    fn single_price_has_no_buffer() -> TestResult {
        let range = price_range_of([dec("50")?]);

        assert_eq!(range, PriceRange { min: 50.0, max: 50.0 });

        Ok(())
    }

    #[test]
    fn range_is_padded_by_a_tenth_of_the_span() -> TestResult {
        let range = price_range_of([dec("200")?, dec("100")?, dec("150")?]);

        assert_eq!(range, PriceRange { min: 90.0, max: 210.0 });

        Ok(())
    }

    #[test]
    fn lower_bound_is_clamped_at_zero() -> TestResult {
        let range = price_range_of([dec("1")?, dec("1000")?]);

        assert!(range.min.abs() < f64::EPSILON, "min was {}", range.min);
        assert!((range.max - 1099.9).abs() < 1e-9, "max was {}", range.max);

        Ok(())
    }
}
