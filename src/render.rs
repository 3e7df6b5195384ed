//! Terminal Rendering
//!
//! Tables and JSON for the command line host.

use std::io;

use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::views::{CategoryView, ProductView, TypeSection},
    service::{Calculation, CalculationRequest, CategoryListing, SearchResults, Submission},
};

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// A value could not be serialised
    #[error("failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialisation or the write fails.
pub fn write_json(mut out: impl io::Write, value: &impl Serialize) -> Result<(), RenderError> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;

    Ok(())
}

/// Write one table per home page section.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_sections(
    mut out: impl io::Write,
    sections: &[TypeSection],
) -> Result<(), RenderError> {
    for section in sections {
        writeln!(out, "\n{}", section.type_name)?;
        write_table(&mut out, product_table(&section.products))?;
    }

    Ok(())
}

/// Write the category list.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_categories(
    mut out: impl io::Write,
    categories: &[CategoryView],
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Category", "Description"]);

    for category in categories {
        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            category.description.clone(),
        ]);
    }

    write_table(&mut out, builder)
}

/// Write a category page: heading, price range, facets and products.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_listing(
    mut out: impl io::Write,
    listing: &CategoryListing,
) -> Result<(), RenderError> {
    writeln!(out, "\n{}", listing.category.name)?;

    if !listing.category.description.is_empty() {
        writeln!(out, "{}", listing.category.description)?;
    }

    writeln!(
        out,
        "Price range: {:.2} to {:.2}",
        listing.price_range.min, listing.price_range.max
    )?;

    if listing.facets.is_empty() {
        writeln!(out, "No characteristics to filter by")?;
    }

    for name in listing.facets.names() {
        let values: Vec<&str> = listing
            .facets
            .values(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();

        writeln!(out, "{name}: {}", values.join(", "))?;
    }

    writeln!(
        out,
        "Showing {} of {} products",
        listing.products.len(),
        listing.total
    )?;

    write_table(&mut out, product_table(&listing.products))
}

/// Write a product page.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_product(mut out: impl io::Write, product: &ProductView) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Field", "Value"]);
    builder.push_record(["Product".to_string(), product.label.clone()]);
    builder.push_record([
        "Category".to_string(),
        product.category_name.clone().unwrap_or_default(),
    ]);
    builder.push_record([
        "Price per m²".to_string(),
        format!("{:.2}", product.price_per_sqm),
    ]);
    builder.push_record(["In stock".to_string(), yes_no(product.in_stock).to_string()]);
    builder.push_record(["Tags".to_string(), product.tags.join(", ")]);

    if let Some(image) = &product.primary_image {
        builder.push_record(["Image".to_string(), image.url.clone()]);
    }

    for image in &product.additional_images {
        builder.push_record(["More images".to_string(), image.url.clone()]);
    }

    for characteristic in &product.characteristics {
        builder.push_record([characteristic.name.clone(), characteristic.value.clone()]);
    }

    write_table(&mut out, builder)?;

    if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
        writeln!(out, "\n{description}")?;
    }

    Ok(())
}

/// Write a cost estimate.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_calculation(
    mut out: impl io::Write,
    request: &CalculationRequest,
    calculation: &Calculation,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Product", "Width", "Length", "Area m²", "Price per m²", "Cost"]);
    builder.push_record([
        calculation.product_name.clone(),
        request.width.trim().to_string(),
        request.length.trim().to_string(),
        format!("{:.2}", calculation.area),
        format!("{:.2}", calculation.price_per_sqm),
        format!("{:.2}", calculation.cost),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..6), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write one page of search results.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_search(mut out: impl io::Write, results: &SearchResults) -> Result<(), RenderError> {
    if results.page.count == 0 {
        writeln!(out, "No products match {:?}", results.query)?;

        return Ok(());
    }

    writeln!(
        out,
        "{} products match {:?}, page {} of {}",
        results.page.count, results.query, results.page.number, results.page.num_pages
    )?;

    write_table(&mut out, product_table(&results.page.items))
}

/// Write a submission confirmation.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_submission(
    mut out: impl io::Write,
    submission: &Submission,
) -> Result<(), RenderError> {
    writeln!(out, "{}", submission.message)?;
    writeln!(
        out,
        "Inquiry {} from {} <{}>, {}",
        submission.inquiry.id,
        submission.inquiry.name,
        submission.inquiry.email,
        submission.inquiry.phone
    )?;

    Ok(())
}

fn product_table(products: &[ProductView]) -> Builder {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price per m²", "In stock", "Tags"]);

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.label.clone(),
            format!("{:.2}", product.price_per_sqm),
            yes_no(product.in_stock).to_string(),
            product.tags.join(", "),
        ]);
    }

    builder
}

fn write_table(out: &mut impl io::Write, builder: Builder) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}")?;

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
