//! Ceiling catalog command line host.

use std::{
    error::Error,
    io::{self, Write},
};

use ceiling_catalog::{
    catalog::models::{CategoryId, ProductId},
    config::{AppConfig, CatalogConfig, Command, product_filter},
    contacts::{form::ContactForm, repository::InMemoryInquiries},
    fixtures::Fixture,
    languages::Language,
    observability::init_logging,
    render,
    service::{CalculationRequest, CatalogService},
};
use tracing::{debug, error, info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;

    init_logging(&config.logging)?;

    let result = match config.command {
        Command::Phone { raw } => phone(&config.catalog, &raw),
        command => catalog(&config.catalog, command),
    };

    if let Err(error) = &result {
        error!(%error, "command failed");
    }

    result
}

fn phone(settings: &CatalogConfig, raw: &str) -> Result<(), Box<dyn Error>> {
    let phone = settings.country_code.normalize(raw)?;
    let mut out = io::stdout().lock();

    if settings.json {
        render::write_json(&mut out, &phone)?;
    } else {
        writeln!(out, "{phone}")?;
    }

    Ok(())
}

fn catalog(settings: &CatalogConfig, command: Command) -> Result<(), Box<dyn Error>> {
    let catalog = Fixture::with_base_path(&settings.fixtures).load_catalog(&settings.catalog)?;

    info!(
        catalog = %settings.catalog,
        products = catalog.product_count(),
        "catalog loaded"
    );

    let mut service = CatalogService::new(
        catalog,
        InMemoryInquiries::new(),
        settings.service_settings(),
    );
    let language = settings.language.as_str();

    if let Err(error) = language.parse::<Language>() {
        warn!(%error, "showing fallback translations");
    }

    debug!(
        language,
        page_size = service.settings().paginator.per_page(),
        country_code = service.settings().phone_rules.country_code(),
        "catalog service ready"
    );

    let mut out = io::stdout().lock();

    match command {
        Command::Home => {
            let sections = service.home(language)?;

            if settings.json {
                render::write_json(&mut out, &sections)?;
            } else {
                render::write_sections(&mut out, &sections)?;
            }
        }
        Command::Categories => {
            let categories = service.categories(language)?;

            if settings.json {
                render::write_json(&mut out, &categories)?;
            } else {
                render::write_categories(&mut out, &categories)?;
            }
        }
        Command::Category {
            id,
            query,
            min_price,
            max_price,
            characteristics,
        } => {
            let filter = product_filter(query, min_price, max_price, characteristics);
            let listing = service.category_listing(CategoryId::new(id), language, &filter)?;

            if settings.json {
                render::write_json(&mut out, &listing)?;
            } else {
                render::write_listing(&mut out, &listing)?;
            }
        }
        Command::Product { id } => {
            let product = service.product_detail(ProductId::new(id), language)?;

            if settings.json {
                render::write_json(&mut out, &product)?;
            } else {
                render::write_product(&mut out, &product)?;
            }
        }
        Command::Calculate {
            product,
            width,
            length,
        } => {
            let request = CalculationRequest {
                product_id: ProductId::new(product),
                width,
                length,
            };
            let calculation = service.calculate(&request, language)?;

            if settings.json {
                render::write_json(&mut out, &calculation)?;
            } else {
                render::write_calculation(&mut out, &request, &calculation)?;
            }
        }
        Command::Search { query, page } => {
            let results = service.search(&query, language, page.as_deref())?;

            if settings.json {
                render::write_json(&mut out, &results)?;
            } else {
                render::write_search(&mut out, &results)?;
            }
        }
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                phone,
                message,
            };
            let submission = service.submit_inquiry(&form, language)?;

            if settings.json {
                render::write_json(&mut out, &submission)?;
            } else {
                render::write_submission(&mut out, &submission)?;
            }
        }
        Command::Phone { raw } => phone(settings, &raw)?,
    }

    Ok(())
}
