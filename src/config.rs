//! Configuration
//!
//! Command line and environment settings for the `ceiling-catalog` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    contacts::phone::{DEFAULT_COUNTRY_CODE, PhoneRules},
    filters::ProductFilter,
    languages::Language,
    search::{DEFAULT_PAGE_SIZE, Paginator},
    service::ServiceSettings,
};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Catalog data and presentation settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// Directory holding fixture sets
    #[arg(
        long,
        env = "CATALOG_FIXTURES",
        default_value = "./fixtures",
        global = true
    )]
    pub fixtures: PathBuf,

    /// Catalog fixture set to load
    #[arg(long, env = "CATALOG_SET", default_value = "ceilings", global = true)]
    pub catalog: String,

    /// Language code for display text (en, ru, ky)
    #[arg(
        long,
        env = "CATALOG_LANGUAGE",
        default_value = Language::DEFAULT.code(),
        value_parser = parse_language,
        global = true
    )]
    pub language: String,

    /// Country code completing local phone numbers
    #[arg(
        long,
        env = "DEFAULT_COUNTRY_CODE",
        default_value = DEFAULT_COUNTRY_CODE,
        value_parser = parse_country_code,
        global = true
    )]
    pub country_code: PhoneRules,

    /// Search results per page
    #[arg(
        long,
        env = "PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        global = true
    )]
    pub page_size: usize,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

/// Ceiling catalog command line
#[derive(Debug, Parser)]
#[command(
    name = "ceiling-catalog",
    about = "Browse the ceiling catalog, price rooms and take contact requests",
    long_about = None
)]
pub struct AppConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Catalog operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Product sections for the home page
    Home,

    /// All categories
    Categories,

    /// One category with its products, price range and facets
    Category {
        /// Category id
        id: i64,

        /// Text to look for in names, descriptions and characteristic values
        #[arg(long)]
        query: Option<String>,

        /// Lowest unit price
        #[arg(long)]
        min_price: Option<f64>,

        /// Highest unit price
        #[arg(long)]
        max_price: Option<f64>,

        /// Accepted characteristic value as NAME=VALUE, repeatable
        #[arg(long = "characteristic", value_parser = parse_characteristic)]
        characteristics: Vec<(String, String)>,
    },

    /// One product in detail
    Product {
        /// Product id
        id: i64,
    },

    /// Price a room for a product
    Calculate {
        /// Product id
        product: i64,

        /// Room width in metres
        width: String,

        /// Room length in metres
        length: String,
    },

    /// Search products
    Search {
        /// Search text
        query: String,

        /// Page number
        #[arg(long)]
        page: Option<String>,
    },

    /// Canonicalise a phone number
    Phone {
        /// Phone number as typed
        raw: String,
    },

    /// Submit a contact request
    Contact {
        /// Your name
        #[arg(long)]
        name: String,

        /// Your e-mail address
        #[arg(long)]
        email: String,

        /// Your phone number
        #[arg(long)]
        phone: String,

        /// Your message
        #[arg(long)]
        message: String,
    },
}

impl AppConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

impl CatalogConfig {
    /// Settings handed to the catalog service.
    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            phone_rules: self.country_code.clone(),
            paginator: Paginator::new(self.page_size),
        }
    }
}

/// Build a listing filter from `category` subcommand options.
pub fn product_filter(
    query: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    characteristics: Vec<(String, String)>,
) -> ProductFilter {
    characteristics.into_iter().fold(
        ProductFilter {
            query,
            min_price,
            max_price,
            ..ProductFilter::default()
        },
        |filter, (name, value)| filter.with_characteristic(name, [value]),
    )
}

fn parse_country_code(raw: &str) -> Result<PhoneRules, String> {
    PhoneRules::new(raw).map_err(|error| error.to_string())
}

/// Supported codes are lowercased; other codes are kept, trimmed, and resolve
/// to fallback translations.
fn parse_language(raw: &str) -> Result<String, String> {
    let code = raw.trim();

    if code.is_empty() {
        return Err("language code must not be empty".to_string());
    }

    Ok(code
        .parse::<Language>()
        .map_or_else(|_err| code.to_string(), |language| language.code().to_string()))
}

fn parse_characteristic(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;

    let (name, value) = (name.trim(), value.trim());

    if name.is_empty() || value.is_empty() {
        return Err(format!("expected NAME=VALUE, got {raw:?}"));
    }

    Ok((name.to_string(), value.to_string()))
}
