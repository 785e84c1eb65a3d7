//! Vipon Scraper - Deal crawling over a browser session.
//!
//! This crate drives the promotion site through the [`BrowserActions`]
//! abstraction: it logs in, scrolls the lazily-loaded listing until enough
//! deal links are rendered, visits each deal page and extracts a fixed set of
//! fields into a [`ResultTable`] that can be exported as CSV.
//!
//! # Components
//!
//! - [`Session`] - login form submission
//! - [`LinkCollector`] - scroll-driven link collection with a stall limit
//! - [`DetailExtractor`] - detail and code-reveal page extraction with throttling
//! - [`ResultAggregator`] - ordered accumulation into a dated table
//! - [`Crawler`] - wires the above together for one run
//!
//! # Example
//!
//! ```rust,ignore
//! use vipon_browser::BrowserEngine;
//! use vipon_core::{AppConfig, Credentials};
//! use vipon_scraper::{export, Crawler};
//!
//! let config = AppConfig::load_with_env(None)?;
//! let browser = BrowserEngine::launch(&config.browser).await?;
//! let crawler = Crawler::new(browser, Credentials::from_lookup(|var| std::env::var(var).ok())?, config);
//!
//! let table = crawler.run().await?;
//! export::write_csv(&table, &crawler.config().output)?;
//! ```
//!
//! [`BrowserActions`]: vipon_browser::BrowserActions

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod crawler;
pub mod detail;
pub mod error;
pub mod export;
pub mod links;
pub mod parser;
pub mod record;
pub mod session;
pub mod throttle;

// Re-export commonly used types
pub use crawler::Crawler;
pub use detail::DetailExtractor;
pub use error::{Result, ScrapeError};
pub use links::{LinkCollection, LinkCollector};
pub use parser::{CodeParser, DetailFields, DetailParser, ListingParser, PageKind, PageParser};
pub use record::{DealRecord, ExtractedDeal, ResultAggregator, ResultTable};
pub use session::Session;
pub use throttle::Throttle;
